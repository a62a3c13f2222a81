//! Application-level errors.

use thiserror::Error;

use postboard_core::FetchError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Backend setup failed: {0}")]
    Backend(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the application.
pub type AppResult<T> = Result<T, AppError>;
