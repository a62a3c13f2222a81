//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostId;

/// Failure of a backend call. The `Display` text is what request trackers
/// record and what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Post not found: {0}")]
    NotFound(PostId),
}
