//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `http` - HTTP posts gateway via reqwest

pub mod api;

// Re-exports - In-Memory
pub use api::InMemoryPostsApi;

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use api::{HttpApiConfig, HttpPostsApi};
