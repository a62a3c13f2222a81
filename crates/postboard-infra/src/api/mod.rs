//! Posts gateway implementations - HTTP and in-memory fallback.

mod memory;

#[cfg(feature = "http")]
mod http;

pub use memory::InMemoryPostsApi;

#[cfg(feature = "http")]
pub use http::{HttpApiConfig, HttpPostsApi};
