use async_trait::async_trait;

use crate::domain::{Post, PostId};
use crate::error::FetchError;

/// Posts backend - abstraction over the HTTP API and in-process fakes.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Fetch every post (`GET /posts`).
    async fn fetch_all(&self) -> Result<Vec<Post>, FetchError>;

    /// Fetch a single post (`GET /posts/{id}`).
    async fn fetch_one(&self, id: &PostId) -> Result<Post, FetchError>;

    /// Submit a fully-formed post (`POST /posts`) and return the server's copy.
    async fn create(&self, post: &Post) -> Result<Post, FetchError>;
}
