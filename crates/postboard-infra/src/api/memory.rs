//! In-memory posts backend - used when no HTTP API is available.
//!
//! Works within a single process only. Data is lost on restart.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use postboard_core::FetchError;
use postboard_core::domain::{Post, PostId, Reactions, UserId};
use postboard_core::ports::PostsApi;

/// In-memory posts backend keeping posts in submission order.
pub struct InMemoryPostsApi {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostsApi {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// A backend seeded with a few sample posts from three authors.
    pub fn demo() -> Self {
        let now = Utc::now();
        let sample = |id: &str, user: &str, minutes_ago: i64, title: &str, content: &str| Post {
            id: PostId::from(id),
            title: title.to_string(),
            content: content.to_string(),
            user: UserId::from(user),
            date: now - Duration::minutes(minutes_ago),
            reactions: Reactions::default(),
        };

        Self::with_posts(vec![
            sample("1", "0", 10, "First Post!", "Hello!"),
            sample("2", "2", 5, "Second Post", "More text"),
            sample(
                "3",
                "1",
                1,
                "Stores and selectors",
                "Normalized state keeps one copy of every post, keyed by id.",
            ),
        ])
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryPostsApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostsApi for InMemoryPostsApi {
    async fn fetch_all(&self) -> Result<Vec<Post>, FetchError> {
        let posts = self.posts.read().await;
        tracing::debug!(count = posts.len(), "Serving posts from memory");
        Ok(posts.clone())
    }

    async fn fetch_one(&self, id: &PostId) -> Result<Post, FetchError> {
        let posts = self.posts.read().await;
        posts
            .iter()
            .find(|post| &post.id == id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.clone()))
    }

    async fn create(&self, post: &Post) -> Result<Post, FetchError> {
        let mut posts = self.posts.write().await;

        match posts.iter_mut().find(|existing| existing.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.push(post.clone()),
        }

        tracing::debug!(post_id = %post.id, "Post stored in memory");
        Ok(post.clone())
    }
}
