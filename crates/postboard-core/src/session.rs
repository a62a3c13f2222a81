//! Posts session - owns a state snapshot and drives it from backend calls.

use std::sync::Arc;

use crate::domain::{Post, PostId, PostPatch, ReactionKind, UserId};
use crate::error::FetchError;
use crate::ports::PostsApi;
use crate::selectors::{PostSelectors, select_post_by_id};
use crate::store::{PostsAction, PostsState};

/// One client's view of the posts backend.
///
/// Every async operation moves its own tracker through
/// pending → fulfilled/rejected and merges results into the store.
/// Methods take `&mut self`, so updates on one session never interleave.
pub struct PostsSession {
    api: Arc<dyn PostsApi>,
    state: PostsState,
    selectors: PostSelectors,
}

impl PostsSession {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            state: PostsState::new(),
            selectors: PostSelectors::new(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &PostsState {
        &self.state
    }

    /// Apply an action and return the new snapshot.
    pub fn dispatch(&mut self, action: PostsAction) -> &PostsState {
        self.state = self.state.reduce(action);
        &self.state
    }

    /// Load every post and merge it into the store.
    pub async fn fetch_posts(&mut self) -> Result<(), FetchError> {
        self.dispatch(PostsAction::FetchPending);
        tracing::debug!("Fetching posts");

        match self.api.fetch_all().await {
            Ok(posts) => {
                tracing::info!(count = posts.len(), "Posts fetched");
                self.dispatch(PostsAction::FetchFulfilled(posts));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Fetching posts failed");
                self.dispatch(PostsAction::FetchRejected(e.to_string()));
                Err(e)
            }
        }
    }

    /// Load one post and merge it into the store.
    pub async fn fetch_post(&mut self, id: &PostId) -> Result<Arc<Post>, FetchError> {
        self.dispatch(PostsAction::DetailPending);
        tracing::debug!(post_id = %id, "Fetching post");

        match self.api.fetch_one(id).await {
            Ok(post) => {
                let id = post.id.clone();
                self.dispatch(PostsAction::DetailFulfilled(post));
                self.stored(id)
            }
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "Fetching post failed");
                self.dispatch(PostsAction::DetailRejected(e.to_string()));
                Err(e)
            }
        }
    }

    /// Build a new post, submit it and store the server's copy.
    pub async fn add_new_post(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        user: UserId,
    ) -> Result<Arc<Post>, FetchError> {
        let draft = Post::new(title, content, user);
        self.dispatch(PostsAction::AddPending);
        tracing::debug!(post_id = %draft.id, "Submitting new post");

        match self.api.create(&draft).await {
            Ok(confirmed) => {
                tracing::info!(post_id = %confirmed.id, "Post created");
                let id = confirmed.id.clone();
                self.dispatch(PostsAction::AddFulfilled(confirmed));
                self.stored(id)
            }
            Err(e) => {
                tracing::warn!(post_id = %draft.id, error = %e, "Creating post failed");
                self.dispatch(PostsAction::AddRejected(e.to_string()));
                Err(e)
            }
        }
    }

    /// Edit a post locally. Unknown ids are ignored.
    pub fn update_post(&mut self, id: PostId, patch: PostPatch) {
        self.dispatch(PostsAction::PostUpdated { id, patch });
    }

    /// Count a reaction locally. Unknown ids are ignored.
    pub fn add_reaction(&mut self, id: PostId, reaction: ReactionKind) {
        self.dispatch(PostsAction::ReactionAdded { id, reaction });
    }

    pub fn all_posts(&mut self) -> Arc<Vec<Arc<Post>>> {
        self.selectors.select_all_posts(&self.state.posts)
    }

    pub fn posts_by_user(&mut self, user: &UserId) -> Arc<Vec<Arc<Post>>> {
        self.selectors.select_posts_by_user(&self.state.posts, user)
    }

    pub fn post(&self, id: &PostId) -> Option<Arc<Post>> {
        select_post_by_id(&self.state.posts, id).cloned()
    }

    fn stored(&self, id: PostId) -> Result<Arc<Post>, FetchError> {
        self.post(&id).ok_or(FetchError::NotFound(id))
    }
}
