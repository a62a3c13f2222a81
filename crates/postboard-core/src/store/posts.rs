//! The posts slice: post entities plus one request tracker per call kind.

use std::cmp::Ordering;

use crate::domain::{Post, PostId, PostPatch, ReactionKind};

use super::entity::{Entity, EntityStore};
use super::request::RequestTracker;

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> &PostId {
        &self.id
    }

    /// Newest first.
    fn sort_cmp(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date)
    }

    fn merge(&mut self, incoming: Self) {
        // The publication date is the sort key and never moves.
        let date = self.date;
        *self = incoming;
        self.date = date;
    }
}

impl EntityStore<Post> {
    /// Shallow-merge `patch` into the post. Unknown ids are ignored.
    pub fn update_fields(&self, id: &PostId, patch: PostPatch) -> Self {
        if patch.is_empty() {
            return self.clone();
        }
        self.update(id, |post| patch.apply_to(post))
    }

    /// Add one to a reaction counter. Unknown ids are ignored.
    pub fn increment_counter(&self, id: &PostId, kind: ReactionKind) -> Self {
        self.update(id, |post| post.reactions.increment(kind))
    }
}

/// Everything that can change the posts slice.
#[derive(Debug, Clone, PartialEq)]
pub enum PostsAction {
    FetchPending,
    FetchFulfilled(Vec<Post>),
    FetchRejected(String),
    DetailPending,
    DetailFulfilled(Post),
    DetailRejected(String),
    AddPending,
    AddFulfilled(Post),
    AddRejected(String),
    PostUpdated { id: PostId, patch: PostPatch },
    ReactionAdded { id: PostId, reaction: ReactionKind },
}

/// Snapshot of the posts slice. Cloning is cheap; every update returns a
/// new snapshot and leaves the old one intact.
#[derive(Debug, Clone, Default)]
pub struct PostsState {
    pub posts: EntityStore<Post>,
    /// Tracker for the list fetch.
    pub fetch: RequestTracker,
    /// Tracker for single-post fetches.
    pub detail: RequestTracker,
    /// Tracker for new-post submissions.
    pub add: RequestTracker,
}

impl PostsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&self, action: PostsAction) -> Self {
        let mut next = self.clone();
        match action {
            PostsAction::FetchPending => next.fetch = self.fetch.on_start(),
            PostsAction::FetchFulfilled(posts) => {
                next.fetch = self.fetch.on_success();
                next.posts = self.posts.upsert_many(posts);
            }
            PostsAction::FetchRejected(message) => next.fetch = self.fetch.on_failure(message),
            PostsAction::DetailPending => next.detail = self.detail.on_start(),
            PostsAction::DetailFulfilled(post) => {
                next.detail = self.detail.on_success();
                next.posts = self.posts.add_one(post);
            }
            PostsAction::DetailRejected(message) => next.detail = self.detail.on_failure(message),
            PostsAction::AddPending => next.add = self.add.on_start(),
            PostsAction::AddFulfilled(post) => {
                next.add = self.add.on_success();
                next.posts = self.posts.add_one(post);
            }
            PostsAction::AddRejected(message) => next.add = self.add.on_failure(message),
            PostsAction::PostUpdated { id, patch } => {
                next.posts = self.posts.update_fields(&id, patch);
            }
            PostsAction::ReactionAdded { id, reaction } => {
                next.posts = self.posts.increment_counter(&id, reaction);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::{Reactions, UserId};
    use crate::store::RequestStatus;

    fn post(id: &str, date: &str, title: &str) -> Post {
        Post {
            id: PostId::from(id),
            title: title.to_string(),
            content: format!("content of {id}"),
            user: UserId::from("0"),
            date: date.parse::<DateTime<Utc>>().unwrap(),
            reactions: Reactions::default(),
        }
    }

    fn ids(state: &PostsState) -> Vec<&str> {
        state.posts.ids().iter().map(PostId::as_str).collect()
    }

    #[test]
    fn test_upsert_many_orders_newest_first() {
        let state = PostsState::new().reduce(PostsAction::FetchFulfilled(vec![
            post("1", "2024-01-01T00:00:00Z", "one"),
            post("2", "2024-01-02T00:00:00Z", "two"),
        ]));
        assert_eq!(ids(&state), vec!["2", "1"]);
    }

    #[test]
    fn test_one_record_per_id_last_merge_wins() {
        let posts = EntityStore::new()
            .upsert_many([
                post("1", "2024-01-01T00:00:00Z", "first"),
                post("2", "2024-01-03T00:00:00Z", "two"),
            ])
            .upsert_many([post("1", "2024-01-01T00:00:00Z", "second")])
            .add_one(post("3", "2024-01-02T00:00:00Z", "three"))
            .add_one(post("1", "2024-01-01T00:00:00Z", "third"));

        assert_eq!(posts.len(), 3);
        assert_eq!(posts.get(&PostId::from("1")).unwrap().title, "third");
        let order: Vec<_> = posts.ids().iter().map(PostId::as_str).collect();
        assert_eq!(order, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        const T: &str = "2024-01-01T00:00:00Z";
        let posts = EntityStore::new()
            .upsert_many([post("a", T, "1"), post("b", T, "2"), post("a", T, "3")])
            .add_one(post("c", T, "4"));

        let order: Vec<_> = posts.ids().iter().map(PostId::as_str).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(posts.len(), 3);
        assert_eq!(posts.get(&PostId::from("a")).unwrap().title, "3");
    }

    #[test]
    fn test_merge_keeps_original_date() {
        let posts = EntityStore::new()
            .add_one(post("1", "2024-01-01T00:00:00Z", "a"))
            .add_one(post("2", "2024-01-02T00:00:00Z", "b"))
            .add_one(post("1", "2024-02-01T00:00:00Z", "a2"));

        let stored = posts.get(&PostId::from("1")).unwrap();
        assert_eq!(stored.title, "a2");
        assert_eq!(stored.date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        let order: Vec<_> = posts.ids().iter().map(PostId::as_str).collect();
        assert_eq!(order, vec!["2", "1"]);
    }

    #[test]
    fn test_increment_counter_n_times() {
        let mut posts = EntityStore::new().add_one(post("1", "2024-01-01T00:00:00Z", "a"));
        for _ in 0..5 {
            posts = posts.increment_counter(&PostId::from("1"), ReactionKind::Rocket);
        }
        let stored = posts.get(&PostId::from("1")).unwrap();
        assert_eq!(stored.reactions.rocket, 5);
        assert_eq!(stored.reactions.heart, 0);
    }

    #[test]
    fn test_increment_missing_is_noop() {
        let posts = EntityStore::new().add_one(post("1", "2024-01-01T00:00:00Z", "a"));
        let after = posts.increment_counter(&PostId::from("nope"), ReactionKind::Eyes);
        assert!(after.ptr_eq(&posts));
    }

    #[test]
    fn test_update_fields_on_empty_store() {
        let state = PostsState::new();
        let next = state.reduce(PostsAction::PostUpdated {
            id: PostId::from("missing"),
            patch: PostPatch::default().title("x"),
        });
        assert!(next.posts.ptr_eq(&state.posts));
        assert!(next.posts.is_empty());
    }

    #[test]
    fn test_update_fields_merges_patch() {
        let state = PostsState::new()
            .reduce(PostsAction::AddFulfilled(post("1", "2024-01-01T00:00:00Z", "a")))
            .reduce(PostsAction::PostUpdated {
                id: PostId::from("1"),
                patch: PostPatch::default().title("edited").content("new body"),
            });
        let stored = state.posts.get(&PostId::from("1")).unwrap();
        assert_eq!(stored.title, "edited");
        assert_eq!(stored.content, "new body");
    }

    #[test]
    fn test_fetch_lifecycle() {
        let state = PostsState::new().reduce(PostsAction::FetchPending);
        assert_eq!(state.fetch.status(), RequestStatus::Loading);

        let failed = state.reduce(PostsAction::FetchRejected("Network down".into()));
        assert_eq!(failed.fetch.status(), RequestStatus::Failed);
        assert_eq!(failed.fetch.error(), Some("Network down"));
        assert!(failed.posts.is_empty());

        let ok = failed
            .reduce(PostsAction::FetchPending)
            .reduce(PostsAction::FetchFulfilled(vec![post("1", "2024-01-01T00:00:00Z", "a")]));
        assert_eq!(ok.fetch.status(), RequestStatus::Succeeded);
        assert_eq!(ok.fetch.error(), None);
        assert_eq!(ok.posts.len(), 1);
    }

    #[test]
    fn test_trackers_are_independent() {
        let state = PostsState::new()
            .reduce(PostsAction::FetchPending)
            .reduce(PostsAction::AddPending)
            .reduce(PostsAction::AddRejected("bad".into()));
        assert!(state.fetch.is_loading());
        assert_eq!(state.add.error(), Some("bad"));
        assert!(state.detail.is_idle());
    }

    #[test]
    fn test_reduce_leaves_previous_snapshot_intact() {
        let before = PostsState::new().reduce(PostsAction::AddFulfilled(post(
            "1",
            "2024-01-01T00:00:00Z",
            "a",
        )));
        let after = before.reduce(PostsAction::ReactionAdded {
            id: PostId::from("1"),
            reaction: ReactionKind::Heart,
        });
        assert_eq!(before.posts.get(&PostId::from("1")).unwrap().reactions.heart, 0);
        assert_eq!(after.posts.get(&PostId::from("1")).unwrap().reactions.heart, 1);
    }
}
