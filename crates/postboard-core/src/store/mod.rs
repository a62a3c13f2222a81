//! Client-side state: normalized entities and request trackers.

mod entity;
mod posts;
mod request;

pub use entity::{Entity, EntityStore};
pub use posts::{PostsAction, PostsState};
pub use request::{RequestStatus, RequestTracker};
