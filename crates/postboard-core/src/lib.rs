//! # Postboard Core
//!
//! The domain layer of Postboard.
//! This crate holds the post store, request tracking and derived views,
//! with zero infrastructure dependencies. Backends plug in through
//! [`ports::PostsApi`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod selectors;
pub mod session;
pub mod store;

pub use error::FetchError;
pub use session::PostsSession;
pub use store::{PostsAction, PostsState};
