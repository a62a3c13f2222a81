use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier for a post created on this client.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Author identifier, a key into a users collection kept elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The fixed set of reactions a reader can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    ThumbsUp,
    Hooray,
    Heart,
    Rocket,
    Eyes,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 5] = [
        ReactionKind::ThumbsUp,
        ReactionKind::Hooray,
        ReactionKind::Heart,
        ReactionKind::Rocket,
        ReactionKind::Eyes,
    ];

    /// Name used on the wire and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "thumbsUp",
            ReactionKind::Hooray => "hooray",
            ReactionKind::Heart => "heart",
            ReactionKind::Rocket => "rocket",
            ReactionKind::Eyes => "eyes",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "👍",
            ReactionKind::Hooray => "🎉",
            ReactionKind::Heart => "❤️",
            ReactionKind::Rocket => "🚀",
            ReactionKind::Eyes => "👀",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown reaction '{s}'"))
    }
}

/// Reaction counters. Missing counters decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reactions {
    pub thumbs_up: u32,
    pub hooray: u32,
    pub heart: u32,
    pub rocket: u32,
    pub eyes: u32,
}

impl Reactions {
    pub fn get(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::ThumbsUp => self.thumbs_up,
            ReactionKind::Hooray => self.hooray,
            ReactionKind::Heart => self.heart,
            ReactionKind::Rocket => self.rocket,
            ReactionKind::Eyes => self.eyes,
        }
    }

    pub fn increment(&mut self, kind: ReactionKind) {
        let counter = match kind {
            ReactionKind::ThumbsUp => &mut self.thumbs_up,
            ReactionKind::Hooray => &mut self.hooray,
            ReactionKind::Heart => &mut self.heart,
            ReactionKind::Rocket => &mut self.rocket,
            ReactionKind::Eyes => &mut self.eyes,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Post entity - a blog post with its reaction counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub user: UserId,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub reactions: Reactions,
}

impl Post {
    /// Create a new post with a generated id, the current time and zeroed reactions.
    pub fn new(title: impl Into<String>, content: impl Into<String>, user: UserId) -> Self {
        Self {
            id: PostId::generate(),
            title: title.into(),
            content: content.into(),
            user,
            date: Utc::now(),
            reactions: Reactions::default(),
        }
    }

    /// At most `max_chars` characters of the content.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}

/// Partial edit of a post. Only the supplied fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    pub(crate) fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_has_zeroed_reactions() {
        let post = Post::new("Hello", "World", UserId::from("0"));
        assert_eq!(post.reactions, Reactions::default());
        assert_eq!(post.user.as_str(), "0");
        assert!(!post.id.as_str().is_empty());
    }

    #[test]
    fn test_new_posts_get_distinct_ids() {
        let a = Post::new("a", "a", UserId::from("0"));
        let b = Post::new("b", "b", UserId::from("0"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_decode_wire_post() {
        let json = r#"{
            "id": "1",
            "title": "First Post!",
            "content": "Hello!",
            "user": "0",
            "date": "2024-01-01T00:00:00.000Z",
            "reactions": {"thumbsUp": 2, "hooray": 0, "heart": 1, "rocket": 0, "eyes": 0}
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, PostId::from("1"));
        assert_eq!(post.reactions.get(ReactionKind::ThumbsUp), 2);
        assert_eq!(post.reactions.get(ReactionKind::Heart), 1);
    }

    #[test]
    fn test_missing_reactions_default_to_zero() {
        let json = r#"{"id":"1","title":"t","content":"c","user":"0","date":"2024-01-01T00:00:00Z","reactions":{"eyes":3}}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.reactions.eyes, 3);
        assert_eq!(post.reactions.rocket, 0);

        let json = r#"{"id":"1","title":"t","content":"c","user":"0","date":"2024-01-01T00:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.reactions, Reactions::default());
    }

    #[test]
    fn test_encode_uses_wire_names() {
        let mut post = Post::new("t", "c", UserId::from("2"));
        post.reactions.increment(ReactionKind::ThumbsUp);
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["user"], "2");
        assert_eq!(value["reactions"]["thumbsUp"], 1);
        assert!(value["date"].is_string());
    }

    #[test]
    fn test_reaction_kind_parses_wire_names() {
        assert_eq!("thumbsUp".parse::<ReactionKind>(), Ok(ReactionKind::ThumbsUp));
        assert_eq!("ROCKET".parse::<ReactionKind>(), Ok(ReactionKind::Rocket));
        assert!("clap".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn test_increment_saturates() {
        let mut reactions = Reactions {
            heart: u32::MAX,
            ..Reactions::default()
        };
        reactions.increment(ReactionKind::Heart);
        assert_eq!(reactions.heart, u32::MAX);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let mut post = Post::new("t", "héllo wörld", UserId::from("0"));
        assert_eq!(post.excerpt(5), "héllo");
        assert_eq!(post.excerpt(100), "héllo wörld");
        post.content.clear();
        assert_eq!(post.excerpt(3), "");
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut post = Post::new("old", "body", UserId::from("0"));
        PostPatch::default().title("new").apply_to(&mut post);
        assert_eq!(post.title, "new");
        assert_eq!(post.content, "body");
    }
}
