//! Data models for bulletin board resources.
//!
//! These are remote resources decoded from the backend and displayed;
//! nothing here is cached locally.
//!
//! - `User`, `ProfileUpdate`, `LoginResponse`: identity and profile
//! - `Post`, `NewPost`, `PostUpdate`, `Category`: board posts
//! - `Comment`, `NewComment`: post comments
//! - `Tag`, `TagSuggestion`: post tags and autocomplete
//! - `ReactionState`, `ScrapStatus`: like/dislike/scrap toggles

pub mod comment;
pub mod post;
pub mod reaction;
pub mod tag;
pub mod user;

pub use comment::{Comment, NewComment};
pub use post::{Category, NewPost, Post, PostAuthor, PostUpdate};
pub use reaction::{ReactionState, ScrapStatus};
pub use tag::{normalize_tags, Tag, TagSuggestion};
pub use user::{LoginResponse, ProfileUpdate, User, UserStatus};

use serde::{Deserialize, Deserializer};

/// List responses arrive either as a bare array or as a page object
/// with the items under `content`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Items(Vec<T>),
    Page { content: Vec<T> },
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Items(items) => items,
            Listing::Page { content } => content,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
        }
    }
}

/// Ids are opaque to the client; the backend may send them as numbers.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
