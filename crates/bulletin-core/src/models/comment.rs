use serde::{Deserialize, Serialize};

use super::post::PostAuthor;
use super::{id_string, opt_id_string};

/// Placeholder shown in place of a soft-deleted comment
const DELETED_COMMENT_TEXT: &str = "(deleted comment)";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "postId", default, deserialize_with = "opt_id_string")]
    pub post_id: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<PostAuthor>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    /// Soft-deleted comments stay in the thread with their body hidden
    #[serde(default)]
    pub deleted: bool,
    #[serde(rename = "likeCount", default)]
    pub like_count: i64,
    #[serde(rename = "dislikeCount", default)]
    pub dislike_count: i64,
}

impl Comment {
    pub fn display_body(&self) -> &str {
        if self.deleted {
            DELETED_COMMENT_TEXT
        } else {
            &self.body
        }
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.display_name.as_str())
            .unwrap_or("Anonymous")
    }
}

/// Body of `POST /posts/{id}/comments` and `PATCH /comments/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub body: String,
}

impl NewComment {
    /// Trimmed comment body; `None` when nothing but whitespace was given.
    pub fn new(body: &str) -> Option<Self> {
        let body = body.trim();
        if body.is_empty() {
            None
        } else {
            Some(Self { body: body.to_string() })
        }
    }
}
