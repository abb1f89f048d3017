use serde::{Deserialize, Serialize};

/// Reaction state after a like/dislike/scrap toggle. The backend decides
/// which fields it reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionState {
    #[serde(default)]
    pub liked: Option<bool>,
    #[serde(default)]
    pub disliked: Option<bool>,
    #[serde(default)]
    pub scrapped: Option<bool>,
    #[serde(rename = "likeCount", default)]
    pub like_count: Option<i64>,
    #[serde(rename = "dislikeCount", default)]
    pub dislike_count: Option<i64>,
}

impl ReactionState {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(liked) = self.liked {
            parts.push(if liked { "liked" } else { "not liked" }.to_string());
        }
        if let Some(disliked) = self.disliked {
            parts.push(if disliked { "disliked" } else { "not disliked" }.to_string());
        }
        if let Some(scrapped) = self.scrapped {
            parts.push(if scrapped { "scrapped" } else { "not scrapped" }.to_string());
        }
        if let Some(count) = self.like_count {
            parts.push(format!("{} likes", count));
        }
        if let Some(count) = self.dislike_count {
            parts.push(format!("{} dislikes", count));
        }
        if parts.is_empty() {
            "updated".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapStatus {
    #[serde(alias = "scraped")]
    pub scrapped: bool,
}
