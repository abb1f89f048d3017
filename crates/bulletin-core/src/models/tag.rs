use serde::{Deserialize, Serialize};

use super::id_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
}

/// Entry returned by `GET /tags/autocomplete`, most used first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSuggestion {
    pub name: String,
    #[serde(rename = "usageCount", alias = "count", default)]
    pub usage_count: Option<i64>,
}

/// Trim tag names, drop empty ones and remove duplicates, keeping the
/// first occurrence in order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().trim_start_matches('#').trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
