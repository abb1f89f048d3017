use reqwest::Method;

use super::error::{ApiError, Result};
use super::ApiClient;
use crate::models::{normalize_tags, NewPost, Post, PostUpdate, Tag, TagSuggestion};

/// Suggestions returned when the caller does not ask for a specific count
const DEFAULT_AUTOCOMPLETE_LIMIT: u32 = 5;

impl ApiClient {
    // ===== Posts =====

    /// List posts, newest first as ordered by the backend
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.fetch_list(self.request(Method::GET, "/posts")).await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post> {
        self.fetch(self.request_at(Method::GET, &["posts", id])?).await
    }

    /// Create a post. Tags are normalized before sending.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        post.validate().map_err(ApiError::InvalidRequest)?;
        let mut post = post.clone();
        post.tags = normalize_tags(&post.tags);
        self.send_json(Method::POST, "/posts", &post).await
    }

    /// Update a post. Only the author may do this; `tags`, when set,
    /// replaces the post's tags.
    pub async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Post> {
        if update.is_empty() {
            return Err(ApiError::InvalidRequest("Nothing to update".to_string()));
        }
        update.validate().map_err(ApiError::InvalidRequest)?;
        self.fetch(self.request_at(Method::PATCH, &["posts", id])?.json(update))
            .await
    }

    /// Delete a post. Only the author may do this.
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.send(self.request_at(Method::DELETE, &["posts", id])?)
            .await
    }

    /// Keyword search over posts
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidRequest("Search query must not be blank".to_string()));
        }
        self.fetch_list(
            self.request(Method::GET, "/posts/search")
                .query(&[("query", query)]),
        )
        .await
    }

    /// Posts carrying every one of `names` (AND match)
    pub async fn posts_by_tags<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Post>> {
        let names = normalize_tags(names);
        if names.is_empty() {
            return Err(ApiError::InvalidRequest("At least one tag is required".to_string()));
        }
        let params: Vec<(&str, &str)> = names.iter().map(|n| ("names", n.as_str())).collect();
        self.fetch_list(self.request(Method::GET, "/posts/by-tags").query(&params))
            .await
    }

    // ===== Post tags =====

    pub async fn post_tags(&self, post_id: &str) -> Result<Vec<Tag>> {
        self.fetch_list(self.request_at(Method::GET, &["posts", post_id, "tags"])?)
            .await
    }

    /// Add several tags; ones the post already has are ignored by the backend
    pub async fn add_post_tags<S: AsRef<str>>(&self, post_id: &str, tags: &[S]) -> Result<()> {
        let tags = non_empty_tags(tags)?;
        self.send(
            self.request_at(Method::POST, &["posts", post_id, "tags"])?
                .json(&serde_json::json!({ "tags": tags })),
        )
        .await
    }

    pub async fn add_post_tag(&self, post_id: &str, name: &str) -> Result<()> {
        let mut tags = non_empty_tags(&[name])?;
        let name = tags.remove(0);
        self.send(
            self.request_at(Method::POST, &["posts", post_id, "tags", "one"])?
                .json(&serde_json::json!({ "name": name })),
        )
        .await
    }

    pub async fn remove_post_tag(&self, post_id: &str, tag_id: &str) -> Result<()> {
        self.send(self.request_at(Method::DELETE, &["posts", post_id, "tags", tag_id])?)
            .await
    }

    /// Replace all of the post's tags. An empty list removes them all.
    pub async fn replace_post_tags<S: AsRef<str>>(&self, post_id: &str, tags: &[S]) -> Result<()> {
        let tags = normalize_tags(tags);
        self.send(
            self.request_at(Method::PUT, &["posts", post_id, "tags"])?
                .json(&serde_json::json!({ "tags": tags })),
        )
        .await
    }

    // ===== Tags =====

    /// Tags starting with `keyword`, most used first
    pub async fn autocomplete_tags(
        &self,
        keyword: &str,
        limit: Option<u32>,
    ) -> Result<Vec<TagSuggestion>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let limit = limit.unwrap_or(DEFAULT_AUTOCOMPLETE_LIMIT).to_string();
        self.fetch_list(
            self.request(Method::GET, "/tags/autocomplete")
                .query(&[("keyword", keyword), ("limit", limit.as_str())]),
        )
        .await
    }
}

fn non_empty_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>> {
    let tags = normalize_tags(tags);
    if tags.is_empty() {
        Err(ApiError::InvalidRequest("At least one tag is required".to_string()))
    } else {
        Ok(tags)
    }
}
