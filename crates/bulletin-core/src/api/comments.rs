use reqwest::Method;

use super::error::{ApiError, Result};
use super::ApiClient;
use crate::models::{Comment, NewComment};

impl ApiClient {
    pub async fn post_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.fetch_list(self.request_at(Method::GET, &["posts", post_id, "comments"])?)
            .await
    }

    pub async fn get_comment(&self, id: &str) -> Result<Comment> {
        self.fetch(self.request_at(Method::GET, &["comments", id])?).await
    }

    /// Post a comment. Blank bodies are rejected without a request.
    pub async fn create_comment(&self, post_id: &str, body: &str) -> Result<Comment> {
        let comment = comment_body(body)?;
        let request = self.request_at(Method::POST, &["posts", post_id, "comments"])?;
        self.fetch(request.json(&comment)).await
    }

    /// Edit a comment. Only its author may do this.
    pub async fn update_comment(&self, id: &str, body: &str) -> Result<Comment> {
        let comment = comment_body(body)?;
        self.fetch(self.request_at(Method::PATCH, &["comments", id])?.json(&comment))
            .await
    }

    /// Delete a comment. A soft delete keeps it in the thread as deleted;
    /// `hard` removes it entirely.
    pub async fn delete_comment(&self, id: &str, hard: bool) -> Result<()> {
        self.send(
            self.request_at(Method::DELETE, &["comments", id])?
                .query(&[("hard", hard)]),
        )
        .await
    }
}

fn comment_body(body: &str) -> Result<NewComment> {
    NewComment::new(body)
        .ok_or_else(|| ApiError::InvalidRequest("Comment must not be blank".to_string()))
}
