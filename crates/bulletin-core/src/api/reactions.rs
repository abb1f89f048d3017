use reqwest::Method;

use super::error::Result;
use super::ApiClient;
use crate::models::{Post, ReactionState, ScrapStatus};

impl ApiClient {
    // ===== Post reactions =====
    //
    // Toggles: calling one twice undoes it. The backend may answer with
    // the new state or with no body, hence the Option.

    pub async fn like_post(&self, post_id: &str) -> Result<Option<ReactionState>> {
        self.toggle(&["posts", post_id, "like"]).await
    }

    pub async fn dislike_post(&self, post_id: &str) -> Result<Option<ReactionState>> {
        self.toggle(&["posts", post_id, "dislike"]).await
    }

    pub async fn scrap_post(&self, post_id: &str) -> Result<Option<ReactionState>> {
        self.toggle(&["posts", post_id, "scrap"]).await
    }

    pub async fn scrap_status(&self, post_id: &str) -> Result<ScrapStatus> {
        self.fetch(self.request_at(Method::GET, &["posts", post_id, "scrap"])?)
            .await
    }

    /// Posts the signed-in user has scrapped
    pub async fn my_scraps(&self) -> Result<Vec<Post>> {
        self.fetch_list(self.request(Method::GET, "/posts/scraps")).await
    }

    // ===== Comment reactions =====

    pub async fn like_comment(&self, comment_id: &str) -> Result<Option<ReactionState>> {
        self.toggle(&["comments", comment_id, "like"]).await
    }

    pub async fn dislike_comment(&self, comment_id: &str) -> Result<Option<ReactionState>> {
        self.toggle(&["comments", comment_id, "dislike"]).await
    }

    async fn toggle(&self, segments: &[&str]) -> Result<Option<ReactionState>> {
        self.fetch(self.request_at(Method::POST, segments)?).await
    }
}
