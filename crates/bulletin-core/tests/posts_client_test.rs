//! Contract tests for posts, tags and reactions.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/posts` | `list_posts_*` |
//! | POST | `/posts` | `create_post_*` |
//! | GET/PATCH/DELETE | `/posts/{id}` | `get_post_*`, `update_post_*`, `delete_post_*` |
//! | GET | `/posts/search` | `search_posts_*` |
//! | GET | `/posts/by-tags` | `posts_by_tags_*` |
//! | GET/POST/PUT/DELETE | `/posts/{id}/tags[...]` | `post_tags_*` |
//! | GET | `/tags/autocomplete` | `autocomplete_*` |
//! | POST/GET | `/posts/{id}/like`, `/dislike`, `/scrap`, `/posts/scraps` | `reactions_*` |

mod common;

use bulletin_core::models::{Category, NewPost, PostUpdate};
use bulletin_core::ApiError;
use common::{harness, post_json, signed_in};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── GET /posts ───────────────────────────────────────────────────────

#[tokio::test]
async fn list_posts_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([post_json(1, "First"), post_json(2, "Second")])),
        )
        .mount(&server)
        .await;

    let h = harness(&server);
    let posts = h.api.list_posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "1");
    assert_eq!(posts[1].title, "Second");
    assert_eq!(posts[0].author_name(), "Alice");
}

#[tokio::test]
async fn list_posts_accepts_page_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [post_json(3, "Paged")],
            "totalElements": 1,
            "number": 0
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let posts = h.api.list_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Paged");
}

#[tokio::test]
async fn list_posts_reports_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let h = harness(&server);
    let err = h.api.list_posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { ref path, .. } if path == "/posts"));
}

// ── POST /posts ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_post_sends_normalized_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(serde_json::json!({
            "title": "Portfolio tips",
            "content": "Keep it short",
            "category": "design",
            "tags": ["ux", "portfolio"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(10, "Portfolio tips")))
        .expect(1)
        .mount(&server)
        .await;

    let h = signed_in(&server);
    let mut post = NewPost::new("Portfolio tips", "Keep it short").with_category(Category::Design);
    // Bypass the builder to check the client normalizes on its own
    post.tags = vec!["ux".into(), " ux ".into(), "".into(), "portfolio".into()];

    let created = h.api.create_post(&post).await.unwrap();
    assert_eq!(created.id, "10");
}

#[tokio::test]
async fn create_post_rejects_blank_title_locally() {
    let server = MockServer::start().await;
    let h = signed_in(&server);

    let err = h.api.create_post(&NewPost::new("   ", "body")).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── GET / PATCH / DELETE /posts/{id} ─────────────────────────────────

#[tokio::test]
async fn get_post_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(42, "Answer")))
        .mount(&server)
        .await;

    let h = harness(&server);
    let post = h.api.get_post("42").await.unwrap();
    assert_eq!(post.title, "Answer");
    assert_eq!(post.tags, vec!["rust"]);
}

#[tokio::test]
async fn update_post_patches_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/posts/42"))
        .and(body_json(serde_json::json!({"title": "Renamed", "tags": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(42, "Renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let h = signed_in(&server);
    let update = PostUpdate {
        title: Some("Renamed".to_string()),
        ..PostUpdate::default()
    }
    .with_tags(["a", "b", "a"]);
    let post = h.api.update_post("42", &update).await.unwrap();
    assert_eq!(post.title, "Renamed");
}

#[tokio::test]
async fn update_post_with_nothing_is_rejected() {
    let server = MockServer::start().await;
    let h = signed_in(&server);
    let err = h.api.update_post("42", &PostUpdate::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_post_accepts_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = signed_in(&server);
    h.api.delete_post("42").await.unwrap();
}

#[tokio::test]
async fn post_id_cannot_reach_another_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let h = signed_in(&server);
    h.api.delete_post("../me").await.unwrap();

    let err = h.api.delete_post("..").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/posts/..%2Fme");
}

// ── Search ───────────────────────────────────────────────────────────

#[tokio::test]
async fn search_posts_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/search"))
        .and(query_param("query", "interview tips"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([post_json(5, "Interview tips")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let posts = h.api.search_posts("  interview tips ").await.unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn posts_by_tags_repeats_names_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/by-tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.api.posts_by_tags(&["rust", "web", "rust"]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("names=rust&names=web"));
}

#[tokio::test]
async fn posts_by_tags_requires_a_tag() {
    let server = MockServer::start().await;
    let h = harness(&server);
    let err = h.api.posts_by_tags(&["  "]).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
}

// ── Post tags ────────────────────────────────────────────────────────

#[tokio::test]
async fn post_tags_management() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/1/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "rust"},
            {"id": 2, "name": "web"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/1/tags"))
        .and(body_json(serde_json::json!({"tags": ["async", "tokio"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/1/tags/one"))
        .and(body_json(serde_json::json!({"name": "serde"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"id": 9, "name": "serde"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/posts/1/tags"))
        .and(body_json(serde_json::json!({"tags": ["only"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/1/tags/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = signed_in(&server);
    let tags = h.api.post_tags("1").await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[1].id, "2");

    h.api.add_post_tags("1", &["async", " tokio", "async"]).await.unwrap();
    h.api.add_post_tag("1", " #serde ").await.unwrap();
    h.api.replace_post_tags("1", &["only"]).await.unwrap();
    h.api.remove_post_tag("1", "2").await.unwrap();
}

#[tokio::test]
async fn autocomplete_uses_default_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags/autocomplete"))
        .and(query_param("keyword", "ru"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "rust", "usageCount": 30},
            {"name": "ruby", "usageCount": 4}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let suggestions = h.api.autocomplete_tags("ru", None).await.unwrap();
    assert_eq!(suggestions[0].name, "rust");

    // Blank keyword never hits the backend
    assert!(h.api.autocomplete_tags(" ", Some(3)).await.unwrap().is_empty());
}

// ── Reactions ────────────────────────────────────────────────────────

#[tokio::test]
async fn reactions_toggle_and_scraps() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/3/like"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"liked": true, "likeCount": 4})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/3/dislike"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/3/scrap"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"scrapped": true})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/3/scrap"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"scrapped": true})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/scraps"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([post_json(3, "Saved")])),
        )
        .mount(&server)
        .await;

    let h = signed_in(&server);
    let liked = h.api.like_post("3").await.unwrap().unwrap();
    assert_eq!(liked.liked, Some(true));
    assert_eq!(liked.like_count, Some(4));

    assert!(h.api.dislike_post("3").await.unwrap().is_none());

    let scrapped = h.api.scrap_post("3").await.unwrap().unwrap();
    assert_eq!(scrapped.scrapped, Some(true));
    assert!(h.api.scrap_status("3").await.unwrap().scrapped);

    let scraps = h.api.my_scraps().await.unwrap();
    assert_eq!(scraps[0].title, "Saved");
}
