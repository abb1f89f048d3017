//! Shared fixtures for the client contract tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bulletin_core::auth::MemoryStorage;
use bulletin_core::models::User;
use bulletin_core::{ApiClient, ApiConfig, Navigator, Route, SessionStore};
use wiremock::MockServer;

/// Navigator that records every target instead of navigating
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        self.routes.lock().unwrap().push(route.clone());
    }
}

pub struct Harness {
    pub api: ApiClient,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(server: &MockServer) -> Harness {
    harness_at(&server.uri())
}

pub fn harness_at(base_url: &str) -> Harness {
    let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
    let navigator = Arc::new(RecordingNavigator::default());
    let api = ApiClient::new(&ApiConfig::new(base_url), session.clone(), navigator.clone())
        .unwrap();
    Harness {
        api,
        session,
        navigator,
    }
}

/// Harness with `tok123` / Alice already signed in
pub fn signed_in(server: &MockServer) -> Harness {
    let h = harness(server);
    h.session.set_auth("tok123", alice());
    h
}

pub fn alice() -> User {
    User::new("u1", "Alice")
}

pub fn post_json(id: u64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "content": "content",
        "tags": ["rust"],
        "author": {"id": 1, "displayName": "Alice"},
        "likeCount": 0
    })
}
