//! Client routes and the navigation hook used when a session ends.
//!
//! The API layer never navigates on its own. It asks an injected
//! `Navigator` to go to `Route::Login`, so front ends decide what a
//! "hard navigation" means (a browser redirect, a terminal hint, a
//! recorded target in tests).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CreatePost,
    Post(String),
    MyPage,
    Login,
    AuthCallback,
    NotFound,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CreatePost => "/create".to_string(),
            Route::Post(id) => format!("/post/{}", id),
            Route::MyPage => "/mypage".to_string(),
            Route::Login => "/login".to_string(),
            Route::AuthCallback => "/auth/callback".to_string(),
            Route::NotFound => "*".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Performs a client-side navigation.
///
/// Called synchronously from the response pipeline, so implementations
/// should return quickly and must not call back into the API client.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Navigator that only logs the target. Used when no front end is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: &Route) {
        tracing::info!(route = %route, "Navigation requested");
    }
}
