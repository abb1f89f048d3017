//! Hooks applied uniformly to every request and response of `ApiClient`.
//!
//! The default pipeline is:
//! - `BearerAuth` attaches the session's token right before dispatch
//! - `SessionExpiry` ends the session and navigates to the login route
//!   when the backend answers 401
//!
//! Call sites never repeat either behavior.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Request, StatusCode};
use tracing::warn;

use super::error::{ApiError, Result};
use crate::auth::SessionStore;
use crate::navigation::{Navigator, Route};

/// Runs on every request after it is built and before it is sent.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: &mut Request) -> Result<()>;
}

/// Runs on every received response, success or failure, before the
/// body is read. Transport errors produce no response and skip these.
pub trait ResponseInterceptor: Send + Sync {
    fn intercept(&self, response: &ResponseInfo);
}

/// What a response interceptor gets to see.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
}

/// Attaches `Authorization: Bearer <token>` when a session exists.
/// Requests without a session go out without the header.
pub struct BearerAuth {
    session: Arc<SessionStore>,
}

impl BearerAuth {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: &mut Request) -> Result<()> {
        if let Some(token) = self.session.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ApiError::InvalidRequest("Access token is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(())
    }
}

/// On 401: clear the session, then navigate to the login route.
///
/// The failure itself is still returned to the caller by the client, so
/// call sites keep running their own error handling.
pub struct SessionExpiry {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    target: Route,
}

impl SessionExpiry {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            navigator,
            target: Route::Login,
        }
    }
}

impl ResponseInterceptor for SessionExpiry {
    fn intercept(&self, response: &ResponseInfo) {
        if response.status != StatusCode::UNAUTHORIZED {
            return;
        }
        warn!(
            method = %response.method,
            path = %response.path,
            "Backend rejected credentials, ending session"
        );
        self.session.clear_auth();
        self.navigator.navigate(&self.target);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::auth::MemoryStorage;
    use crate::models::User;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Route>>);

    impl Navigator for Recorder {
        fn navigate(&self, route: &Route) {
            self.0.lock().unwrap().push(route.clone());
        }
    }

    fn session() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(Box::new(MemoryStorage::new())))
    }

    fn request() -> Request {
        Request::new(Method::GET, "http://localhost/me".parse().unwrap())
    }

    fn info(status: StatusCode) -> ResponseInfo {
        ResponseInfo {
            method: Method::POST,
            path: "/posts/1/comments".to_string(),
            status,
        }
    }

    #[test]
    fn test_bearer_auth_attaches_current_token() {
        let session = session();
        let auth = BearerAuth::new(session.clone());

        let mut req = request();
        auth.intercept(&mut req).unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());

        session.set_auth("tok123", User::new("u1", "Alice"));
        let mut req = request();
        auth.intercept(&mut req).unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer tok123");
        assert!(req.headers()[AUTHORIZATION].is_sensitive());

        session.clear_auth();
        let mut req = request();
        auth.intercept(&mut req).unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_bearer_auth_rejects_unencodable_token() {
        let session = session();
        session.set_auth("bad\ntoken", User::new("u1", "Alice"));
        let mut req = request();
        assert!(matches!(
            BearerAuth::new(session).intercept(&mut req),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_session_expiry_on_401() {
        let session = session();
        session.set_auth("tok", User::new("u1", "Alice"));
        let recorder = Arc::new(Recorder::default());
        let hook = SessionExpiry::new(session.clone(), recorder.clone());

        hook.intercept(&info(StatusCode::UNAUTHORIZED));
        assert!(!session.is_authenticated());
        assert_eq!(*recorder.0.lock().unwrap(), vec![Route::Login]);
    }

    #[test]
    fn test_session_expiry_ignores_other_statuses() {
        let session = session();
        session.set_auth("tok", User::new("u1", "Alice"));
        let recorder = Arc::new(Recorder::default());
        let hook = SessionExpiry::new(session.clone(), recorder.clone());

        for status in [
            StatusCode::OK,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            hook.intercept(&info(status));
        }
        assert!(session.is_authenticated());
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
