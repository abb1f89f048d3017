//! API client for communicating with the bulletin board REST API.
//!
//! Every call goes through one pipeline: build the request, run the
//! request interceptors (credential attachment), send, run the response
//! interceptors (session expiry), then map the status to `ApiError` or
//! decode the body.

use std::sync::Arc;

use reqwest::{header, Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::error::{ApiError, Result};
use super::interceptor::{
    BearerAuth, RequestInterceptor, ResponseInfo, ResponseInterceptor, SessionExpiry,
};
use crate::auth::oauth;
use crate::auth::SessionStore;
use crate::config::ApiConfig;
use crate::models::{Listing, LoginResponse, ProfileUpdate, User};
use crate::navigation::Navigator;

#[derive(Debug, Serialize)]
struct CodeExchange<'a> {
    code: &'a str,
}

/// Authenticated client for the board backend.
/// Clone is cheap - the connection pool, session and interceptors are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    base: Url,
    session: Arc<SessionStore>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    /// Create a client with the default pipeline: bearer credentials from
    /// `session`, and session expiry that navigates through `navigator`.
    pub fn new(
        config: &ApiConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let base = Url::parse(&config.base_url).map_err(|e| {
            ApiError::InvalidRequest(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest(format!(
                "API base URL cannot hold paths: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            base,
            request_interceptors: vec![Arc::new(BearerAuth::new(Arc::clone(&session)))],
            response_interceptors: vec![Arc::new(SessionExpiry::new(
                Arc::clone(&session),
                navigator,
            ))],
            session,
        })
    }

    /// Add a request interceptor. Runs after the built-in ones.
    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Add a response interceptor. Runs after the built-in ones.
    pub fn with_response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    // ===== Request pipeline =====

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// URL under the base with one path segment per item. Each segment is
    /// percent-encoded, so an id can only ever name one segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(s.trim(), "" | "." | "..")) {
            return Err(ApiError::InvalidRequest(format!("Invalid resource id '{}'", bad)));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidRequest(format!("Invalid API base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request_at(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.request(method, self.endpoint(segments)?))
    }

    /// Send a request through the interceptors. Non-2xx statuses become errors.
    pub(crate) async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        let mut request = builder.build()?;
        for interceptor in &self.request_interceptors {
            interceptor.intercept(&mut request)?;
        }

        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "Sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!(%method, %path, status = status.as_u16(), "Received response");

        let info = ResponseInfo {
            method,
            path,
            status,
        };
        for interceptor in &self.response_interceptors {
            interceptor.intercept(&info);
        }

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Dispatch and decode a JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.dispatch(builder).await?;
        let path = response.url().path().to_string();
        let text = response.text().await?;
        decode(&path, &text)
    }

    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Vec<T>> {
        let response = self.dispatch(builder).await?;
        let path = response.url().path().to_string();
        let text = response.text().await?;
        decode_list(&path, &text)
    }

    /// Dispatch and ignore whatever body comes back.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<()> {
        self.dispatch(builder).await.map(|_| ())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(self.request(Method::GET, path)).await
    }

    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.fetch(self.request(method, path).json(body)).await
    }

    // ===== Auth =====

    /// Browser entry point of the OAuth login
    pub fn login_url(&self) -> String {
        oauth::login_url(&self.base_url)
    }

    /// Exchange an OAuth authorization code for a token and user record.
    /// Does not touch the session; see `oauth::complete_login`.
    pub async fn exchange_code(&self, code: &str) -> Result<LoginResponse> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidRequest("No authorization code provided".to_string()));
        }
        self.send_json(Method::POST, oauth::GOOGLE_LOGIN_PATH, &CodeExchange { code })
            .await
    }

    // ===== Users =====

    /// Fetch the signed-in user's profile
    pub async fn my_profile(&self) -> Result<User> {
        self.get("/me").await
    }

    /// Update the signed-in user's profile
    pub async fn update_my_profile(&self, update: &ProfileUpdate) -> Result<User> {
        if update.is_empty() {
            return Err(ApiError::InvalidRequest("Nothing to update".to_string()));
        }
        self.send_json(Method::PUT, "/me", update).await
    }
}

/// Decode a response body. An empty body decodes as JSON `null`, so
/// `Option<T>` targets accept endpoints that answer with no content.
pub(crate) fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Decode a list response that may be a bare array or a page object.
pub(crate) fn decode_list<T: DeserializeOwned>(path: &str, text: &str) -> Result<Vec<T>> {
    decode::<Listing<T>>(path, text).map(Listing::into_vec)
}
