//! OAuth redirect login flow.
//!
//! The user opens `login_url` in a browser, signs in with the provider,
//! and is redirected to the client's `/auth/callback?code=...` route. The
//! code is exchanged with the backend for an access token and user
//! record, which then populate the session.

use reqwest::Url;
use tracing::info;

use super::SessionStore;
use crate::api::{ApiClient, ApiError};
use crate::models::User;

/// Path of the provider login entry point on the backend
pub const GOOGLE_LOGIN_PATH: &str = "/auth/login/google";

/// Browser entry point that starts the OAuth redirect.
pub fn login_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), GOOGLE_LOGIN_PATH)
}

/// Pull the authorization code out of what the user pasted: either the
/// whole callback URL or the bare code.
pub fn extract_code(input: &str) -> Result<String, ApiError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ApiError::InvalidRequest("No authorization code provided".to_string()));
    }

    if input.contains("://") || input.starts_with('/') || input.starts_with('?') {
        let url = if input.contains("://") {
            Url::parse(input)
        } else {
            Url::parse("http://localhost").and_then(|base| base.join(input))
        }
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid callback URL: {}", e)))?;

        if let Some((_, error)) = url.query_pairs().find(|(k, _)| k == "error") {
            return Err(ApiError::InvalidRequest(format!("Login was not completed: {}", error)));
        }

        return url
            .query_pairs()
            .find(|(k, v)| k == "code" && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
            .ok_or_else(|| {
                ApiError::InvalidRequest("Callback URL has no authorization code".to_string())
            });
    }

    Ok(input.to_string())
}

/// Exchange the code and establish the session.
///
/// On failure the current session is left as it was and the error is
/// returned to the caller.
pub async fn complete_login(
    api: &ApiClient,
    session: &SessionStore,
    code: &str,
) -> Result<User, ApiError> {
    let code = extract_code(code)?;
    let login = api.exchange_code(&code).await?;
    info!(user_id = %login.user.id, "Signed in");
    session.set_auth(login.access_token, login.user.clone());
    Ok(login.user)
}

/// End the session locally.
pub fn logout(session: &SessionStore) {
    session.clear_auth();
    info!("Signed out");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url() {
        assert_eq!(
            login_url("http://localhost:8080/"),
            "http://localhost:8080/auth/login/google"
        );
    }

    #[test]
    fn test_extract_code_from_bare_code() {
        assert_eq!(extract_code("  4/0AbCd  ").unwrap(), "4/0AbCd");
    }

    #[test]
    fn test_extract_code_from_callback_url() {
        assert_eq!(
            extract_code("http://localhost:5173/auth/callback?code=abc123&scope=email").unwrap(),
            "abc123"
        );
        assert_eq!(extract_code("/auth/callback?code=xyz").unwrap(), "xyz");
        assert_eq!(extract_code("?code=q%2F1").unwrap(), "q/1");
    }

    #[test]
    fn test_extract_code_missing() {
        assert!(matches!(extract_code(""), Err(ApiError::InvalidRequest(_))));
        assert!(matches!(
            extract_code("http://localhost/auth/callback"),
            Err(ApiError::InvalidRequest(_))
        ));
        assert!(matches!(
            extract_code("http://localhost/auth/callback?code="),
            Err(ApiError::InvalidRequest(_))
        ));
        assert!(matches!(
            extract_code("http://localhost/auth/callback?error=access_denied"),
            Err(ApiError::InvalidRequest(_))
        ));
    }
}
