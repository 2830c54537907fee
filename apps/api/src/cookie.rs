//! Binds the auth token to the HTTP exchange as a cookie.
//!
//! The cookie is deliberately NOT `HttpOnly`: the browser-side identity
//! cache reads it to decide which shell to render before the first API
//! call completes. Everything security-relevant is re-verified server-side
//! on every request.

use axum::http::{HeaderMap, HeaderValue, header};
use rosterly_application::AUTH_TOKEN_TTL_SECONDS;
use rosterly_core::{AppError, AppResult};

/// Name of the cookie carrying the signed auth token.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Builds the `Set-Cookie` value that installs a freshly issued token.
///
/// Attributes: `SameSite=Lax`, `Path=/`, `Max-Age` matching the token's
/// 7-day lifetime, and `Secure` when the deployment requires HTTPS.
pub fn build_auth_cookie(token: &str, secure: bool) -> AppResult<HeaderValue> {
    let mut value = format!(
        "{AUTH_COOKIE_NAME}={token}; Max-Age={AUTH_TOKEN_TTL_SECONDS}; Path=/; SameSite=Lax"
    );
    if secure {
        value.push_str("; Secure");
    }

    HeaderValue::from_str(&value)
        .map_err(|error| AppError::Internal(format!("failed to encode auth cookie: {error}")))
}

/// Builds the `Set-Cookie` value that removes the auth cookie immediately.
pub fn build_clear_cookie(secure: bool) -> AppResult<HeaderValue> {
    let mut value = format!("{AUTH_COOKIE_NAME}=; Max-Age=0; Path=/; SameSite=Lax");
    if secure {
        value.push_str("; Secure");
    }

    HeaderValue::from_str(&value)
        .map_err(|error| AppError::Internal(format!("failed to encode clearing cookie: {error}")))
}

/// Reads the auth token out of a request's `Cookie` headers, if present.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE_NAME)
        .map(|(_, token)| token.to_owned())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::{build_auth_cookie, build_clear_cookie, token_from_headers};

    #[test]
    fn auth_cookie_carries_expected_attributes() -> rosterly_core::AppResult<()> {
        let cookie = build_auth_cookie("abc.def.ghi", false)?;
        let value = cookie.to_str().unwrap_or_default();

        assert!(value.starts_with("auth_token=abc.def.ghi;"));
        assert!(value.contains("Max-Age=604800"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("SameSite=Lax"));
        assert!(!value.contains("HttpOnly"));
        assert!(!value.contains("Secure"));
        Ok(())
    }

    #[test]
    fn secure_flag_is_added_for_production() -> rosterly_core::AppResult<()> {
        let cookie = build_auth_cookie("abc.def.ghi", true)?;
        assert!(cookie.to_str().unwrap_or_default().ends_with("; Secure"));
        Ok(())
    }

    #[test]
    fn clearing_cookie_expires_immediately() -> rosterly_core::AppResult<()> {
        let cookie = build_clear_cookie(false)?;
        let value = cookie.to_str().unwrap_or_default();

        assert!(value.starts_with("auth_token=;"));
        assert!(value.contains("Max-Age=0"));
        Ok(())
    }

    #[test]
    fn token_is_read_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; locale=en"),
        );

        assert_eq!(
            token_from_headers(&headers),
            Some("abc.def.ghi".to_owned())
        );
    }

    #[test]
    fn absent_cookie_reads_as_none() {
        let headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(token_from_headers(&headers), None);
    }
}
