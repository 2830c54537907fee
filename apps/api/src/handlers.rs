//! HTTP handlers grouped by resource.

use axum::http::HeaderMap;
use rosterly_core::AppResult;
use rosterly_domain::Identity;

use crate::cookie;
use crate::state::AppState;

pub mod health;
pub mod pages;
pub mod shifts;
pub mod users;

/// Resolves the caller's identity for an API endpoint, failing 401-style
/// when the cookie is absent, invalid, or its subject no longer exists.
pub(crate) async fn resolve_caller(state: &AppState, headers: &HeaderMap) -> AppResult<Identity> {
    let token = cookie::token_from_headers(headers);
    state.auth_service.resolve_identity(token.as_deref()).await
}
