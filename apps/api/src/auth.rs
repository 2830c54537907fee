//! Login, logout, and current-identity handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use rosterly_application::AuthOutcome;
use rosterly_core::AppError;
use tracing::info;

use crate::cookie;
use crate::dto::{GenericMessageResponse, IdentityResponse, LoginRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /auth/login - Verify credentials, issue a token, set the cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Response> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("email and password are required".to_owned()).into());
    }

    let outcome = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;

    // One generic rejection for unknown email and wrong password alike, and
    // no cookie leaves the server on failure.
    let AuthOutcome::Authenticated(user) = outcome else {
        return Err(AppError::Unauthorized("invalid email or password".to_owned()).into());
    };

    let token = state.auth_service.issue_token(&user)?;
    let auth_cookie = cookie::build_auth_cookie(&token, state.cookie_secure)?;

    info!(user_id = %user.id, "login succeeded");

    let body = Json(IdentityResponse::from(user.identity()));
    Ok(([(header::SET_COOKIE, auth_cookie)], body).into_response())
}

/// POST /auth/logout - Clear the auth cookie.
///
/// Stateless by design: there is no server-side session to revoke, so the
/// local cookie removal is the whole operation and always succeeds.
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let token = cookie::token_from_headers(&headers);
    if let Some(identity) = state.auth_service.try_resolve_identity(token.as_deref()).await {
        info!(user_id = %identity.id, "user logged out");
    }

    let clear_cookie = cookie::build_clear_cookie(state.cookie_secure)?;
    let body = Json(GenericMessageResponse {
        message: "logged out successfully".to_owned(),
    });

    Ok(([(header::SET_COOKIE, clear_cookie)], body).into_response())
}

/// GET /auth/me - Resolve and return the caller's current identity.
pub async fn me_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<IdentityResponse>> {
    let token = cookie::token_from_headers(&headers);
    let identity = state.auth_service.resolve_identity(token.as_deref()).await?;

    Ok(Json(IdentityResponse::from(identity)))
}
