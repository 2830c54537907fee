//! Route guards that run before page handlers.
//!
//! API endpoints report 401/403 through [`crate::error::ApiError`]; these
//! guards protect the HTML entry points and redirect instead.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use rosterly_core::AppError;
use rosterly_domain::{Identity, Role};

use crate::cookie;
use crate::error::ApiError;
use crate::state::AppState;

/// Login entry point unauthenticated visitors are sent to.
pub const LOGIN_ROUTE: &str = "/login";

/// Role a page requires, attached to its routes as an extension.
#[derive(Debug, Clone, Copy)]
pub struct RequiredRole(pub Role);

/// Returns the home route for a role.
///
/// Total over the role enumeration; the match cannot fall through, so no
/// request can reach a page without a defined destination.
#[must_use]
pub fn role_home_route(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Employee => "/employee",
    }
}

/// Resolves the caller's identity or redirects to the login page.
///
/// On success the identity is stored in request extensions for the handler
/// and any downstream guards.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = cookie::token_from_headers(request.headers());

    match state.auth_service.try_resolve_identity(token.as_deref()).await {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => Redirect::to(LOGIN_ROUTE).into_response(),
    }
}

/// Lets anonymous visitors through and sends authenticated ones home.
///
/// A token that fails resolution is treated as "not authenticated" rather
/// than an error: an expired cookie on a public page is routine. The only
/// time an authenticated visitor is not redirected is when the request
/// already targets exactly their home route.
pub async fn guest_only(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let token = cookie::token_from_headers(request.headers());
    if token.is_none() {
        return next.run(request).await;
    }

    match state.auth_service.try_resolve_identity(token.as_deref()).await {
        None => next.run(request).await,
        Some(identity) => {
            let home = role_home_route(identity.role);
            if request.uri().path() == home {
                next.run(request).await
            } else {
                Redirect::to(home).into_response()
            }
        }
    }
}

/// Redirects callers whose role does not match the route's declared role.
///
/// Assumes [`require_auth`] already ran; a missing identity here is a
/// wiring mistake, not a user error.
pub async fn require_role(request: Request, next: Next) -> Response {
    let Some(RequiredRole(required_role)) = request.extensions().get::<RequiredRole>().copied()
    else {
        return ApiError(AppError::Internal(
            "route declares no required role".to_owned(),
        ))
        .into_response();
    };

    let Some(identity) = request.extensions().get::<Identity>().cloned() else {
        return ApiError(AppError::Internal(
            "role check ran before identity resolution".to_owned(),
        ))
        .into_response();
    };

    if identity.role != required_role {
        return Redirect::to(role_home_route(identity.role)).into_response();
    }

    next.run(request).await
}
