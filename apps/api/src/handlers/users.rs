//! User administration endpoints.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use rosterly_application::{CreateUserParams, ShiftQuery, UpdateUserParams, require_permission};
use rosterly_core::AppError;
use rosterly_domain::{Permission, Role, UserId};

use crate::dto::{
    CreateUserRequest, GenericMessageResponse, ShiftSummaryResponse, UpdateUserRequest,
    UserDetailResponse, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::resolve_caller;

/// GET /api/users - List every user account.
pub async fn list_users_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::UserViewAll)?;

    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/users - Create a user account.
pub async fn create_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::UserCreate)?;

    let role = parse_optional_role(payload.role.as_deref())?.unwrap_or(Role::Employee);

    let created = state
        .user_service
        .create_user(CreateUserParams {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role,
        })
        .await?;

    Ok(Json(created.into()))
}

/// GET /api/users/{id} - Fetch one user together with their shifts.
pub async fn get_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserDetailResponse>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::UserViewAll)?;

    let user_id = UserId::new(user_id);
    let user = state
        .user_service
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;

    let shifts = state
        .shift_service
        .list_shifts(&ShiftQuery {
            assignee: Some(user_id),
            ..ShiftQuery::default()
        })
        .await?;

    Ok(Json(UserDetailResponse {
        user: user.into(),
        shifts: shifts.into_iter().map(ShiftSummaryResponse::from).collect(),
    }))
}

/// PUT /api/users/{id} - Partially update a user account.
pub async fn update_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::UserUpdate)?;

    let updated = state
        .user_service
        .update_user(
            UserId::new(user_id),
            UpdateUserParams {
                name: payload.name,
                email: payload.email,
                role: parse_optional_role(payload.role.as_deref())?,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/users/{id} - Delete a user account.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<GenericMessageResponse>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::UserDelete)?;

    state.user_service.delete_user(UserId::new(user_id)).await?;

    Ok(Json(GenericMessageResponse {
        message: "user deleted successfully".to_owned(),
    }))
}

fn parse_optional_role(role: Option<&str>) -> Result<Option<Role>, AppError> {
    role.map(Role::from_str).transpose()
}
