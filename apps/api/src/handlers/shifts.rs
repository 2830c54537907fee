//! Shift schedule endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use rosterly_application::{NewShift, ShiftChanges, ShiftQuery, require_permission};
use rosterly_core::AppError;
use rosterly_domain::{Permission, ShiftId, UserId, can_view_shift, has_permission};

use crate::dto::{
    CreateShiftRequest, GenericMessageResponse, ShiftListQuery, ShiftResponse, UpdateShiftRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::resolve_caller;

/// GET /api/shifts - List shifts, scoped to what the caller may see.
pub async fn list_shifts_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ShiftListQuery>,
) -> ApiResult<Json<Vec<ShiftResponse>>> {
    let identity = resolve_caller(&state, &headers).await?;

    let mut shift_query = ShiftQuery {
        from: query.from,
        to: query.to,
        assignee: None,
    };

    // Callers without the broad view permission are narrowed to their own
    // shifts instead of being rejected outright.
    if !has_permission(&identity, Permission::ShiftViewAll) {
        require_permission(&identity, Permission::ShiftViewOwn)?;
        shift_query.assignee = Some(identity.id);
    }

    let shifts = state.shift_service.list_shifts(&shift_query).await?;
    Ok(Json(shifts.into_iter().map(ShiftResponse::from).collect()))
}

/// POST /api/shifts - Create a shift.
pub async fn create_shift_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateShiftRequest>,
) -> ApiResult<Json<ShiftResponse>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::ShiftCreate)?;

    let created = state
        .shift_service
        .create_shift(NewShift {
            name: payload.name,
            start_time: payload.start_time,
            end_time: payload.end_time,
            user_id: UserId::new(payload.user_id),
        })
        .await?;

    Ok(Json(created.into()))
}

/// GET /api/shifts/{id} - Fetch one shift under the ownership policy.
pub async fn get_shift_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(shift_id): Path<i64>,
) -> ApiResult<Json<ShiftResponse>> {
    let identity = resolve_caller(&state, &headers).await?;

    let shift = state.shift_service.get_shift(ShiftId::new(shift_id)).await?;

    if !can_view_shift(&identity, shift.shift.user_id) {
        return Err(AppError::Forbidden("insufficient permissions".to_owned()).into());
    }

    Ok(Json(shift.into()))
}

/// PUT /api/shifts/{id} - Partially update a shift.
pub async fn update_shift_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(shift_id): Path<i64>,
    Json(payload): Json<UpdateShiftRequest>,
) -> ApiResult<Json<ShiftResponse>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::ShiftUpdate)?;

    let updated = state
        .shift_service
        .update_shift(
            ShiftId::new(shift_id),
            ShiftChanges {
                name: payload.name,
                start_time: payload.start_time,
                end_time: payload.end_time,
                user_id: payload.user_id.map(UserId::new),
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/shifts/{id} - Delete a shift.
pub async fn delete_shift_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(shift_id): Path<i64>,
) -> ApiResult<Json<GenericMessageResponse>> {
    let identity = resolve_caller(&state, &headers).await?;
    require_permission(&identity, Permission::ShiftDelete)?;

    state.shift_service.delete_shift(ShiftId::new(shift_id)).await?;

    Ok(Json(GenericMessageResponse {
        message: "shift deleted successfully".to_owned(),
    }))
}
