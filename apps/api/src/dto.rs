//! Request and response payloads for the HTTP API.

use chrono::{DateTime, Utc};
use rosterly_application::{ShiftWithAssignee, UserRecord};
use rosterly_domain::{Identity, Role};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity projection returned by login and `/auth/me`.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id.as_i64(),
            name: identity.name,
            email: identity.email,
            role: identity.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenericMessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// User projection with credential material stripped.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.as_i64(),
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Single-user projection including the user's assigned shifts.
#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub shifts: Vec<ShiftSummaryResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

// ---------------------------------------------------------------------------
// Shifts
// ---------------------------------------------------------------------------

/// Shift projection without the assignee join.
#[derive(Debug, Serialize)]
pub struct ShiftSummaryResponse {
    pub id: i64,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_id: i64,
}

impl From<ShiftWithAssignee> for ShiftSummaryResponse {
    fn from(value: ShiftWithAssignee) -> Self {
        Self {
            id: value.shift.id.as_i64(),
            name: value.shift.name,
            start_time: value.shift.start_time,
            end_time: value.shift.end_time,
            user_id: value.shift.user_id.as_i64(),
        }
    }
}

/// Assigned-user projection embedded in shift responses.
#[derive(Debug, Serialize)]
pub struct AssigneeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Shift projection with its assignee.
#[derive(Debug, Serialize)]
pub struct ShiftResponse {
    pub id: i64,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_id: i64,
    pub user: AssigneeResponse,
}

impl From<ShiftWithAssignee> for ShiftResponse {
    fn from(value: ShiftWithAssignee) -> Self {
        Self {
            id: value.shift.id.as_i64(),
            name: value.shift.name,
            start_time: value.shift.start_time,
            end_time: value.shift.end_time,
            user_id: value.shift.user_id.as_i64(),
            user: AssigneeResponse {
                id: value.assignee.id.as_i64(),
                name: value.assignee.name,
                email: value.assignee.email,
                role: value.assignee.role,
            },
        }
    }
}

/// Date filters accepted by the shift listing.
#[derive(Debug, Default, Deserialize)]
pub struct ShiftListQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShiftRequest {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShiftRequest {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
}
