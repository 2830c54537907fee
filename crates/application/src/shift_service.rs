//! Shift scheduling ports and application service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use rosterly_core::{AppError, AppResult, NonEmptyString};
use rosterly_domain::{Role, ShiftId, UserId, validate_shift_window};

use crate::user_service::UserRepository;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Shift record returned by repository queries.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRecord {
    /// Unique shift identifier.
    pub id: ShiftId,
    /// Shift label, e.g. "Morning Shift".
    pub name: String,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
    /// Scheduled end; always after the start.
    pub end_time: DateTime<Utc>,
    /// User the shift is assigned to.
    pub user_id: UserId,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last record update time.
    pub updated_at: DateTime<Utc>,
}

/// Projection of the user a shift is assigned to.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftAssignee {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Role assigned to the account.
    pub role: Role,
}

/// Shift joined with its assignee projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftWithAssignee {
    /// The shift record.
    pub shift: ShiftRecord,
    /// The assigned user.
    pub assignee: ShiftAssignee,
}

/// Filters applied to shift listings. Results are always ordered by start
/// time ascending.
#[derive(Debug, Clone, Default)]
pub struct ShiftQuery {
    /// Only shifts starting at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Only shifts starting at or before this instant.
    pub to: Option<DateTime<Utc>>,
    /// Only shifts assigned to this user.
    pub assignee: Option<UserId>,
}

/// Field values for a new shift record.
#[derive(Debug, Clone)]
pub struct NewShift {
    /// Shift label.
    pub name: String,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
    /// Scheduled end.
    pub end_time: DateTime<Utc>,
    /// User the shift is assigned to.
    pub user_id: UserId,
}

/// Partial update applied to an existing shift record.
#[derive(Debug, Clone, Default)]
pub struct ShiftChanges {
    /// Replacement label, if any.
    pub name: Option<String>,
    /// Replacement start, if any.
    pub start_time: Option<DateTime<Utc>>,
    /// Replacement end, if any.
    pub end_time: Option<DateTime<Utc>>,
    /// Replacement assignee, if any.
    pub user_id: Option<UserId>,
}

/// Repository port for shift persistence.
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Lists shifts matching the query, ordered by start time ascending.
    async fn list(&self, query: &ShiftQuery) -> AppResult<Vec<ShiftWithAssignee>>;

    /// Finds a shift by its unique identifier.
    async fn find_by_id(&self, shift_id: ShiftId) -> AppResult<Option<ShiftWithAssignee>>;

    /// Creates a new shift record.
    async fn create(&self, shift: &NewShift) -> AppResult<ShiftWithAssignee>;

    /// Applies a partial update. Returns `None` when the shift does not
    /// exist.
    async fn update(
        &self,
        shift_id: ShiftId,
        changes: &ShiftChanges,
    ) -> AppResult<Option<ShiftWithAssignee>>;

    /// Deletes a shift record. Returns whether a record was removed.
    async fn delete(&self, shift_id: ShiftId) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for the shift schedule.
#[derive(Clone)]
pub struct ShiftService {
    shift_repository: Arc<dyn ShiftRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl ShiftService {
    /// Creates a new shift service.
    #[must_use]
    pub fn new(
        shift_repository: Arc<dyn ShiftRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            shift_repository,
            user_repository,
        }
    }

    /// Lists shifts matching the query.
    pub async fn list_shifts(&self, query: &ShiftQuery) -> AppResult<Vec<ShiftWithAssignee>> {
        self.shift_repository.list(query).await
    }

    /// Returns a shift by ID.
    pub async fn get_shift(&self, shift_id: ShiftId) -> AppResult<ShiftWithAssignee> {
        self.shift_repository
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| AppError::NotFound("shift not found".to_owned()))
    }

    /// Creates a shift after validating its label, window, and assignee.
    pub async fn create_shift(&self, shift: NewShift) -> AppResult<ShiftWithAssignee> {
        let name = NonEmptyString::new(shift.name)?;
        validate_shift_window(shift.start_time, shift.end_time)?;
        self.ensure_assignee_exists(shift.user_id).await?;

        self.shift_repository
            .create(&NewShift {
                name: name.into(),
                start_time: shift.start_time,
                end_time: shift.end_time,
                user_id: shift.user_id,
            })
            .await
    }

    /// Applies a partial update, validating the resulting window.
    pub async fn update_shift(
        &self,
        shift_id: ShiftId,
        changes: ShiftChanges,
    ) -> AppResult<ShiftWithAssignee> {
        let existing = self.get_shift(shift_id).await?;

        let name = changes
            .name
            .map(NonEmptyString::new)
            .transpose()?
            .map(String::from);

        let start_time = changes.start_time.unwrap_or(existing.shift.start_time);
        let end_time = changes.end_time.unwrap_or(existing.shift.end_time);
        validate_shift_window(start_time, end_time)?;

        if let Some(user_id) = changes.user_id {
            self.ensure_assignee_exists(user_id).await?;
        }

        self.shift_repository
            .update(
                shift_id,
                &ShiftChanges {
                    name,
                    start_time: changes.start_time,
                    end_time: changes.end_time,
                    user_id: changes.user_id,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("shift not found".to_owned()))
    }

    /// Deletes a shift.
    pub async fn delete_shift(&self, shift_id: ShiftId) -> AppResult<()> {
        if !self.shift_repository.delete(shift_id).await? {
            return Err(AppError::NotFound("shift not found".to_owned()));
        }

        Ok(())
    }

    async fn ensure_assignee_exists(&self, user_id: UserId) -> AppResult<()> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "assigned user '{user_id}' does not exist"
            )));
        }

        Ok(())
    }
}
