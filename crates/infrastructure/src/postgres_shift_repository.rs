//! PostgreSQL-backed shift repository.
//!
//! Every read joins the assigned user so callers get the assignee
//! projection without a second round trip.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use rosterly_application::{
    NewShift, ShiftAssignee, ShiftChanges, ShiftQuery, ShiftRecord, ShiftRepository,
    ShiftWithAssignee,
};
use rosterly_core::{AppError, AppResult};
use rosterly_domain::{Role, ShiftId, UserId};

/// PostgreSQL implementation of the shift repository port.
#[derive(Clone)]
pub struct PostgresShiftRepository {
    pool: PgPool,
}

impl PostgresShiftRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_joined(&self, shift_id: ShiftId) -> AppResult<Option<ShiftWithAssignee>> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            "{SHIFT_SELECT} WHERE s.id = $1 LIMIT 1"
        ))
        .bind(shift_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find shift by id: {error}")))?;

        row.map(ShiftWithAssignee::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ShiftRow {
    id: i64,
    name: String,
    start_time: chrono::DateTime<chrono::Utc>,
    end_time: chrono::DateTime<chrono::Utc>,
    user_id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    assignee_name: String,
    assignee_email: String,
    assignee_role: String,
}

impl TryFrom<ShiftRow> for ShiftWithAssignee {
    type Error = AppError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.assignee_role).map_err(|_| {
            AppError::Internal(format!(
                "shift row {} carries invalid assignee role '{}'",
                row.id, row.assignee_role
            ))
        })?;

        Ok(Self {
            shift: ShiftRecord {
                id: ShiftId::new(row.id),
                name: row.name,
                start_time: row.start_time,
                end_time: row.end_time,
                user_id: UserId::new(row.user_id),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            assignee: ShiftAssignee {
                id: UserId::new(row.user_id),
                name: row.assignee_name,
                email: row.assignee_email,
                role,
            },
        })
    }
}

const SHIFT_SELECT: &str = r"
    SELECT s.id, s.name, s.start_time, s.end_time, s.user_id,
           s.created_at, s.updated_at,
           u.name AS assignee_name, u.email AS assignee_email,
           u.role AS assignee_role
    FROM shifts s
    JOIN users u ON u.id = s.user_id
";

#[async_trait]
impl ShiftRepository for PostgresShiftRepository {
    async fn list(&self, query: &ShiftQuery) -> AppResult<Vec<ShiftWithAssignee>> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            r"
            {SHIFT_SELECT}
            WHERE ($1::timestamptz IS NULL OR s.start_time >= $1)
              AND ($2::timestamptz IS NULL OR s.start_time <= $2)
              AND ($3::bigint IS NULL OR s.user_id = $3)
            ORDER BY s.start_time ASC
            "
        ))
        .bind(query.from)
        .bind(query.to)
        .bind(query.assignee.map(|assignee| assignee.as_i64()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list shifts: {error}")))?;

        rows.into_iter().map(ShiftWithAssignee::try_from).collect()
    }

    async fn find_by_id(&self, shift_id: ShiftId) -> AppResult<Option<ShiftWithAssignee>> {
        self.fetch_joined(shift_id).await
    }

    async fn create(&self, shift: &NewShift) -> AppResult<ShiftWithAssignee> {
        let shift_id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO shifts (name, start_time, end_time, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&shift.name)
        .bind(shift.start_time)
        .bind(shift.end_time)
        .bind(shift.user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create shift: {error}")))?;

        self.fetch_joined(ShiftId::new(shift_id))
            .await?
            .ok_or_else(|| {
                AppError::Internal("created shift disappeared before readback".to_owned())
            })
    }

    async fn update(
        &self,
        shift_id: ShiftId,
        changes: &ShiftChanges,
    ) -> AppResult<Option<ShiftWithAssignee>> {
        let updated = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE shifts
            SET name = COALESCE($2, name),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                user_id = COALESCE($5, user_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            ",
        )
        .bind(shift_id.as_i64())
        .bind(changes.name.as_deref())
        .bind(changes.start_time)
        .bind(changes.end_time)
        .bind(changes.user_id.map(|user_id| user_id.as_i64()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update shift: {error}")))?;

        match updated {
            Some(id) => self.fetch_joined(ShiftId::new(id)).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, shift_id: ShiftId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(shift_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete shift: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
