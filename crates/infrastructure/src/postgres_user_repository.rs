//! PostgreSQL-backed user repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use rosterly_application::{NewUser, UserChanges, UserRecord, UserRepository};
use rosterly_core::{AppError, AppResult};
use rosterly_domain::{Role, UserId};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(|_| {
            AppError::Internal(format!(
                "user row {} carries invalid role '{}'",
                row.id, row.role
            ))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            role,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, name, email, role, password_hash, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1) LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 1"
        ))
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by id: {error}")))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    async fn create(&self, user: &NewUser) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r"
            INSERT INTO users (name, email, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create user: {error}")))?;

        UserRecord::try_from(row)
    }

    async fn update(
        &self,
        user_id: UserId,
        changes: &UserChanges,
    ) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(user_id.as_i64())
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.role.map(|role| role.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update user: {error}")))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn delete(&self, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
