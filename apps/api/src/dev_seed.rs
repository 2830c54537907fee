//! Demo data seeding for local development.

use chrono::{DateTime, Duration, Utc};
use rosterly_application::{CreateUserParams, NewShift, ShiftQuery, UserRecord};
use rosterly_core::{AppError, AppResult};
use rosterly_domain::Role;
use tracing::info;

use crate::state::AppState;

const SEED_ADMIN_NAME: &str = "Admin User";
const SEED_ADMIN_EMAIL: &str = "admin@example.com";
const SEED_ADMIN_PASSWORD: &str = "admin123";

const SEED_EMPLOYEE_NAME: &str = "Employee User";
const SEED_EMPLOYEE_EMAIL: &str = "employee@example.com";
const SEED_EMPLOYEE_PASSWORD: &str = "employee123";

/// Creates the demo accounts and sample shifts. Safe to run repeatedly.
pub async fn run(state: &AppState) -> AppResult<()> {
    let admin = ensure_seed_user(
        state,
        SEED_ADMIN_NAME,
        SEED_ADMIN_EMAIL,
        SEED_ADMIN_PASSWORD,
        Role::Admin,
    )
    .await?;
    info!(email = %admin.email, "seed admin ready");

    let employee = ensure_seed_user(
        state,
        SEED_EMPLOYEE_NAME,
        SEED_EMPLOYEE_EMAIL,
        SEED_EMPLOYEE_PASSWORD,
        Role::Employee,
    )
    .await?;
    info!(email = %employee.email, "seed employee ready");

    seed_shifts(state, &employee).await?;

    info!("seeding completed");
    Ok(())
}

async fn ensure_seed_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> AppResult<UserRecord> {
    if let Some(existing) = state.user_service.find_by_email(email).await? {
        return Ok(existing);
    }

    state
        .user_service
        .create_user(CreateUserParams {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            role,
        })
        .await
}

async fn seed_shifts(state: &AppState, employee: &UserRecord) -> AppResult<()> {
    let existing = state
        .shift_service
        .list_shifts(&ShiftQuery {
            assignee: Some(employee.id),
            ..ShiftQuery::default()
        })
        .await?;

    if !existing.is_empty() {
        info!("sample shifts already present, skipping");
        return Ok(());
    }

    let tomorrow = Utc::now() + Duration::days(1);
    let next_week = Utc::now() + Duration::days(7);

    let windows = [
        ("Morning Shift", at_hour(tomorrow, 8)?, at_hour(tomorrow, 16)?),
        ("Evening Shift", at_hour(tomorrow, 16)?, at_hour(tomorrow, 23)?),
        (
            "Night Shift",
            at_hour(next_week, 23)?,
            at_hour(next_week + Duration::days(1), 7)?,
        ),
    ];

    for (name, start_time, end_time) in windows {
        state
            .shift_service
            .create_shift(NewShift {
                name: name.to_owned(),
                start_time,
                end_time,
                user_id: employee.id,
            })
            .await?;
    }

    info!("created sample shifts");
    Ok(())
}

fn at_hour(base: DateTime<Utc>, hour: u32) -> AppResult<DateTime<Utc>> {
    base.date_naive()
        .and_hms_opt(hour, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Internal(format!("invalid seed timestamp hour {hour}")))
}
