//! Liveness and readiness reporting.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthDependencyStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    ready: bool,
    postgres: HealthDependencyStatus,
}

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let postgres = check_postgres(&state).await;

    let ready = postgres.status == "ok";
    let (status, http_status) = if ready {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        http_status,
        Json(HealthResponse {
            status,
            ready,
            postgres,
        }),
    )
}

async fn check_postgres(state: &AppState) -> HealthDependencyStatus {
    let check = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.postgres_pool)
        .await;

    match check {
        Ok(_) => HealthDependencyStatus {
            status: "ok",
            detail: None,
        },
        Err(error) => HealthDependencyStatus {
            status: "error",
            detail: Some(format!("postgres check failed: {error}")),
        },
    }
}
