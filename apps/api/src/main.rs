//! Rosterly API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod auth;
mod cookie;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::{Extension, Router};
use rosterly_application::{AuthService, ShiftService, UserService};
use rosterly_core::AppError;
use rosterly_domain::Role;
use rosterly_infrastructure::{
    Argon2PasswordHasher, JwtTokenCodec, PostgresShiftRepository, PostgresUserRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api_config::{ApiCommand, ApiConfig};
use crate::middleware::RequiredRole;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.command == ApiCommand::Migrate {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let shift_repository = Arc::new(PostgresShiftRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let token_codec = Arc::new(JwtTokenCodec::new(&config.auth_token_secret));

    let user_service = UserService::new(user_repository.clone(), password_hasher);
    let shift_service = ShiftService::new(shift_repository, user_repository.clone());
    let auth_service = AuthService::new(user_repository, token_codec);

    let app_state = AppState {
        auth_service,
        user_service,
        shift_service,
        postgres_pool: pool,
        frontend_url: config.frontend_url.clone(),
        cookie_secure: config.cookie_secure,
    };

    if config.command == ApiCommand::Seed {
        dev_seed::run(&app_state).await?;
        return Ok(());
    }

    let api_routes = Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/shifts",
            get(handlers::shifts::list_shifts_handler)
                .post(handlers::shifts::create_shift_handler),
        )
        .route(
            "/api/shifts/{shift_id}",
            get(handlers::shifts::get_shift_handler)
                .put(handlers::shifts::update_shift_handler)
                .delete(handlers::shifts::delete_shift_handler),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::delete_user_handler),
        );

    let login_page = Router::new()
        .route("/login", get(handlers::pages::login_page_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::guest_only,
        ));

    let admin_page = Router::new()
        .route("/admin", get(handlers::pages::admin_page_handler))
        .route_layer(from_fn(middleware::require_role))
        .route_layer(Extension(RequiredRole(Role::Admin)))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let employee_page = Router::new()
        .route("/employee", get(handlers::pages::employee_page_handler))
        .route_layer(from_fn(middleware::require_role))
        .route_layer(Extension(RequiredRole(Role::Employee)))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&config.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(api_routes)
        .merge(login_page)
        .merge(admin_page)
        .merge(employee_page)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "rosterly-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
