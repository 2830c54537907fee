use rosterly_application::{AuthService, ShiftService, UserService};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub shift_service: ShiftService,
    pub postgres_pool: PgPool,
    pub frontend_url: String,
    pub cookie_secure: bool,
}
