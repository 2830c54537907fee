use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rosterly_core::AppError;
use tracing_subscriber::EnvFilter;

/// Subcommand selected on the binary's command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCommand {
    /// Run migrations, then serve HTTP traffic.
    Serve,
    /// Run migrations and exit.
    Migrate,
    /// Run migrations, seed demo data, and exit.
    Seed,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub database_url: String,
    pub frontend_url: String,
    pub auth_token_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = match env::args().nth(1).as_deref() {
            None => ApiCommand::Serve,
            Some("migrate") => ApiCommand::Migrate,
            Some("seed") => ApiCommand::Seed,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "unknown command '{other}'; expected 'migrate' or 'seed'"
                )));
            }
        };

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        // No insecure fallback: a missing or weak signing secret stops the
        // process before it can issue a single token.
        let auth_token_secret = required_env("AUTH_TOKEN_SECRET")?;
        if auth_token_secret.len() < 32 {
            return Err(AppError::Validation(
                "AUTH_TOKEN_SECRET must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("AUTH_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            command,
            database_url,
            frontend_url,
            auth_token_secret,
            api_host,
            api_port,
            cookie_secure,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
