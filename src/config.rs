use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// `None` keeps tokens valid until logout.
    pub token_ttl_secs: Option<i64>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "appointments.db".to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            max_connections: 8,
            token_ttl_secs: None,
            admin_email: None,
            admin_password: None,
        }
    }
}

impl AppConfig {
    /// Expects `.env` to be loaded already.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| {
                warn!("DATABASE_URL not set, using {}", defaults.database_url);
                defaults.database_url.clone()
            }),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &i64| *secs > 0),
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        };

        if config.admin_email.is_some() != config.admin_password.is_some() {
            warn!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together, skipping superuser bootstrap");
        }

        config
    }

    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_email, &self.admin_password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }
}
