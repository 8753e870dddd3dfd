mod admin;
mod appointment;
mod auth;
mod config;
mod database;
mod models;
mod protocol;
mod scheduling;
mod schema;
mod user;
mod utils;

#[cfg(test)]
mod test_utils;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, SqliteConnection};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::AppConfig, protocol::ApiError};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Shared state, JSON error handling and every route scope. Used by the
/// server and by the handler tests.
pub fn routes(pool: DbPool, config: AppConfig) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(pool))
            .app_data(web::Data::new(config))
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| ApiError::bad_request(err).into()),
            )
            // user
            .service(web::scope("/user").configure(user::config))
            // scheduling slots
            .service(web::scope("/appointmentscheduling").configure(scheduling::config))
            // appointments
            .service(web::scope("/appointment").configure(appointment::config))
            // staff
            .service(web::scope("/admin").configure(admin::config));
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,actix_web=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let pool = database::build_pool(&config.database_url, config.max_connections)?;

    if let Some((email, password)) = config.admin_credentials() {
        if admin::utils::ensure_superuser(&pool, email, password)? {
            info!("created superuser {}", email);
        }
    }

    let bind = config.bind_addr.clone();
    info!("listening on {}", bind);
    info!("  database: {}", config.database_url);
    info!(
        "  token ttl: {}",
        config
            .token_ttl_secs
            .map_or("never expires".to_string(), |secs| format!("{}s", secs))
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(routes(pool.clone(), config.clone()))
    })
    .bind(&bind)
    .with_context(|| format!("Failed to bind {}", bind))?
    .run()
    .await
    .context("Server error")
}
