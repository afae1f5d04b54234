pub mod auth_service;
pub mod telemetry;

use gatekeep_adapters::{config::PostgresSetting, persistence::MIGRATOR};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

pub use auth_service::AuthService;

/// Connect to PostgreSQL and run all pending migrations
///
/// # Returns
/// A configured PgPool ready for use
pub async fn configure_postgresql(setting: &PostgresSetting) -> Result<PgPool, sqlx::Error> {
    let pg_pool = get_postgres_pool(setting.url.expose_secret(), setting.max_connections).await?;

    MIGRATOR.run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}
