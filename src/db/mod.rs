//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to create the shared SQLx pool and bring the
//! schema current before the gateway accepts traffic. The store holds job
//! applications and the internship catalog; chat messages never land here
//! (they belong to the forwarding service).

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connect the `PostgreSQL` pool and run embedded migrations. Pool sizing
/// comes from [`crate::config::GatewayConfig`].
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
