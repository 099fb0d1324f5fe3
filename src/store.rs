//! Connection pool setup and database bootstrap.

use crate::config::Config;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

/// Maintenance database used to create the target one.
const ADMIN_DATABASE: &str = "postgres";

/// Open the pool described by `config`.
pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options.clone())
        .await?;
    Ok(pool)
}

/// Name of the database to create, or `None` when there is nothing to create: no database
/// named (the server falls back to the user's name) or the maintenance database itself.
fn database_to_create(opts: &PgConnectOptions) -> Option<&str> {
    opts.get_database()
        .map(str::trim)
        .filter(|db| !db.is_empty() && *db != ADMIN_DATABASE)
}

/// Create the target database if missing, connecting through the `postgres` maintenance database.
pub async fn ensure_database_exists(opts: &PgConnectOptions) -> Result<(), AppError> {
    let Some(db_name) = database_to_create(opts) else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = opts.clone().database(ADMIN_DATABASE).connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
