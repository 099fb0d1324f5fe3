//! Bookstore server: reads config from the environment, ensures the database and
//! `books` table exist, then serves the book routes.

use bookstore_api::{app, apply_migrations, connect, ensure_database_exists, AppState, Config, PgBookStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookstore_api=info,bookstore=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(config = ?config, "starting");

    if config.create_database {
        ensure_database_exists(&config.connect_options).await?;
    }
    let pool = connect(&config).await?;
    apply_migrations(&pool).await?;

    let state = AppState::new(PgBookStore::new(pool));
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
