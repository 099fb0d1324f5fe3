//! Schema bootstrap for the `books` table.

use crate::error::AppError;
use sqlx::PgPool;

const CREATE_BOOKS: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        isbn TEXT PRIMARY KEY,
        amazon_url TEXT NOT NULL,
        author TEXT NOT NULL,
        language TEXT NOT NULL,
        pages INTEGER NOT NULL CHECK (pages > 0),
        publisher TEXT NOT NULL,
        title TEXT NOT NULL CHECK (title <> ''),
        year INTEGER NOT NULL
    )
"#;

/// Create the `books` table if it does not exist. Safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(CREATE_BOOKS).execute(pool).await?;
    tracing::info!("books table ready");
    Ok(())
}
