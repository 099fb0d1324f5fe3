//! Book storage: one SQL statement per operation against the `books` table.

use crate::error::AppError;
use crate::model::{Book, BookUpdate, NewBook};
use async_trait::async_trait;
use sqlx::PgPool;

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ordered by title then isbn.
    async fn list_all(&self) -> Result<Vec<Book>, AppError>;

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, AppError>;

    /// Fails with `AppError::DuplicateIsbn` when the key is taken.
    async fn create(&self, book: NewBook) -> Result<Book, AppError>;

    /// Replace every field but the key. `None` when no row matches.
    async fn update(&self, isbn: &str, book: BookUpdate) -> Result<Option<Book>, AppError>;

    /// `false` when no row matches.
    async fn remove(&self, isbn: &str) -> Result<bool, AppError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        PgBookStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, AppError> {
        let sql = format!("SELECT {} FROM books ORDER BY title ASC, isbn ASC", BOOK_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, AppError> {
        let sql = format!("SELECT {} FROM books WHERE isbn = $1", BOOK_COLUMNS);
        tracing::debug!(sql = %sql, isbn = %isbn, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, book: NewBook) -> Result<Book, AppError> {
        let sql = format!(
            "INSERT INTO books ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {cols}",
            cols = BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, isbn = %book.isbn, "query");
        let isbn = book.isbn.clone();
        sqlx::query_as::<_, Book>(&sql)
            .bind(book.isbn)
            .bind(book.amazon_url)
            .bind(book.author)
            .bind(book.language)
            .bind(book.pages)
            .bind(book.publisher)
            .bind(book.title)
            .bind(book.year)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::DuplicateIsbn(isbn),
                other => AppError::Db(other),
            })
    }

    async fn update(&self, isbn: &str, book: BookUpdate) -> Result<Option<Book>, AppError> {
        let sql = format!(
            "UPDATE books SET amazon_url = $2, author = $3, language = $4, pages = $5, \
             publisher = $6, title = $7, year = $8 WHERE isbn = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, isbn = %isbn, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .bind(book.amazon_url)
            .bind(book.author)
            .bind(book.language)
            .bind(book.pages)
            .bind(book.publisher)
            .bind(book.title)
            .bind(book.year)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn remove(&self, isbn: &str) -> Result<bool, AppError> {
        let sql = "DELETE FROM books WHERE isbn = $1 RETURNING isbn";
        tracing::debug!(sql = %sql, isbn = %isbn, "query");
        let deleted: Option<(String,)> = sqlx::query_as(sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
