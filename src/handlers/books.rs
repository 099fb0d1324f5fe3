//! Book CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::model::{BookUpdate, NewBook};
use crate::response::{book_created, book_ok, books_ok, message_ok};
use crate::service::{BookValidator, ValidationMode};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = state.books.list_all().await?;
    Ok(books_ok(books))
}

pub async fn read(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match state.books.get_by_isbn(&isbn).await? {
        Some(book) => Ok(book_ok(book)),
        None => Err(AppError::NotFound(isbn)),
    }
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let new_book: NewBook = BookValidator::parse(body, ValidationMode::Create)?;
    let book = state.books.create(new_book).await?;
    tracing::info!(isbn = %book.isbn, "book created");
    Ok(book_created(book))
}

pub async fn update(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let changes: BookUpdate = BookValidator::parse(body, ValidationMode::Update)?;
    if changes.isbn.as_deref().is_some_and(|body_isbn| body_isbn != isbn) {
        return Err(AppError::Validation(vec!["isbn cannot be changed".into()]));
    }
    let Some(book) = state.books.update(&isbn, changes).await? else {
        return Err(AppError::NotFound(isbn));
    };
    tracing::info!(isbn = %book.isbn, "book updated");
    Ok(book_ok(book))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.books.remove(&isbn).await? {
        return Err(AppError::NotFound(isbn));
    }
    tracing::info!(isbn = %isbn, "book deleted");
    Ok(message_ok("Book deleted"))
}
