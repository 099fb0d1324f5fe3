//! Response envelopes: `{ books }`, `{ book }`, `{ message }`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct BookBody<T> {
    pub book: T,
}

#[derive(Serialize)]
pub struct BooksBody<T> {
    pub books: Vec<T>,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

pub fn book_created<T: Serialize>(book: T) -> (StatusCode, Json<BookBody<T>>) {
    (StatusCode::CREATED, Json(BookBody { book }))
}

pub fn book_ok<T: Serialize>(book: T) -> (StatusCode, Json<BookBody<T>>) {
    (StatusCode::OK, Json(BookBody { book }))
}

pub fn books_ok<T: Serialize>(books: Vec<T>) -> (StatusCode, Json<BooksBody<T>>) {
    (StatusCode::OK, Json(BooksBody { books }))
}

pub fn message_ok(message: &'static str) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { message }))
}
