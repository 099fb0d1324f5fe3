//! In-memory `BookStore` for router tests.

use super::BookStore;
use crate::error::AppError;
use crate::model::{Book, BookUpdate, NewBook};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryBookStore {
    rows: Mutex<HashMap<String, Book>>,
    unavailable: bool,
}

impl MemoryBookStore {
    /// A store whose every call fails as if the database were down.
    pub fn unavailable() -> Self {
        MemoryBookStore {
            rows: Mutex::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, AppError> {
        self.check()?;
        let mut books: Vec<Book> = self.rows.lock().unwrap().values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.isbn.cmp(&b.isbn)));
        Ok(books)
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, AppError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().get(isbn).cloned())
    }

    async fn create(&self, book: NewBook) -> Result<Book, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&book.isbn) {
            return Err(AppError::DuplicateIsbn(book.isbn));
        }
        let book = book.into_book();
        rows.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    async fn update(&self, isbn: &str, book: BookUpdate) -> Result<Option<Book>, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(isbn).map(|row| {
            *row = book.into_book(isbn);
            row.clone()
        }))
    }

    async fn remove(&self, isbn: &str) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().remove(isbn).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(isbn: &str, title: &str) -> NewBook {
        NewBook {
            isbn: isbn.into(),
            amazon_url: "http://a.co/1234".into(),
            author: "Test Author".into(),
            language: "english".into(),
            pages: 100,
            publisher: "Test Publisher".into(),
            title: title.into(),
            year: 2020,
        }
    }

    fn update(title: &str) -> BookUpdate {
        BookUpdate {
            isbn: None,
            amazon_url: "http://a.co/new".into(),
            author: "Updated Author".into(),
            language: "english".into(),
            pages: 200,
            publisher: "Updated Publisher".into(),
            title: title.into(),
            year: 2023,
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_book() {
        let store = MemoryBookStore::default();
        let created = store.create(new_book("1234567890", "Test Title")).await.unwrap();
        let fetched = store.get_by_isbn("1234567890").await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn duplicate_create_keeps_one_row() {
        let store = MemoryBookStore::default();
        store.create(new_book("1", "A")).await.unwrap();
        let err = store.create(new_book("1", "B")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateIsbn(ref isbn) if isbn == "1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_isbn("1").await.unwrap().unwrap().title, "A");
    }

    #[tokio::test]
    async fn absent_isbn_signals_not_found() {
        let store = MemoryBookStore::default();
        assert_eq!(store.get_by_isbn("nope").await.unwrap(), None);
        assert_eq!(store.update("nope", update("X")).await.unwrap(), None);
        assert!(!store.remove("nope").await.unwrap());
    }

    #[tokio::test]
    async fn update_is_idempotent() {
        let store = MemoryBookStore::default();
        store.create(new_book("1", "A")).await.unwrap();
        let first = store.update("1", update("B")).await.unwrap();
        let second = store.update("1", update("B")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.get_by_isbn("1").await.unwrap(), second);
    }

    #[tokio::test]
    async fn list_is_ordered_by_title() {
        let store = MemoryBookStore::default();
        store.create(new_book("3", "Zen")).await.unwrap();
        store.create(new_book("1", "Alpha")).await.unwrap();
        store.create(new_book("2", "Alpha")).await.unwrap();
        let isbns: Vec<String> = store.list_all().await.unwrap().into_iter().map(|b| b.isbn).collect();
        assert_eq!(isbns, vec!["1", "2", "3"]);
    }
}
