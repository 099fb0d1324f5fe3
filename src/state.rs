//! Shared application state for all routes.

use crate::service::BookStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(books: impl BookStore + 'static) -> Self {
        AppState {
            books: Arc::new(books),
        }
    }
}
