//! Book row and typed request payloads.

use serde::{Deserialize, Serialize};

/// One row of the `books` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// POST body after validation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewBook {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// PUT body after validation: every field except the key. An `isbn` equal to the path key is tolerated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookUpdate {
    #[serde(default)]
    pub isbn: Option<String>,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl NewBook {
    pub fn into_book(self) -> Book {
        Book {
            isbn: self.isbn,
            amazon_url: self.amazon_url,
            author: self.author,
            language: self.language,
            pages: self.pages,
            publisher: self.publisher,
            title: self.title,
            year: self.year,
        }
    }
}

impl BookUpdate {
    /// Apply onto the row identified by `isbn`.
    pub fn into_book(self, isbn: &str) -> Book {
        Book {
            isbn: isbn.to_string(),
            amazon_url: self.amazon_url,
            author: self.author,
            language: self.language,
            pages: self.pages,
            publisher: self.publisher,
            title: self.title,
            year: self.year,
        }
    }
}
