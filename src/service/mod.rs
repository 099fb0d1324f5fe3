//! Book storage and payload validation.

mod books;
#[cfg(test)]
pub(crate) mod memory;
mod validation;
pub use books::{BookStore, PgBookStore};
pub use validation::{BookValidator, ValidationMode, MAX_YEAR, MIN_YEAR};
