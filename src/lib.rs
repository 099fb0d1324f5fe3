//! Bookstore API: REST catalog of books backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Config, Environment};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Book, BookUpdate, NewBook};
pub use routes::{app, book_routes, common_routes};
pub use service::{BookStore, BookValidator, PgBookStore, ValidationMode};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
