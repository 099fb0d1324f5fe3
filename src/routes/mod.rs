//! Router assembly.

mod books;
mod common;

pub use books::book_routes;
pub use common::common_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

async fn fallback() -> AppError {
    AppError::NotFound("no such route".into())
}

/// Full application: book routes, common routes, body limit and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(book_routes(state))
        .fallback(fallback)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
