//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing database password: set DB_PASSWORD or DB_PASSWORD_FILE")]
    MissingSecret,
    #[error("cannot read secret file {path}: {source}")]
    SecretFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {source}")]
    InvalidUrl {
        #[source]
        source: sqlx::Error,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("book not found: {0}")]
    NotFound(String),
    #[error("invalid book payload")]
    Validation(Vec<String>),
    #[error("a book with isbn '{0}' already exists")]
    DuplicateIsbn(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Unreadable request bodies (bad JSON, wrong or missing content type) are payload errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![rejection.body_text()])
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::DuplicateIsbn(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::DuplicateIsbn(_) => "duplicate_isbn",
            AppError::Db(_) => "database_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, details) = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "storage failure");
                ("internal server error".to_string(), None)
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration failure");
                ("internal server error".to_string(), None)
            }
            AppError::Validation(errors) => (self.to_string(), Some(serde_json::json!(errors))),
            _ => (self.to_string(), None),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
