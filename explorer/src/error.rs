//! Error types for the explorer

use thiserror::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid block time: {0} (must be a positive number of seconds)")]
    InvalidBlockTime(f64),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

impl From<toml::de::Error> for ExplorerError {
    fn from(err: toml::de::Error) -> Self {
        ExplorerError::Config(err.to_string())
    }
}

impl From<url::ParseError> for ExplorerError {
    fn from(err: url::ParseError) -> Self {
        ExplorerError::Config(format!("invalid URL: {}", err))
    }
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ExplorerError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            ExplorerError::Cache(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cache error"),
            ExplorerError::Http(_) => (StatusCode::BAD_GATEWAY, "Upstream error"),
            ExplorerError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Serialization error"),
            ExplorerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO error"),
            ExplorerError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            ExplorerError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            ExplorerError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
            ExplorerError::InvalidBlockTime(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            ExplorerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ExplorerError::NotFound("metric supply".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ExplorerError::InvalidInput("range decade".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ExplorerError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
