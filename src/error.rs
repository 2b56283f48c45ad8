use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("{message}")]
    NotFound {
        message: String,
        /// Normalized name that was attempted, when the lookup was country-scoped
        country: Option<String>,
    },

    #[error("{0}")]
    InputMissing(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GuideError>;

impl GuideError {
    pub fn not_found(message: impl Into<String>) -> Self {
        GuideError::NotFound {
            message: message.into(),
            country: None,
        }
    }

    pub fn country_not_found(message: impl Into<String>, country: impl Into<String>) -> Self {
        GuideError::NotFound {
            message: message.into(),
            country: Some(country.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GuideError::NotFound { .. } => StatusCode::NOT_FOUND,
            GuideError::InputMissing(_) | GuideError::Validation(_) => StatusCode::BAD_REQUEST,
            GuideError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GuideError::Forbidden(_) => StatusCode::FORBIDDEN,
            GuideError::Conflict(_) => StatusCode::CONFLICT,
            GuideError::Storage(_)
            | GuideError::Json(_)
            | GuideError::Toml(_)
            | GuideError::Io(_)
            | GuideError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GuideError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            GuideError::NotFound {
                message,
                country: Some(country),
            } => json!({ "success": false, "message": message, "country": country }),
            _ if status.is_server_error() => {
                error!("Request failed: {}", self);
                json!({ "success": false, "message": "Server Error", "error": self.to_string() })
            }
            _ => json!({ "success": false, "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
