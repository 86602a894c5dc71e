use crate::credentials::CredentialError;
use crate::schemas::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use model::StoreError;
use thiserror::Error;
use tracing::error;

/// Failures a handler cannot recover from with a flash message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Store(_) | AppError::Database(_) => "DATABASE_ERROR",
            AppError::Session(_) => "SESSION_ERROR",
            AppError::Credential(_) => "CREDENTIAL_ERROR",
            AppError::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Details stay in the log; the client only sees the category.
        error!(code = self.code(), "Request failed: {}", self);
        let body = ErrorResponse {
            error: "Internal server error".to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
