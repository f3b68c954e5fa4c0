//! Error types for lbk-leads
//!
//! [`LeadsError`] is what session operations fail with; [`ApiError`] maps it
//! (and request problems) onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::ExportError;

/// Session operation errors
#[derive(Debug, Error)]
pub enum LeadsError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Account already exists. Please sign in.")]
    AccountExists,

    #[error("Account not found. Please sign up.")]
    AccountNotFound,

    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,

    #[error("Lead not found: {0}")]
    LeadNotFound(u64),

    #[error("File not found: {0}")]
    FileNotFound(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// Durable store failure
    #[error("Storage error: {0}")]
    Storage(#[from] lbk_common::Error),
}

pub type LeadsResult<T> = Result<T, LeadsError>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Leads(#[from] LeadsError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Leads(err) => {
                let (status, code) = match &err {
                    LeadsError::NotSignedIn => (StatusCode::UNAUTHORIZED, "NOT_SIGNED_IN"),
                    LeadsError::IncorrectPassword => {
                        (StatusCode::UNAUTHORIZED, "INCORRECT_PASSWORD")
                    }
                    LeadsError::AccountNotFound => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
                    LeadsError::AccountExists => (StatusCode::CONFLICT, "ACCOUNT_EXISTS"),
                    LeadsError::LeadNotFound(_) => (StatusCode::NOT_FOUND, "LEAD_NOT_FOUND"),
                    LeadsError::FileNotFound(_) => (StatusCode::NOT_FOUND, "FILE_NOT_FOUND"),
                    LeadsError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
                    LeadsError::Export(ExportError::Empty) => {
                        (StatusCode::NOT_FOUND, "NO_LEADS")
                    }
                    LeadsError::Export(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR")
                    }
                    LeadsError::Storage(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                    }
                };
                (status, code, err.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, %message, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
