use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::models::{Envelope, NoPayload};

pub const VALIDATION_ERROR_CODE: &str = "1001";
pub const MALFORMED_BODY_ERROR_CODE: &str = "1002";
pub const UNAUTHORIZED_ERROR_CODE: &str = "1401";
pub const INTERNAL_ERROR_CODE: &str = "1500";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Failure kind attached to error responses so request tracking can label it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureKind(pub &'static str);

impl ApiError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => VALIDATION_ERROR_CODE,
            ApiError::MalformedBody(_) => MALFORMED_BODY_ERROR_CODE,
            ApiError::Unauthorized(_) => UNAUTHORIZED_ERROR_CODE,
            ApiError::Config(_) | ApiError::Internal(_) => INTERNAL_ERROR_CODE,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation",
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Config(_) => "config",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(Envelope::failure(
            self.error_code(),
            self.to_string(),
            NoPayload::default(),
        ));

        let mut response = (status, body).into_response();
        response.extensions_mut().insert(FailureKind(self.kind()));
        response
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
