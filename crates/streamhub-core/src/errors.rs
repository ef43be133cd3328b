//! Application error type with HTTP response conversion.
//!
//! Every failure path in the API surfaces as an [`AppError`] carrying a stable
//! [`ErrorKind`] and a client-facing message. Handlers return
//! `Result<_, AppError>` and axum turns the error into a JSON body:
//!
//! ```json
//! { "statusCode": 401, "error": "TOKEN_REUSE", "message": "...", "success": false }
//! ```
//!
//! Internal errors never leak their cause to the client; the cause is logged
//! instead.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Stable classification of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing or malformed input.
    Validation,
    /// Wrong password for an existing identity.
    InvalidCredentials,
    /// No token, or an invalid/expired one.
    Unauthorized,
    /// Refresh token is well-formed but no longer the stored one.
    TokenReuse,
    /// Authenticated, but the role is not allowed on this route.
    Forbidden,
    /// Referenced identity or resource does not exist.
    NotFound,
    /// Unique field already taken.
    Conflict,
    /// Store, hashing, or signing failure.
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized | Self::TokenReuse => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::TokenReuse => "TOKEN_REUSE",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn token_reuse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenReuse, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Wraps an unexpected failure. The cause is logged, never sent to clients.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            kind: ErrorKind::Internal,
            message: "Internal server error".to_string(),
            source: Some(err.into()),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {} ({:#})", self.kind, self.message, source),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Some(source) = &self.source {
            tracing::error!(error = %format!("{:#}", source), kind = %self.kind, "Internal error");
        }

        let body = Json(json!({
            "statusCode": status.as_u16(),
            "error": self.kind.code(),
            "message": self.message,
            "success": false,
        }));

        (status, body).into_response()
    }
}
