//! Error taxonomy shared by the whole application
//!
//! Every core operation returns these as values; the HTTP layer converts
//! them into JSON error responses via the `IntoResponse` impl.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// All the ways an operation can be refused.
///
/// The split between `Forbidden` and `NotFound` is deliberate: mutating
/// operations report `Forbidden` when the record exists but belongs to
/// someone else, while single-record reads by a non-owner report `NotFound`
/// so that the existence of other users' links is never revealed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required field was empty or missing.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The email is already registered to another user.
    #[error("email is already registered")]
    EmailTaken,

    /// The operation needs a logged-in user and none was resolved.
    #[error("login required")]
    AuthRequired,

    /// Email/password pair did not check out.
    #[error("invalid email or password")]
    BadCredentials,

    /// The record exists but the caller does not own it.
    #[error("you are not the owner of this link")]
    Forbidden,

    /// No record for the given key (or none the caller may see).
    #[error("short link not found")]
    NotFound,

    /// Unexpected failure inside a collaborator (e.g. the password hasher).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code included in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::EmailTaken => "conflict",
            AppError::AuthRequired => "auth_required",
            AppError::BadCredentials => "bad_credentials",
            AppError::Forbidden => "forbidden",
            AppError::NotFound => "not_found",
            AppError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::AuthRequired => StatusCode::UNAUTHORIZED,
            AppError::BadCredentials => StatusCode::FORBIDDEN,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));
        (self.status(), body).into_response()
    }
}
