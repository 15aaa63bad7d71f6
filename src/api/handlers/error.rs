//! HTTP mapping for handler failures.
//!
//! Bodies are `{"detail": "..."}` with fixed messages; internal causes are
//! logged, never returned.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;
use crate::accounts::CredentialError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    MissingPayload,
    InvalidUsername,
    InvalidPassword,
    DuplicateUsername,
    InvalidCredentials,
    InvalidToken,
    Internal,
}

impl ApiError {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::MissingPayload
            | Self::InvalidUsername
            | Self::InvalidPassword
            | Self::DuplicateUsername => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn detail(self) -> &'static str {
        match self {
            Self::MissingPayload => "Missing payload",
            Self::InvalidUsername => "Invalid username",
            Self::InvalidPassword => "Invalid password",
            Self::DuplicateUsername => "Username already exists",
            Self::InvalidCredentials => "Invalid credentials",
            Self::InvalidToken => "Could not validate credentials",
            Self::Internal => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            detail: self.detail().to_string(),
        });
        let mut response = (self.status(), body).into_response();
        if self == Self::InvalidToken {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        err.log();
        match err {
            CredentialError::DuplicateUsername => Self::DuplicateUsername,
            CredentialError::InvalidCredentials => Self::InvalidCredentials,
            CredentialError::InvalidUsername => Self::InvalidUsername,
            CredentialError::InvalidPassword => Self::InvalidPassword,
            CredentialError::Store(_) | CredentialError::Password(_) | CredentialError::Task(_) => {
                Self::Internal
            }
        }
    }
}
