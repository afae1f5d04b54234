use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatekeep_application::AuthError;
use gatekeep_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldErrorResponse>,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("{0}")]
    Validation(ValidationError),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("Account has been locked")]
    AccountLocked,

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl AuthApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthApiError::Validation(_) | AuthApiError::PasswordMismatch => StatusCode::BAD_REQUEST,
            AuthApiError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthApiError::InvalidCredentials | AuthApiError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthApiError::AccountLocked => StatusCode::LOCKED,
            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match self {
            AuthApiError::Validation(validation) => ErrorResponse {
                error: "Validation failed".to_owned(),
                details: validation
                    .errors
                    .into_iter()
                    .map(|e| FieldErrorResponse {
                        field: e.field.to_owned(),
                        message: e.message,
                    })
                    .collect(),
            },
            AuthApiError::UnexpectedError(e) => {
                tracing::error!(error = %e, "Unexpected error while handling auth request");
                ErrorResponse {
                    error: "Unexpected error".to_owned(),
                    details: Vec::new(),
                }
            }
            other => ErrorResponse {
                error: other.to_string(),
                details: Vec::new(),
            },
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<ValidationError> for AuthApiError {
    fn from(error: ValidationError) -> Self {
        AuthApiError::Validation(error)
    }
}

impl From<AuthError> for AuthApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::EmailAlreadyExists => AuthApiError::EmailAlreadyExists,
            AuthError::InvalidCredentials => AuthApiError::InvalidCredentials,
            AuthError::AccountLocked => AuthApiError::AccountLocked,
            AuthError::PasswordMismatch => AuthApiError::PasswordMismatch,
            AuthError::InvalidToken => AuthApiError::InvalidToken,
            AuthError::Repository(_) | AuthError::Hasher(_) | AuthError::TokenIssuer(_) => {
                AuthApiError::UnexpectedError(error.to_string())
            }
        }
    }
}
