use thiserror::Error;

use super::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Email must not be empty")]
    EmptyEmail,
    #[error("Email is too long")]
    EmailTooLong,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
    #[error("Password must be at most {} characters", MAX_PASSWORD_LENGTH)]
    PasswordTooLong,
    #[error("Invalid password digest")]
    InvalidPasswordDigest,
}
