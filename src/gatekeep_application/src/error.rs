use gatekeep_core::{AccountRepositoryError, PasswordHasherError, TokenIssuerError};

/// Outcome of a failed register or login call.
///
/// The first five variants are expected domain outcomes. The rest wrap
/// collaborator failures and are passed through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
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
    #[error("Account repository error: {0}")]
    Repository(AccountRepositoryError),
    #[error("{0}")]
    Hasher(#[from] PasswordHasherError),
    #[error("Token issuer error: {0}")]
    TokenIssuer(TokenIssuerError),
}

impl From<AccountRepositoryError> for AuthError {
    fn from(error: AccountRepositoryError) -> Self {
        match error {
            AccountRepositoryError::EmailAlreadyExists => AuthError::EmailAlreadyExists,
            error => AuthError::Repository(error),
        }
    }
}

impl From<TokenIssuerError> for AuthError {
    fn from(error: TokenIssuerError) -> Self {
        match error {
            TokenIssuerError::InvalidToken => AuthError::InvalidToken,
            error => AuthError::TokenIssuer(error),
        }
    }
}
