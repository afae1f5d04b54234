use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::Account,
    password::Password,
    password_digest::PasswordDigest,
    session::{SessionClaims, SessionToken},
};

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHasherError(pub String);

/// One-way salted password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHasherError>;

    /// `Ok(false)` on mismatch. A digest that cannot be parsed is an error.
    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHasherError>;
}

#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Issues and checks signed, time-bounded session tokens.
pub trait TokenIssuer: Send + Sync {
    fn sign(&self, account: &Account) -> Result<SessionToken, TokenIssuerError>;

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError>;
}
