use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId, AccountUpdate, NewAccount},
    email::Email,
};

// AccountRepository port trait and errors
#[derive(Debug, Error)]
pub enum AccountRepositoryError {
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailAlreadyExists, Self::EmailAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountRepositoryError>;

    /// Persist a new account. Fails with `EmailAlreadyExists` if the email is taken.
    async fn create(&self, account: NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Apply a partial update. Returns `None` if no account has this id.
    async fn update_by_id(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Increment the failed-login counter and set the lock timestamp once the
    /// counter reaches `threshold`, as one atomic update.
    async fn record_failed_login(
        &self,
        id: &AccountId,
        threshold: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Reset the counter and unlock, only if `locked_at` still equals
    /// `observed_locked_at`. Returns the account as it is after the call,
    /// whether or not it was cleared.
    async fn clear_expired_lock(
        &self,
        id: &AccountId,
        observed_locked_at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountRepositoryError>;
}
