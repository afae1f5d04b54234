use chrono::{DateTime, SubsecRound, Utc};
use gatekeep_core::{
    Account, AccountId, AccountRepository, AccountUpdate, Email, LockState, LockoutPolicy, Password,
    PasswordHasher, SessionToken, TokenIssuer,
};

use crate::error::AuthError;

/// Login use case - verifies credentials, tracks failures and issues a session token
pub struct LoginUseCase<'a, R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    repository: &'a R,
    hasher: &'a H,
    token_issuer: &'a T,
    lockout_policy: &'a LockoutPolicy,
}

impl<'a, R, H, T> LoginUseCase<'a, R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(
        repository: &'a R,
        hasher: &'a H,
        token_issuer: &'a T,
        lockout_policy: &'a LockoutPolicy,
    ) -> Self {
        Self {
            repository,
            hasher,
            token_issuer,
            lockout_policy,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `password` - User's password
    ///
    /// # Returns
    /// A session token, or `InvalidCredentials` (unknown email or wrong
    /// password, indistinguishable on purpose) / `AccountLocked`.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<SessionToken, AuthError> {
        let Some(mut account) = self.repository.find_by_email(&email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        // Storage keeps microseconds; lock timestamps must compare equal after a round trip.
        let now = Utc::now().trunc_subsecs(6);

        match self.lockout_policy.lock_state(&account, now) {
            LockState::Unlocked => {}
            LockState::Locked => {
                tracing::debug!(account_id = %account.id(), "Login attempt on locked account");
                return Err(AuthError::AccountLocked);
            }
            LockState::Expired => {
                account = self.clear_expired_lock(&account, now).await?;
            }
        }

        if !self.hasher.verify(&password, account.password_digest()).await? {
            self.record_failure(account.id(), now).await?;
            return Err(AuthError::InvalidCredentials);
        }

        let account = self
            .repository
            .update_by_id(account.id(), AccountUpdate::new().failed_login_attempts(0))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.token_issuer.sign(&account)?;

        tracing::info!(account_id = %account.id(), "Login succeeded");

        Ok(token)
    }

    /// Clear the lock that was read, unless a concurrent attempt already
    /// changed it. Failures recorded since are kept.
    async fn clear_expired_lock(
        &self,
        account: &Account,
        now: DateTime<Utc>,
    ) -> Result<Account, AuthError> {
        let Some(observed_locked_at) = account.locked_at() else {
            return Ok(account.clone());
        };

        let current = self
            .repository
            .clear_expired_lock(account.id(), observed_locked_at)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        match self.lockout_policy.lock_state(&current, now) {
            LockState::Unlocked => {
                tracing::info!(account_id = %current.id(), "Expired account lock released");
                Ok(current)
            }
            LockState::Locked | LockState::Expired => {
                tracing::debug!(account_id = %current.id(), "Account locked again concurrently");
                Err(AuthError::AccountLocked)
            }
        }
    }

    async fn record_failure(&self, id: &AccountId, now: DateTime<Utc>) -> Result<(), AuthError> {
        let threshold = self.lockout_policy.max_failed_attempts();
        let updated = self
            .repository
            .record_failed_login(id, threshold, now)
            .await?;

        if let Some(account) = updated {
            if locked_by_this_attempt(&account, now) {
                tracing::warn!(
                    account_id = %account.id(),
                    failed_login_attempts = account.failed_login_attempts(),
                    "Account locked after repeated failed logins"
                );
            }
        }

        Ok(())
    }
}

fn locked_by_this_attempt(account: &Account, now: DateTime<Utc>) -> bool {
    account.locked_at() == Some(now)
}
