use gatekeep_core::{
    AccountProfile, AccountRepository, Email, LockoutPolicy, Password, PasswordHasher,
    SessionClaims, SessionToken, TokenIssuer,
};

use crate::{
    error::AuthError,
    use_cases::{login::LoginUseCase, register::RegisterUseCase},
};

/// Account authentication service: registration, login and token checks.
///
/// Collaborators are passed in explicitly. Handlers share one instance behind an `Arc`.
pub struct AccountAuthService<R, H, T> {
    repository: R,
    hasher: H,
    token_issuer: T,
    lockout_policy: LockoutPolicy,
}

impl<R, H, T> AccountAuthService<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(repository: R, hasher: H, token_issuer: T, lockout_policy: LockoutPolicy) -> Self {
        Self {
            repository,
            hasher,
            token_issuer,
            lockout_policy,
        }
    }

    pub async fn register(
        &self,
        email: Email,
        password: Password,
        confirm_password: Password,
    ) -> Result<AccountProfile, AuthError> {
        RegisterUseCase::new(&self.repository, &self.hasher)
            .execute(email, password, confirm_password)
            .await
    }

    pub async fn login(&self, email: Email, password: Password) -> Result<SessionToken, AuthError> {
        LoginUseCase::new(
            &self.repository,
            &self.hasher,
            &self.token_issuer,
            &self.lockout_policy,
        )
        .execute(email, password)
        .await
    }

    #[tracing::instrument(name = "AccountAuthService::verify_token", skip_all)]
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        Ok(self.token_issuer.verify(token)?)
    }
}
