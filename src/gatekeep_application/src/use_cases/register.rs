use gatekeep_core::{AccountProfile, AccountRepository, Email, NewAccount, Password, PasswordHasher};

use crate::error::AuthError;

/// Register use case - creates an account for an unused email
pub struct RegisterUseCase<'a, R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    repository: &'a R,
    hasher: &'a H,
}

impl<'a, R, H> RegisterUseCase<'a, R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    pub fn new(repository: &'a R, hasher: &'a H) -> Self {
        Self { repository, hasher }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Validated password
    /// * `confirm_password` - Must equal `password`
    ///
    /// # Returns
    /// The new account without its digest, or `EmailAlreadyExists` /
    /// `PasswordMismatch`. Exactly one repository write on success, none on failure.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        confirm_password: Password,
    ) -> Result<AccountProfile, AuthError> {
        if !password.matches(&confirm_password) {
            return Err(AuthError::PasswordMismatch);
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::debug!("Registration rejected, email already on file");
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_digest = self.hasher.hash(&password).await?;

        // A concurrent registration surfaces as EmailAlreadyExists through From.
        let account = self
            .repository
            .create(NewAccount::new(email, password_digest))
            .await?;

        tracing::info!(account_id = %account.id(), "Account registered");

        Ok(account.profile())
    }
}
