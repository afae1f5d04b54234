use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use gatekeep_core::{Password, PasswordDigest, PasswordHasher, PasswordHasherError};
use secrecy::{ExposeSecret, Secret};

use crate::config::Argon2Setting;

/// Argon2id password hashing on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(setting: &Argon2Setting) -> Result<Self, PasswordHasherError> {
        let params = Params::new(
            setting.memory_kib,
            setting.iterations,
            setting.parallelism,
            None,
        )
        .map_err(|e| PasswordHasherError(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHasherError> {
        let current_span: tracing::Span = tracing::Span::current();
        let params = self.params.clone();
        let password = password.clone();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                Self::argon2(params)
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| PasswordHasherError(e.to_string()))?;

        let digest = result.map_err(PasswordHasherError)?;
        PasswordDigest::parse(digest).map_err(|e| PasswordHasherError(e.to_string()))
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHasherError> {
        let current_span: tracing::Span = tracing::Span::current();
        let params = self.params.clone();
        let password = password.clone();
        let digest = digest.clone();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_password_hash: PasswordHash<'_> =
                    PasswordHash::new(digest.as_ref().expose_secret())
                        .map_err(|e| e.to_string())?;

                // The digest carries its own params; ours only matter for hashing.
                match Self::argon2(params).verify_password(
                    password.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                ) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(e.to_string()),
                }
            })
        })
        .await
        .map_err(|e| PasswordHasherError(e.to_string()))?;

        result.map_err(PasswordHasherError)
    }
}
