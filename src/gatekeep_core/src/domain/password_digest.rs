use secrecy::{ExposeSecret, Secret};

use super::user_error::UserError;

/// A one-way salted password hash in PHC/modular-crypt form (`$alg$...`).
#[derive(Debug, Clone)]
pub struct PasswordDigest(Secret<String>);

impl PasswordDigest {
    pub fn parse(value: Secret<String>) -> Result<Self, UserError> {
        let raw = value.expose_secret();
        if raw.len() < 2 || !raw.starts_with('$') {
            return Err(UserError::InvalidPasswordDigest);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for PasswordDigest {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
