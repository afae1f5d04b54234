use secrecy::{ExposeSecret, Secret};

use super::user_error::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// A plaintext password that satisfies the length policy.
///
/// The value stays wrapped in [`Secret`] so it never shows up in `Debug`
/// output or tracing fields.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Exact comparison against another plaintext, used for confirmation checks.
    pub fn matches(&self, other: &Password) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let length = value.expose_secret().chars().count();

        if length < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort);
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooLong);
        }

        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
