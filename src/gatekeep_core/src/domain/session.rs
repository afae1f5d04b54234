use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::account::Account;

/// Opaque bearer credential returned by a successful login.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self(Secret::from(token))
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(account: &Account, issued_at: DateTime<Utc>, time_to_live: Duration) -> Self {
        Self {
            sub: account.id().to_string(),
            email: account.email().as_ref().expose_secret().clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + time_to_live).timestamp(),
        }
    }
}
