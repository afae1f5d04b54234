use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{email::Email, password_digest::PasswordDigest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered account as stored by an [`AccountRepository`](crate::AccountRepository).
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    email: Email,
    password_digest: PasswordDigest,
    failed_login_attempts: u32,
    locked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Account {
    /// A freshly registered account: no failed attempts, not locked.
    pub fn new(new_account: NewAccount) -> Self {
        Self {
            id: AccountId::new(),
            email: new_account.email,
            password_digest: new_account.password_digest,
            failed_login_attempts: 0,
            locked_at: None,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate an account from storage.
    pub fn from_parts(
        id: AccountId,
        email: Email,
        password_digest: PasswordDigest,
        failed_login_attempts: u32,
        locked_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_digest,
            failed_login_attempts,
            locked_at,
            created_at,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    pub fn failed_login_attempts(&self) -> u32 {
        self.failed_login_attempts
    }

    pub fn locked_at(&self) -> Option<DateTime<Utc>> {
        self.locked_at
    }

    pub fn is_locked(&self) -> bool {
        self.locked_at.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn apply(&mut self, update: AccountUpdate) {
        if let Some(password_digest) = update.password_digest {
            self.password_digest = password_digest;
        }
        if let Some(failed_login_attempts) = update.failed_login_attempts {
            self.failed_login_attempts = failed_login_attempts;
        }
        if let Some(locked_at) = update.locked_at {
            self.locked_at = locked_at;
        }
    }

    /// Count one more failed attempt and lock once `threshold` is reached.
    ///
    /// An existing lock timestamp is kept as is.
    pub fn record_failed_login(&mut self, threshold: u32, now: DateTime<Utc>) {
        self.failed_login_attempts = self.failed_login_attempts.saturating_add(1);
        if self.failed_login_attempts >= threshold && self.locked_at.is_none() {
            self.locked_at = Some(now);
        }
    }

    /// Unlock and reset the counter, but only while the account still carries
    /// the lock observed at `observed_locked_at`. Returns whether it was cleared.
    pub fn clear_lock(&mut self, observed_locked_at: DateTime<Utc>) -> bool {
        if self.locked_at != Some(observed_locked_at) {
            return false;
        }
        self.failed_login_attempts = 0;
        self.locked_at = None;
        true
    }

    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            email: self.email.as_ref().expose_secret().clone(),
            created_at: self.created_at,
        }
    }
}

/// Data required to create an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub password_digest: PasswordDigest,
}

impl NewAccount {
    pub fn new(email: Email, password_digest: PasswordDigest) -> Self {
        Self {
            email,
            password_digest,
        }
    }
}

/// Partial set of fields for `update_by_id`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub password_digest: Option<PasswordDigest>,
    pub failed_login_attempts: Option<u32>,
    pub locked_at: Option<Option<DateTime<Utc>>>,
}

impl AccountUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn password_digest(mut self, password_digest: PasswordDigest) -> Self {
        self.password_digest = Some(password_digest);
        self
    }

    pub fn failed_login_attempts(mut self, failed_login_attempts: u32) -> Self {
        self.failed_login_attempts = Some(failed_login_attempts);
        self
    }

    pub fn locked_at(mut self, locked_at: DateTime<Utc>) -> Self {
        self.locked_at = Some(Some(locked_at));
        self
    }

    pub fn unlocked(mut self) -> Self {
        self.locked_at = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.password_digest.is_none()
            && self.failed_login_attempts.is_none()
            && self.locked_at.is_none()
    }
}

/// Public view of an account, without the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: AccountId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
