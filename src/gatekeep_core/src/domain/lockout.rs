use chrono::{DateTime, Duration, Utc};

use super::account::Account;

pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;
pub const DEFAULT_LOCK_DURATION_IN_SECONDS: i64 = 15 * 60;

/// How many consecutive failures lock an account, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    max_failed_attempts: u32,
    lock_duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
    /// The account carries a lock whose duration has elapsed.
    Expired,
}

impl LockoutPolicy {
    /// `lock_duration: None` makes locks permanent. A zero threshold is raised to one.
    pub fn new(max_failed_attempts: u32, lock_duration: Option<Duration>) -> Self {
        Self {
            max_failed_attempts: max_failed_attempts.max(1),
            lock_duration,
        }
    }

    pub fn max_failed_attempts(&self) -> u32 {
        self.max_failed_attempts
    }

    pub fn lock_duration(&self) -> Option<Duration> {
        self.lock_duration
    }

    pub fn lock_state(&self, account: &Account, now: DateTime<Utc>) -> LockState {
        let Some(locked_at) = account.locked_at() else {
            return LockState::Unlocked;
        };

        match self.lock_duration {
            Some(duration) if locked_at + duration <= now => LockState::Expired,
            _ => LockState::Locked,
        }
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_FAILED_ATTEMPTS,
            Some(Duration::seconds(DEFAULT_LOCK_DURATION_IN_SECONDS)),
        )
    }
}
