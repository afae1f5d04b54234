// Hand-written port doubles shared by the use case and service tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use chrono::{DateTime, Utc};
use gatekeep_core::{
    Account, AccountId, AccountRepository, AccountRepositoryError, AccountUpdate, Email,
    NewAccount, Password, PasswordDigest, PasswordHasher, PasswordHasherError, SessionClaims,
    SessionToken, TokenIssuer, TokenIssuerError,
};
use secrecy::{ExposeSecret, Secret};

pub const EMAIL: &str = "admin@gmail.com";
pub const PASSWORD: &str = "123456";
pub const WRONG_EMAIL: &str = "fake@gmail.com";
pub const WRONG_PASSWORD: &str = "abcdef";

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_owned())).unwrap()
}

/// In-memory repository that counts writes and can be switched into a failing mode.
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    lookups_miss: Arc<AtomicBool>,
}

impl MockAccountRepository {
    pub fn with_account(account: Account) -> Self {
        let repository = Self::default();
        repository
            .accounts
            .lock()
            .unwrap()
            .insert(*account.id(), account);
        repository
    }

    /// Seed an account whose digest matches [`FakePasswordHasher`].
    pub fn with_registered(raw_email: &str, raw_password: &str) -> Self {
        Self::with_account(Account::new(NewAccount::new(
            email(raw_email),
            FakePasswordHasher::digest_for(raw_password),
        )))
    }

    pub fn fail_from_now_on(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// `find_by_email` reports nothing while `create` still sees every account,
    /// as when another registration commits between the two calls.
    pub fn miss_lookups(&self) {
        self.lookups_miss.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn account(&self, raw_email: &str) -> Account {
        let email = email(raw_email);
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|account| account.email() == &email)
            .cloned()
            .unwrap()
    }

    fn check(&self) -> Result<(), AccountRepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AccountRepositoryError::UnexpectedError(
                "connection reset".to_owned(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        self.check()?;
        if self.lookups_miss.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .find(|account| account.email() == email)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        self.check()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|a| a.email() == &account.email) {
            return Err(AccountRepositoryError::EmailAlreadyExists);
        }
        let account = Account::new(account);
        accounts.insert(*account.id(), account.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(account)
    }

    async fn update_by_id(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        self.check()?;
        let mut accounts = self.accounts.lock().unwrap();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(accounts.get_mut(id).map(|account| {
            account.apply(update);
            account.clone()
        }))
    }

    async fn record_failed_login(
        &self,
        id: &AccountId,
        threshold: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        self.check()?;
        let mut accounts = self.accounts.lock().unwrap();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(accounts.get_mut(id).map(|account| {
            account.record_failed_login(threshold, now);
            account.clone()
        }))
    }

    async fn clear_expired_lock(
        &self,
        id: &AccountId,
        observed_locked_at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        self.check()?;
        let mut accounts = self.accounts.lock().unwrap();
        Ok(accounts.get_mut(id).map(|account| {
            if account.clear_lock(observed_locked_at) {
                self.writes.fetch_add(1, Ordering::SeqCst);
            }
            account.clone()
        }))
    }
}

/// Reversible stand-in for a real hasher: `$fake$<plaintext>`.
#[derive(Clone, Default)]
pub struct FakePasswordHasher;

impl FakePasswordHasher {
    pub fn digest_for(raw_password: &str) -> PasswordDigest {
        PasswordDigest::parse(Secret::from(format!("$fake${raw_password}"))).unwrap()
    }
}

#[async_trait::async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHasherError> {
        Ok(Self::digest_for(password.as_ref().expose_secret()))
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHasherError> {
        let expected = Self::digest_for(password.as_ref().expose_secret());
        Ok(expected.as_ref().expose_secret() == digest.as_ref().expose_secret())
    }
}

#[derive(Clone, Default)]
pub struct FakeTokenIssuer;

impl TokenIssuer for FakeTokenIssuer {
    fn sign(&self, account: &Account) -> Result<SessionToken, TokenIssuerError> {
        Ok(SessionToken::new(format!(
            "token:{}:{}",
            account.id(),
            account.email().as_ref().expose_secret()
        )))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError> {
        let mut parts = token.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("token"), Some(sub), Some(email)) => Ok(SessionClaims {
                sub: sub.to_owned(),
                email: email.to_owned(),
                iat: 0,
                exp: i64::MAX,
            }),
            _ => Err(TokenIssuerError::InvalidToken),
        }
    }
}
