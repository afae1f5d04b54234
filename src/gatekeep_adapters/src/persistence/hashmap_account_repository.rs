use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use gatekeep_core::{
    Account, AccountId, AccountRepository, AccountRepositoryError, AccountUpdate, Email,
    NewAccount,
};

#[derive(Default)]
struct Accounts {
    by_id: HashMap<AccountId, Account>,
    ids_by_email: HashMap<Email, AccountId>,
}

/// In-process account repository. Clones share the same storage.
#[derive(Default, Clone)]
pub struct HashMapAccountRepository {
    accounts: Arc<RwLock<Accounts>>,
}

impl HashMapAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountRepository for HashMapAccountRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .ids_by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts.ids_by_email.contains_key(&account.email) {
            return Err(AccountRepositoryError::EmailAlreadyExists);
        }

        let account = Account::new(account);
        accounts
            .ids_by_email
            .insert(account.email().clone(), *account.id());
        accounts.by_id.insert(*account.id(), account.clone());
        Ok(account)
    }

    async fn update_by_id(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.by_id.get_mut(id).map(|account| {
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
        let mut accounts = self.accounts.write().await;
        Ok(accounts.by_id.get_mut(id).map(|account| {
            account.record_failed_login(threshold, now);
            account.clone()
        }))
    }

    async fn clear_expired_lock(
        &self,
        id: &AccountId,
        observed_locked_at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.by_id.get_mut(id).map(|account| {
            account.clear_lock(observed_locked_at);
            account.clone()
        }))
    }
}
