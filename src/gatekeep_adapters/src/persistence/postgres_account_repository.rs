use chrono::{DateTime, Utc};
use gatekeep_core::{
    Account, AccountId, AccountRepository, AccountRepositoryError, AccountUpdate, Email,
    NewAccount, PasswordDigest,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, migrate::Migrator};
use uuid::Uuid;

/// Schema migrations for the `accounts` table.
pub static MIGRATOR: Migrator = sqlx::migrate!();

const ACCOUNT_COLUMNS: &str =
    "id, email, password_hash, failed_login_attempts, locked_at, created_at";

#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        PostgresAccountRepository { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    failed_login_attempts: i32,
    locked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountRepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| AccountRepositoryError::UnexpectedError(e.to_string()))?;
        let password_digest = PasswordDigest::parse(Secret::from(row.password_hash))
            .map_err(|e| AccountRepositoryError::UnexpectedError(e.to_string()))?;

        Ok(Account::from_parts(
            AccountId::from(row.id),
            email,
            password_digest,
            u32::try_from(row.failed_login_attempts).unwrap_or(0),
            row.locked_at,
            row.created_at,
        ))
    }
}

fn to_db_count(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

fn unexpected(e: sqlx::Error) -> AccountRepositoryError {
    AccountRepositoryError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl AccountRepository for PostgresAccountRepository {
    #[tracing::instrument(name = "Finding account by email in PostgreSQL", skip_all)]
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn create(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let sql = format!(
            r#"
                INSERT INTO accounts (id, email, password_hash, failed_login_attempts, locked_at)
                VALUES ($1, $2, $3, 0, NULL)
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(*AccountId::new().as_uuid())
            .bind(account.email.as_ref().expose_secret())
            .bind(account.password_digest.as_ref().expose_secret())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AccountRepositoryError::EmailAlreadyExists;
                    }
                }
                unexpected(e)
            })?;

        Account::try_from(row)
    }

    #[tracing::instrument(name = "Updating account in PostgreSQL", skip_all)]
    async fn update_by_id(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let sql = format!(
            r#"
                UPDATE accounts
                SET password_hash = COALESCE($2, password_hash),
                    failed_login_attempts = COALESCE($3, failed_login_attempts),
                    locked_at = CASE WHEN $4 THEN $5 ELSE locked_at END
                WHERE id = $1
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let password_hash = update
            .password_digest
            .as_ref()
            .map(|digest| digest.as_ref().expose_secret().clone());

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(*id.as_uuid())
            .bind(password_hash)
            .bind(update.failed_login_attempts.map(to_db_count))
            .bind(update.locked_at.is_some())
            .bind(update.locked_at.flatten())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Recording failed login in PostgreSQL", skip_all)]
    async fn record_failed_login(
        &self,
        id: &AccountId,
        threshold: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        // Right-hand side expressions see the pre-update row, so the increment
        // and the lock decision happen in one statement.
        let sql = format!(
            r#"
                UPDATE accounts
                SET failed_login_attempts = failed_login_attempts + 1,
                    locked_at = CASE
                        WHEN locked_at IS NULL AND failed_login_attempts + 1 >= $2 THEN $3
                        ELSE locked_at
                    END
                WHERE id = $1
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(*id.as_uuid())
            .bind(to_db_count(threshold))
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Clearing expired lock in PostgreSQL", skip_all)]
    async fn clear_expired_lock(
        &self,
        id: &AccountId,
        observed_locked_at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let sql = format!(
            r#"
                UPDATE accounts
                SET failed_login_attempts = 0,
                    locked_at = NULL
                WHERE id = $1 AND locked_at = $2
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let cleared = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(*id.as_uuid())
            .bind(observed_locked_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        if let Some(row) = cleared {
            return Account::try_from(row).map(Some);
        }

        // The lock changed since it was read; report the row as it is now.
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }
}
