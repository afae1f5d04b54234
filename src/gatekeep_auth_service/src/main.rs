use color_eyre::eyre::Result;
use gatekeep_adapters::{
    config::AuthServiceSetting,
    hashing::Argon2PasswordHasher,
    persistence::{HashMapAccountRepository, PostgresAccountRepository},
    token::JwtTokenIssuer,
};
use gatekeep_application::AccountAuthService;
use gatekeep_auth_service::{AuthService, configure_postgresql, telemetry::init_tracing};
use gatekeep_core::{AccountRepository, LockoutPolicy};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = AuthServiceSetting::load()?;

    match &config.postgres {
        Some(postgres) => {
            let pg_pool = configure_postgresql(postgres).await?;
            serve(PostgresAccountRepository::new(pg_pool), &config).await
        }
        None => {
            tracing::warn!("No postgres settings found, accounts are kept in memory");
            serve(HashMapAccountRepository::new(), &config).await
        }
    }
}

async fn serve<R>(repository: R, config: &AuthServiceSetting) -> Result<()>
where
    R: AccountRepository + 'static,
{
    let hasher = Argon2PasswordHasher::new(&config.auth.argon2)?;
    let token_issuer = JwtTokenIssuer::from_setting(&config.auth.jwt)?;
    let lockout_policy = LockoutPolicy::from(&config.auth.lockout);

    tracing::info!(
        max_failed_attempts = lockout_policy.max_failed_attempts(),
        lock_duration = ?lockout_policy.lock_duration(),
        "Account lockout policy"
    );

    let service = AccountAuthService::new(repository, hasher, token_issuer, lockout_policy);
    let auth_service = AuthService::new(service, &config.auth.jwt.cookie_name);

    let listener = TcpListener::bind(config.application.address.as_str()).await?;
    let allowed_origins = Some(config.auth.allowed_origins.clone()).filter(|o| !o.is_empty());

    auth_service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}
