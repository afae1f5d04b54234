use axum::http::HeaderValue;
use chrono::Duration;
use config::{
    Config, ConfigError, Environment, File,
    builder::{ConfigBuilder, DefaultState},
};
use gatekeep_core::LockoutPolicy;
use gatekeep_core::domain::lockout::{
    DEFAULT_LOCK_DURATION_IN_SECONDS, DEFAULT_MAX_FAILED_ATTEMPTS,
};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{CONFIG_DIR, DEFAULT_ENVIRONMENT, defaults, env};

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    #[serde(default)]
    pub application: ApplicationSetting,
    pub auth: AuthSetting,
    #[serde(default)]
    pub postgres: Option<PostgresSetting>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    pub address: String,
}

impl Default for ApplicationSetting {
    fn default() -> Self {
        Self {
            address: defaults::APP_ADDRESS.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSetting {
    pub jwt: JwtSetting,
    #[serde(default)]
    pub lockout: LockoutSetting,
    #[serde(default)]
    pub argon2: Argon2Setting,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSetting {
    pub secret: Secret<String>,
    /// Token lifetime in seconds.
    #[serde(default = "default_time_to_live")]
    pub time_to_live: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_time_to_live() -> i64 {
    defaults::JWT_TIME_TO_LIVE_IN_SECONDS
}

fn default_cookie_name() -> String {
    defaults::JWT_COOKIE_NAME.to_owned()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LockoutSetting {
    pub max_failed_attempts: u32,
    /// `None` or a non-positive value locks permanently.
    pub lock_duration_in_seconds: Option<i64>,
}

impl Default for LockoutSetting {
    fn default() -> Self {
        Self {
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            lock_duration_in_seconds: Some(DEFAULT_LOCK_DURATION_IN_SECONDS),
        }
    }
}

impl From<&LockoutSetting> for LockoutPolicy {
    fn from(setting: &LockoutSetting) -> Self {
        let lock_duration = setting
            .lock_duration_in_seconds
            .filter(|seconds| *seconds > 0)
            .and_then(Duration::try_seconds);
        LockoutPolicy::new(setting.max_failed_attempts, lock_duration)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Argon2Setting {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Setting {
    fn default() -> Self {
        Self {
            memory_kib: defaults::ARGON2_MEMORY_KIB,
            iterations: defaults::ARGON2_ITERATIONS,
            parallelism: defaults::ARGON2_PARALLELISM,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSetting {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    defaults::POSTGRES_MAX_CONNECTIONS
}

/// CORS origins, given either as a list or as one comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OriginsRepr")]
pub struct AllowedOrigins(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginsRepr {
    List(Vec<String>),
    CommaSeparated(String),
}

impl From<OriginsRepr> for AllowedOrigins {
    fn from(repr: OriginsRepr) -> Self {
        let origins = match repr {
            OriginsRepr::List(origins) => origins,
            OriginsRepr::CommaSeparated(origins) => {
                origins.split(',').map(str::to_owned).collect()
            }
        };
        Self(
            origins
                .into_iter()
                .map(|origin| origin.trim().to_owned())
                .filter(|origin| !origin.is_empty())
                .collect(),
        )
    }
}

impl AllowedOrigins {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl AuthServiceSetting {
    /// Load settings from `config/base.json`, `config/<environment>.json`,
    /// `GATEKEEP__*` variables and finally `JWT_SECRET` / `DATABASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        let builder = Config::builder()
            .add_source(File::with_name(&format!("{CONFIG_DIR}/base")).required(false))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt.secret", std::env::var(env::JWT_SECRET_ENV_VAR).ok())?
            .set_override_option("postgres.url", std::env::var(env::DATABASE_URL_ENV_VAR).ok())?;

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
