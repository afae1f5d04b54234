pub mod env {
    pub const ENVIRONMENT_ENV_VAR: &str = "GATEKEEP_ENVIRONMENT";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const ENV_PREFIX: &str = "GATEKEEP";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_DIR: &str = "config";
pub const DEFAULT_ENVIRONMENT: &str = "local";

pub mod defaults {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const JWT_COOKIE_NAME: &str = "jwt";
    pub const JWT_TIME_TO_LIVE_IN_SECONDS: i64 = 600;
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;

    pub const ARGON2_MEMORY_KIB: u32 = 15000;
    pub const ARGON2_ITERATIONS: u32 = 2;
    pub const ARGON2_PARALLELISM: u32 = 1;
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
