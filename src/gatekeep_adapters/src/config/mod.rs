pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, ApplicationSetting, Argon2Setting, AuthServiceSetting, AuthSetting,
    JwtSetting, LockoutSetting, PostgresSetting,
};
