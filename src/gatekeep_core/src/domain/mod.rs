pub mod account;
pub mod email;
pub mod lockout;
pub mod password;
pub mod password_digest;
pub mod session;
pub mod user_error;
