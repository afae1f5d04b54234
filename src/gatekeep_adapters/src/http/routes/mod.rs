use std::sync::Arc;

use gatekeep_application::AccountAuthService;

pub mod error;
pub mod login;
pub mod register;
pub mod verify_token;

pub use error::{AuthApiError, ErrorResponse};
pub use login::{LoginResponse, login};
pub use register::register;
pub use verify_token::{VerifyTokenRequest, verify_token};

/// Shared state for the auth routes.
pub struct AuthState<R, H, T> {
    pub service: Arc<AccountAuthService<R, H, T>>,
    pub cookie_name: Arc<str>,
}

impl<R, H, T> AuthState<R, H, T> {
    pub fn new(service: AccountAuthService<R, H, T>, cookie_name: &str) -> Self {
        Self {
            service: Arc::new(service),
            cookie_name: Arc::from(cookie_name),
        }
    }
}

impl<R, H, T> Clone for AuthState<R, H, T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            cookie_name: Arc::clone(&self.cookie_name),
        }
    }
}
