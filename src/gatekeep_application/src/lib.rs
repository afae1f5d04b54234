pub mod error;
pub mod service;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::AuthError;
pub use service::AccountAuthService;
pub use use_cases::{login::LoginUseCase, register::RegisterUseCase};
