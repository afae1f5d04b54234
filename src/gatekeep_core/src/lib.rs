pub mod domain;
pub mod ports;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId, AccountProfile, AccountUpdate, NewAccount},
    email::Email,
    lockout::{LockState, LockoutPolicy},
    password::Password,
    password_digest::PasswordDigest,
    session::{SessionClaims, SessionToken},
    user_error::UserError,
};

pub use ports::{
    repositories::{AccountRepository, AccountRepositoryError},
    services::{PasswordHasher, PasswordHasherError, TokenIssuer, TokenIssuerError},
};

pub use validation::{Credentials, FieldError, LoginForm, Registration, RegistrationForm, ValidationError};
