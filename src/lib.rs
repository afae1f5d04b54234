//! # Gatekeep - Account Authentication Service Library
//!
//! Facade crate that re-exports the public APIs of the gatekeep components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `LockoutPolicy`, etc.
//! - **Ports**: `AccountRepository`, `PasswordHasher`, `TokenIssuer`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase` and the `AccountAuthService` that wires them
//! - **Adapters**: `PostgresAccountRepository`, `Argon2PasswordHasher`, `JwtTokenIssuer`, etc.
//! - **Service**: `AuthService`, the HTTP entry point

/// Core domain types and value objects
pub mod core {
    pub use gatekeep_core::*;
}

pub use gatekeep_core::{
    Account, AccountId, AccountProfile, Email, LockState, LockoutPolicy, Password,
    PasswordDigest, SessionClaims, SessionToken, UserError,
};

/// Port definitions
pub mod ports {
    pub use gatekeep_core::{
        AccountRepository, AccountRepositoryError, PasswordHasher, PasswordHasherError,
        TokenIssuer, TokenIssuerError,
    };
}

pub use ports::{AccountRepository, PasswordHasher, TokenIssuer};

/// Application use cases
pub mod use_cases {
    pub use gatekeep_application::*;
}

pub use gatekeep_application::{AccountAuthService, AuthError, LoginUseCase, RegisterUseCase};

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use gatekeep_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatekeep_adapters::persistence::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use gatekeep_adapters::hashing::*;
    }

    /// Session token signing
    pub mod token {
        pub use gatekeep_adapters::token::*;
    }

    /// Configuration
    pub mod config {
        pub use gatekeep_adapters::config::*;
    }
}

pub use gatekeep_adapters::{
    hashing::Argon2PasswordHasher,
    persistence::{HashMapAccountRepository, PostgresAccountRepository},
    token::JwtTokenIssuer,
};

/// Main auth service
pub use gatekeep_auth_service::{AuthService, configure_postgresql};

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
