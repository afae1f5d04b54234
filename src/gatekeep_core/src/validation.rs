//! Request validation performed before the authentication service is invoked.
//!
//! Every failing field is reported, not just the first one.

use std::fmt;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{email::Email, password::Password};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", describe(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{} {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Default)]
struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn check<T, E: fmt::Display>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e.to_string());
                None
            }
        }
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_error(self) -> ValidationError {
        ValidationError { errors: self.0 }
    }
}

/// Raw registration payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: Email,
    pub password: Password,
    pub confirm_password: Password,
}

impl RegistrationForm {
    pub fn validate(self) -> Result<Registration, ValidationError> {
        let mut errors = FieldErrors::default();

        let passwords_match =
            self.password.expose_secret() == self.confirm_password.expose_secret();

        let email = errors.check("email", Email::try_from(self.email));
        let password = errors.check("password", Password::try_from(self.password));
        if !passwords_match {
            errors.push("confirmPassword", "does not match password");
        }

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(Registration {
                email,
                confirm_password: password.clone(),
                password,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

/// Raw login payload.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

impl LoginForm {
    pub fn validate(self) -> Result<Credentials, ValidationError> {
        let mut errors = FieldErrors::default();

        let email = errors.check("email", Email::try_from(self.email));
        let password = errors.check("password", Password::try_from(self.password));

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials { email, password }),
            _ => Err(errors.into_error()),
        }
    }
}
