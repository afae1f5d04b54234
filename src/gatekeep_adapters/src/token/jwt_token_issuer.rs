use chrono::{Duration, Utc};
use gatekeep_core::{Account, SessionClaims, SessionToken, TokenIssuer, TokenIssuerError};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};

use crate::config::JwtSetting;

/// HS256 session tokens signed with a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    time_to_live: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: &Secret<String>, time_to_live: Duration) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            time_to_live,
        }
    }

    pub fn from_setting(setting: &JwtSetting) -> Result<Self, TokenIssuerError> {
        if setting.time_to_live <= 0 {
            return Err(TokenIssuerError::UnexpectedError(format!(
                "Auth token time to live must be positive, got {}",
                setting.time_to_live
            )));
        }
        let time_to_live = Duration::try_seconds(setting.time_to_live).ok_or(
            TokenIssuerError::UnexpectedError("Failed to create auth token duration".to_string()),
        )?;
        Ok(Self::new(&setting.secret, time_to_live))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn sign(&self, account: &Account) -> Result<SessionToken, TokenIssuerError> {
        let claims = SessionClaims::new(account, Utc::now(), self.time_to_live);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map(SessionToken::new)
            .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))
    }

    // Check the token signature and expiry using the JWT secret
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                TokenIssuerError::InvalidToken
            })
    }
}
