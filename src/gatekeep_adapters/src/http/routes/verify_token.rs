use axum::{Json, extract::State};
use gatekeep_core::{AccountRepository, PasswordHasher, SessionClaims, TokenIssuer};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::{AuthState, error::AuthApiError};

#[derive(Deserialize)]
pub struct VerifyTokenRequest {
    pub token: Secret<String>,
}

#[tracing::instrument(name = "Verify token", skip_all)]
pub async fn verify_token<R, H, T>(
    State(state): State<AuthState<R, H, T>>,
    Json(request): Json<VerifyTokenRequest>,
) -> Result<Json<SessionClaims>, AuthApiError>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let claims = state.service.verify_token(request.token.expose_secret())?;

    Ok(Json(claims))
}
