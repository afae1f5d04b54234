use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatekeep_core::{AccountRepository, PasswordHasher, RegistrationForm, TokenIssuer};

use super::{AuthState, error::AuthApiError};

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<R, H, T>(
    State(state): State<AuthState<R, H, T>>,
    Json(form): Json<RegistrationForm>,
) -> Result<impl IntoResponse, AuthApiError>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let registration = form.validate()?;

    let profile = state
        .service
        .register(
            registration.email,
            registration.password,
            registration.confirm_password,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}
