use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use gatekeep_core::{AccountRepository, LoginForm, PasswordHasher, TokenIssuer};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::http::create_auth_cookie;

use super::{AuthState, error::AuthApiError};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

/// The token is returned in the body and also set as an auth cookie.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<R, H, T>(
    State(state): State<AuthState<R, H, T>>,
    jar: CookieJar,
    Json(form): Json<LoginForm>,
) -> Result<(CookieJar, Json<LoginResponse>), AuthApiError>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let credentials = form.validate()?;

    let token = state
        .service
        .login(credentials.email, credentials.password)
        .await?;
    let token = token.as_ref().expose_secret().clone();

    let jar = jar.add(create_auth_cookie(token.clone(), &state.cookie_name));

    Ok((jar, Json(LoginResponse { access_token: token })))
}
