use chrono::Duration;
use gatekeep_adapters::{
    config::{Argon2Setting, constants::test},
    hashing::Argon2PasswordHasher,
    persistence::HashMapAccountRepository,
    token::JwtTokenIssuer,
};
use gatekeep_application::AccountAuthService;
use gatekeep_auth_service::AuthService;
use gatekeep_core::LockoutPolicy;
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const EMAIL: &str = "admin@gmail.com";
pub const PASSWORD: &str = "123456";
pub const WRONG_EMAIL: &str = "fake@gmail.com";
pub const WRONG_PASSWORD: &str = "abcdef";

pub const JWT_SECRET: &str = "api-test-secret";
pub const COOKIE_NAME: &str = "jwt";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_lockout(LockoutPolicy::default()).await
    }

    pub async fn with_lockout(lockout_policy: LockoutPolicy) -> Self {
        // Cheap params keep the tests fast.
        let hasher = Argon2PasswordHasher::new(&Argon2Setting {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher");
        let token_issuer =
            JwtTokenIssuer::new(&Secret::from(JWT_SECRET.to_owned()), Duration::minutes(10));

        let service = AccountAuthService::new(
            HashMapAccountRepository::new(),
            hasher,
            token_issuer,
            lockout_policy,
        );
        let router = AuthService::new(service, COOKIE_NAME).as_nested_router(None);

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read local address")
        );

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Failed to run test server");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn post_register<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.post("/register", body).await
    }

    pub async fn post_login<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.post("/login", body).await
    }

    pub async fn post_verify_token<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.post("/verify-token", body).await
    }

    async fn post<Body: serde::Serialize>(&self, path: &str, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_register(&registration(email, password, password))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_login(&credentials(email, password)).await
    }
}

pub fn registration(email: &str, password: &str, confirm_password: &str) -> Value {
    json!({
        "email": email,
        "password": password,
        "confirmPassword": confirm_password,
    })
}

pub fn credentials(email: &str, password: &str) -> Value {
    json!({
        "email": email,
        "password": password,
    })
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Error body is not JSON");
    body["error"]
        .as_str()
        .expect("Error body has no message")
        .to_owned()
}
