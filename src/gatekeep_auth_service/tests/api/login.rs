use chrono::Duration;
use gatekeep_core::LockoutPolicy;
use reqwest::{StatusCode, header::SET_COOKIE};
use serde_json::Value;

use crate::helpers::{
    COOKIE_NAME, EMAIL, PASSWORD, TestApp, WRONG_EMAIL, WRONG_PASSWORD, credentials, error_message,
};

#[tokio::test]
async fn should_return_200_with_token_and_cookie_for_valid_credentials() {
    let app = TestApp::new().await;
    app.register(EMAIL, PASSWORD).await;

    let response = app.login(EMAIL, PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("No auth cookie set")
        .to_owned();

    let body: Value = response.json().await.unwrap();
    let token = body["accessToken"].as_str().unwrap();
    assert!(!token.is_empty());
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}={token}")));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn should_return_401_for_wrong_password_or_unknown_email() {
    let app = TestApp::new().await;
    app.register(EMAIL, PASSWORD).await;

    let wrong_password = app.login(EMAIL, WRONG_PASSWORD).await;
    let unknown_email = app.login(WRONG_EMAIL, PASSWORD).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        error_message(wrong_password).await,
        error_message(unknown_email).await
    );
}

#[tokio::test]
async fn should_return_400_if_invalid_input() {
    let app = TestApp::new().await;

    let test_cases = [
        credentials("", PASSWORD),
        credentials("not-an-email", PASSWORD),
        credentials(EMAIL, ""),
    ];

    for test_case in test_cases {
        let response = app.post_login(&test_case).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "Failed for input: {test_case:?}"
        );
    }
}

#[tokio::test]
async fn should_return_423_after_five_failed_attempts() {
    let app = TestApp::new().await;
    app.register(EMAIL, PASSWORD).await;

    for _ in 0..5 {
        let response = app.login(EMAIL, WRONG_PASSWORD).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = app.login(EMAIL, PASSWORD).await;

    assert_eq!(response.status(), StatusCode::LOCKED);
    assert_eq!(error_message(response).await, "Account has been locked");
}

#[tokio::test]
async fn successful_login_resets_the_failure_count() {
    let app = TestApp::new().await;
    app.register(EMAIL, PASSWORD).await;

    for _ in 0..4 {
        app.login(EMAIL, WRONG_PASSWORD).await;
    }
    assert_eq!(app.login(EMAIL, PASSWORD).await.status(), StatusCode::OK);

    for _ in 0..4 {
        app.login(EMAIL, WRONG_PASSWORD).await;
    }
    assert_eq!(app.login(EMAIL, PASSWORD).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_lock_allows_login_again() {
    // A zero duration makes every lock expire as soon as it is set.
    let app = TestApp::with_lockout(LockoutPolicy::new(2, Some(Duration::zero()))).await;
    app.register(EMAIL, PASSWORD).await;

    for _ in 0..2 {
        app.login(EMAIL, WRONG_PASSWORD).await;
    }

    assert_eq!(app.login(EMAIL, PASSWORD).await.status(), StatusCode::OK);
}
