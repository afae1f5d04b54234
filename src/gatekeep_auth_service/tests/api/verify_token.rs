use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{EMAIL, PASSWORD, TestApp};

#[tokio::test]
async fn should_return_200_with_claims_for_issued_token() {
    let app = TestApp::new().await;
    let profile: Value = app.register(EMAIL, PASSWORD).await.json().await.unwrap();
    let login: Value = app.login(EMAIL, PASSWORD).await.json().await.unwrap();

    let response = app
        .post_verify_token(&json!({ "token": login["accessToken"] }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let claims: Value = response.json().await.unwrap();
    assert_eq!(claims["sub"], profile["id"]);
    assert_eq!(claims["email"], EMAIL);
    assert!(claims["exp"].as_i64().unwrap() > claims["iat"].as_i64().unwrap());
}

#[tokio::test]
async fn should_return_401_for_invalid_token() {
    let app = TestApp::new().await;

    let response = app
        .post_verify_token(&json!({ "token": "not.a.token" }))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_422_if_malformed_input() {
    let app = TestApp::new().await;

    let response = app.post_verify_token(&json!({ "jwt": "abc" })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
