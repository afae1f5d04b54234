use reqwest::StatusCode;
use serde_json::Value;

use crate::helpers::{EMAIL, PASSWORD, TestApp, error_message, registration};

#[tokio::test]
async fn should_return_201_with_profile_for_valid_input() {
    let app = TestApp::new().await;

    let response = app.register(EMAIL, PASSWORD).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], EMAIL);
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordDigest").is_none());
}

#[tokio::test]
async fn should_return_409_if_email_already_exists() {
    let app = TestApp::new().await;
    app.register(EMAIL, PASSWORD).await;

    let response = app.register(EMAIL, "another-password").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(error_message(response).await, "Email already exists");
}

#[tokio::test]
async fn should_return_400_if_invalid_input() {
    let app = TestApp::new().await;

    let test_cases = [
        registration("", PASSWORD, PASSWORD),
        registration("not-an-email", PASSWORD, PASSWORD),
        registration(EMAIL, "12345", "12345"),
        registration(EMAIL, PASSWORD, "654321"),
    ];

    for test_case in test_cases {
        let response = app.post_register(&test_case).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "Failed for input: {test_case:?}"
        );

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Validation failed");
        assert!(body["details"].as_array().is_some_and(|d| !d.is_empty()));
    }
}

#[tokio::test]
async fn should_return_422_if_malformed_input() {
    let app = TestApp::new().await;

    let test_cases = [
        serde_json::json!({ "email": EMAIL }),
        serde_json::json!({ "email": EMAIL, "password": PASSWORD }),
        serde_json::json!({ "password": PASSWORD, "confirmPassword": PASSWORD }),
    ];

    for test_case in test_cases {
        let response = app.post_register(&test_case).await;
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Failed for input: {test_case:?}"
        );
    }
}
