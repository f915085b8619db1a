//! Authentication flow against the full router.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn().await;
    app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": " ADMIN@ong.org ", "senha": "segredo1"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login realizado com sucesso");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["email"], "admin@ong.org");
    assert!(body["user"].get("senha_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_rejected() {
    let app = TestApp::spawn().await;
    app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "admin@ong.org", "senha": "outra-senha"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::spawn().await;
    app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"nome": "Outra", "email": "admin@ong.org", "senha": "segredo1"}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email já cadastrado");
}

#[tokio::test]
async fn test_elevated_cargo_only_for_first_account() {
    let app = TestApp::spawn().await;
    app.admin_token().await;

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "nome": "Intruso",
                "email": "intruso@ong.org",
                "senha": "segredo1",
                "cargo": "admin",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let token = app.register("voluntario@ong.org", None).await;
    let (status, body) = app.get("/api/auth/verify", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["cargo"], "voluntario");
}

#[tokio::test]
async fn test_register_validation_reports_fields() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"nome": "A", "email": "nao-e-email", "senha": "123"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"nome"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"senha"));
}

#[tokio::test]
async fn test_verify_requires_valid_token() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/api/auth/verify", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/auth/verify", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_redis_still_succeeds() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .request(axum::http::Method::POST, "/api/auth/logout", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logout realizado com sucesso");
}
