//! Professor endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{professor_payload, TestApp};

#[tokio::test]
async fn test_requires_authentication() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/professores", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_voluntario_cannot_create() {
    let app = TestApp::spawn().await;
    app.admin_token().await;
    let voluntario = app.register("vol@ong.org", None).await;

    let (status, _) = app
        .post(
            "/api/professores",
            Some(&voluntario),
            professor_payload("Carlos Lima", "carlos@ong.org"),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_soft_delete_and_reactivate() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, created) = app
        .post(
            "/api/professores",
            Some(&token),
            professor_payload("Carlos Lima", "Carlos@ONG.org"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["email"], "carlos@ong.org");
    assert_eq!(created["data"]["status"], "ativo");

    let uri = format!("/api/professores/{}", created["data"]["id"]);
    let (status, _) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The email stays reserved while the row is soft-deleted
    let (status, _) = app
        .post(
            "/api/professores",
            Some(&token),
            professor_payload("Outro Carlos", "carlos@ong.org"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app.patch(&format!("{}/reativar", uri), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ativo"], true);

    let (status, _) = app.get(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_status_route_and_estatisticas() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    app.post(
        "/api/professores",
        Some(&token),
        professor_payload("Carlos Lima", "carlos@ong.org"),
    )
    .await;
    let mut de_ferias = professor_payload("Dora Reis", "dora@ong.org");
    de_ferias["status"] = json!("ferias");
    de_ferias["experiencia_anos"] = json!(3);
    app.post("/api/professores", Some(&token), de_ferias).await;

    let (status, body) = app.get("/api/professores/status/FERIAS", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["nome"], "Dora Reis");

    let (status, _) = app.get("/api/professores/status/sumido", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/api/professores/estatisticas", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["ferias"], 1);
    assert_eq!(body["mediaExperiencia"], "5.5");
}
