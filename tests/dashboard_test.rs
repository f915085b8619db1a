//! Dashboard, health and router-level behavior.

mod common;

use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{aluno_payload, TestApp};

#[tokio::test]
async fn test_stats_reflect_enrollments() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    app.post("/api/alunos", Some(&token), aluno_payload("Ana Souza", None))
        .await;
    let mut inativo = aluno_payload("Caio Lima", None);
    inativo["ativo"] = json!(false);
    app.post("/api/alunos", Some(&token), inativo).await;

    let (status, body) = app.get("/api/dashboard/stats", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let gerais = &body["estatisticas_gerais"];
    assert_eq!(gerais["total_alunos"], 1);
    assert_eq!(gerais["total_usuarios"], 1);
    assert_eq!(gerais["alunos_inativos"], 1);
    assert_eq!(gerais["alunos_recentes"], 1);
    assert_eq!(body["ultimos_alunos"][0]["nome"], "Ana Souza");
    assert_eq!(body["crescimento_mensal"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_resumo_counts_today() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    app.post("/api/alunos", Some(&token), aluno_payload("Ana Souza", None))
        .await;

    let (status, body) = app.get("/api/dashboard/resumo", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_alunos"], 1);
    assert_eq!(body["total_turmas"], 1);
    assert_eq!(body["alunos_cadastrados_hoje"], 1);
}

#[tokio::test]
async fn test_dashboard_requires_token() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_disabled_redis() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "disabled");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/nada-aqui", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Rota não encontrada");
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = TestApp::spawn().await;

    let response = app
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
}
