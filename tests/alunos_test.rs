//! Student endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{aluno_payload, TestApp};
use ong_admin_api::config::Environment;

#[tokio::test]
async fn test_create_computes_idade_and_matricula() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/alunos",
            Some(&token),
            aluno_payload("Ana Souza", Some("52998224725")),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Aluno cadastrado com sucesso");
    let aluno = &body["data"];
    assert_eq!(aluno["cpf"], "529.982.247-25");
    assert_eq!(aluno["ativo"], true);
    assert!(aluno["idade"].as_i64().unwrap() >= 12);
    assert!(aluno["numero_matricula"].as_str().unwrap().len() >= 8);
}

#[tokio::test]
async fn test_duplicate_cpf_conflicts() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let first = aluno_payload("Ana Souza", Some("529.982.247-25"));
    let (status, _) = app.post("/api/alunos", Some(&token), first).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = aluno_payload("Bia Souza", Some("529.982.247-25"));
    let (status, body) = app.post("/api/alunos", Some(&token), second).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CPF já cadastrado");
}

#[tokio::test]
async fn test_invalid_cpf_is_a_field_error() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post("/api/alunos", None, aluno_payload("Ana Souza", Some("123.456.789-00")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "cpf");
}

#[tokio::test]
async fn test_list_filters_by_ativo() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (_, ana) = app
        .post("/api/alunos", Some(&token), aluno_payload("Ana Souza", None))
        .await;
    let mut inativo = aluno_payload("Caio Lima", None);
    inativo["ativo"] = json!("nao");
    app.post("/api/alunos", Some(&token), inativo).await;

    let (status, body) = app.get("/api/alunos?ativo=true", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["id"], ana["data"]["id"]);

    let (_, body) = app.get("/api/alunos?limit=1&page=2", Some(&token)).await;
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_voluntario_cannot_delete() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let voluntario = app.register("vol@ong.org", None).await;

    let (_, created) = app
        .post("/api/alunos", Some(&admin), aluno_payload("Ana Souza", None))
        .await;
    let uri = format!("/api/alunos/{}", created["data"]["id"]);

    let (status, _) = app.delete(&uri, Some(&voluntario)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_id_must_be_positive_integer() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/api/alunos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/alunos/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_turma_and_estatisticas_need_a_user() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let mut com_restricao = aluno_payload("Ana Souza", None);
    com_restricao["restricao_alimentar"] = json!("Lactose");
    app.post("/api/alunos", Some(&token), com_restricao).await;
    app.post("/api/alunos", Some(&token), aluno_payload("Bia Souza", None))
        .await;

    let (status, _) = app.get("/api/alunos/estatisticas", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/api/alunos/estatisticas", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_alunos"], 2);
    assert_eq!(body["alunos_com_restricao_alimentar"], 1);

    let (status, body) = app.get("/api/alunos/turma/A1", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["turma"], "A1");
}

#[tokio::test]
async fn test_name_length_checked_after_trimming() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post("/api/alunos", None, aluno_payload(" A", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "nome");

    let (status, body) = app
        .post("/api/alunos", None, aluno_payload("  Ana Souza  ", None))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["nome"], "Ana Souza");
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::spawn().await;
    app.post("/api/alunos", None, aluno_payload("Ana Souza", None))
        .await;

    let (status, body) = app.get("/api/alunos?page=18446744073709551615", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_update_keeps_ativo_and_checks_cpf() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let mut inativo = aluno_payload("Caio Lima", Some("529.982.247-25"));
    inativo["ativo"] = json!("nao");
    let (status, created) = app.post("/api/alunos", Some(&token), inativo).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["ativo"], false);
    let uri = format!("/api/alunos/{}", created["data"]["id"]);

    let mut changes = aluno_payload("Caio Lima Neto", Some("529.982.247-25"));
    changes["turma"] = json!("B2");
    let (status, body) = app.put(&uri, Some(&token), changes).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nome"], "Caio Lima Neto");
    assert_eq!(body["data"]["turma"], "B2");
    assert_eq!(body["data"]["ativo"], false);

    let (status, _) = app
        .post(
            "/api/alunos",
            Some(&token),
            aluno_payload("Bia Souza", Some("111.444.777-35")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .put(&uri, Some(&token), aluno_payload("Caio Lima", Some("11144477735")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CPF já cadastrado");
}

#[tokio::test]
async fn test_production_requires_token() {
    let app = TestApp::spawn_with(Environment::Production).await;
    let token = app.admin_token().await;

    let (status, body) = app.get("/api/alunos", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, body) = app.get("/api/alunos", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 0);
}
