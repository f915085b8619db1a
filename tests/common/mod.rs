//! Shared harness: the full router over an in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use ong_admin_api::config::Environment;
use ong_admin_api::{create_router, AppState, Config, Database};

pub const TEST_SECRET: &str = "integration-test-secret-with-32-chars!";

pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Fresh development-mode app with migrations applied.
    pub async fn spawn() -> Self {
        Self::spawn_with(Environment::Development).await
    }

    /// Fresh app in the given environment, without Redis.
    pub async fn spawn_with(environment: Environment) -> Self {
        let config = Config::new("sqlite::memory:", TEST_SECRET).with_environment(environment);
        let database = Database::connect(&config)
            .await
            .expect("in-memory database should connect");

        let state = AppState::from_config(Arc::new(database), None, config);
        Self {
            router: create_router(state),
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, token, None).await
    }

    /// Register an account and return its token.
    pub async fn register(&self, email: &str, cargo: Option<&str>) -> String {
        let mut body = json!({
            "nome": "Pessoa Teste",
            "email": email,
            "senha": "segredo1",
        });
        if let Some(cargo) = cargo {
            body["cargo"] = json!(cargo);
        }
        let (status, body) = self.post("/api/auth/register", None, body).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["token"]
            .as_str()
            .expect("token in register response")
            .to_string()
    }

    /// The bootstrap administrator. Must be the first account created.
    pub async fn admin_token(&self) -> String {
        self.register("admin@ong.org", Some("admin")).await
    }
}

pub fn aluno_payload(nome: &str, cpf: Option<&str>) -> Value {
    let mut body = json!({
        "nome": nome,
        "data_nasc": "2014-03-09",
        "sexo": "F",
        "turma": "A1",
    });
    if let Some(cpf) = cpf {
        body["cpf"] = json!(cpf);
    }
    body
}

pub fn professor_payload(nome: &str, email: &str) -> Value {
    json!({
        "nome": nome,
        "email": email,
        "data_nasc": "1985-06-20",
        "sexo": "M",
        "formacao": "Licenciatura em Matemática",
        "experiencia_anos": 8,
        "data_admissao": "2020-02-01",
    })
}

pub fn curso_payload(codigo: &str, professor_id: i64) -> Value {
    json!({
        "nome": "Informática Básica",
        "codigo": codigo,
        "categoria": "informatica",
        "carga_horaria_total": 60,
        "duracao_meses": 3,
        "vagas_disponiveis": 20,
        "data_inicio": "2026-03-01",
        "data_fim": "2026-06-01",
        "horario_inicio": "08:00:00",
        "horario_fim": "10:00:00",
        "dias_semana": ["segunda", "quarta"],
        "local": "Sala de informática",
        "professor_id": professor_id,
    })
}
