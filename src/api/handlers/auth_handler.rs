//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{clean, Cargo, Normalize, PublicUser};
use crate::errors::AppResult;
use crate::services::{AuthResponse, Registration};
use crate::types::MessageResponse;
use crate::utils::documents::validate_br_phone;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres"))]
    #[schema(example = "Maria Souza")]
    pub nome: String,
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "maria@ong.org")]
    pub email: String,
    #[validate(length(min = 6, message = "Senha deve ter pelo menos 6 caracteres"))]
    #[schema(example = "segredo123", min_length = 6)]
    pub senha: String,
    /// Defaults to `voluntario`
    pub cargo: Option<Cargo>,
    #[validate(custom(function = "validate_br_phone", message = "Telefone inválido"))]
    #[schema(example = "(11) 98765-4321")]
    pub telefone: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "maria@ong.org")]
    pub email: String,
    #[validate(length(min = 1, message = "Senha é obrigatória"))]
    #[schema(example = "segredo123")]
    pub senha: String,
}

/// The password is taken as typed.
impl Normalize for RegisterRequest {
    fn normalized(self) -> Self {
        Self {
            nome: self.nome.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            telefone: clean(self.telefone),
            ..self
        }
    }
}

impl Normalize for LoginRequest {
    fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            ..self
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: PublicUser,
}

/// Public routes: login and registration
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Routes that need a valid bearer token
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/verify", get(verify))
        .route("/logout", post(logout))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Autenticação",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Usuário criado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Cargo elevado não permitido"),
        (status = 409, description = "Email já cadastrado")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = state
        .auth()
        .register(Registration {
            nome: payload.nome,
            email: payload.email,
            senha: payload.senha,
            cargo: payload.cargo,
            telefone: payload.telefone,
            data_nascimento: payload.data_nascimento,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login and get a JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Autenticação",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Credenciais inválidas ou usuário inativo")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.auth().login(payload.email, payload.senha).await?;
    Ok(Json(response))
}

/// Check the bearer token and return its user
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "Autenticação",
    responses(
        (status = 200, description = "Token válido", body = VerifyResponse),
        (status = 401, description = "Token ausente, inválido ou revogado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn verify(current: CurrentUser) -> Json<VerifyResponse> {
    let user = PublicUser::from(&current.user).with_last_login(current.user.ultimo_login);
    Json(VerifyResponse { valid: true, user })
}

/// Revoke the bearer token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Autenticação",
    responses(
        (status = 200, description = "Logout realizado"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<MessageResponse>> {
    state.auth().logout(&current.claims).await?;
    Ok(Json(MessageResponse::new("Logout realizado com sucesso")))
}
