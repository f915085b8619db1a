//! Student (aluno) handlers.
//!
//! The whole router sits behind `optional_auth_middleware`: read and write
//! routes accept anonymous calls in development, while the routes taking a
//! `CurrentUser` always need a valid token.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};

use crate::api::extractors::{QueryParams, ValidatedId, ValidatedJson};
use crate::api::middleware::{require_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    AlunoEstatisticas, AlunoFilter, AlunoForm, AlunoListQuery, AlunoResponse, AlunosDaTurma,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};
use crate::utils::serde_ext::query_flag;

pub fn aluno_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alunos).post(create_aluno))
        .route("/estatisticas", get(estatisticas))
        .route("/turma/:turma", get(alunos_da_turma))
        .route(
            "/:id",
            get(get_aluno).put(update_aluno).delete(delete_aluno),
        )
        .route("/:id/reativar", patch(reativar_aluno))
}

fn split_query(query: AlunoListQuery) -> (AlunoFilter, PaginationParams) {
    let filter = AlunoFilter {
        search: query.search.filter(|s| !s.trim().is_empty()),
        ativo: query_flag(query.ativo.as_deref()),
        turma: query.turma.filter(|t| !t.trim().is_empty()),
    };
    (filter, PaginationParams::from_query(query.page, query.limit))
}

/// List students
#[utoipa::path(
    get,
    path = "/api/alunos",
    tag = "Alunos",
    params(AlunoListQuery),
    responses(
        (status = 200, description = "Página de alunos com idade calculada"),
        (status = 401, description = "Token ausente (produção) ou inválido")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn list_alunos(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AlunoListQuery>,
) -> AppResult<Json<Paginated<AlunoResponse>>> {
    let (filter, params) = split_query(query);
    Ok(Json(state.alunos().list(filter, params).await?))
}

/// Get a student by id
#[utoipa::path(
    get,
    path = "/api/alunos/{id}",
    tag = "Alunos",
    params(("id" = i32, Path, description = "Aluno ID")),
    responses(
        (status = 200, description = "Aluno encontrado", body = AlunoResponse),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Aluno não encontrado")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn get_aluno(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<AlunoResponse>> {
    Ok(Json(state.alunos().get(id).await?))
}

/// Enroll a student
#[utoipa::path(
    post,
    path = "/api/alunos",
    tag = "Alunos",
    request_body = AlunoForm,
    responses(
        (status = 201, description = "Aluno cadastrado"),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF ou número de matrícula já cadastrado")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn create_aluno(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    ValidatedJson(form): ValidatedJson<AlunoForm>,
) -> AppResult<Created<AlunoResponse>> {
    let usuario_id = current.as_ref().map(CurrentUser::id);
    let aluno = state.alunos().create(form, usuario_id).await?;
    Ok(Created(aluno, "Aluno cadastrado com sucesso"))
}

/// Replace a student's data
#[utoipa::path(
    put,
    path = "/api/alunos/{id}",
    tag = "Alunos",
    params(("id" = i32, Path, description = "Aluno ID")),
    request_body = AlunoForm,
    responses(
        (status = 200, description = "Aluno atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Aluno não encontrado"),
        (status = 409, description = "CPF já cadastrado")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn update_aluno(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
    ValidatedJson(form): ValidatedJson<AlunoForm>,
) -> AppResult<Json<ApiResponse<AlunoResponse>>> {
    let aluno = state.alunos().update(id, form).await?;
    Ok(Json(ApiResponse::with_message(aluno, "Aluno atualizado com sucesso")))
}

/// Delete a student permanently
#[utoipa::path(
    delete,
    path = "/api/alunos/{id}",
    tag = "Alunos",
    params(("id" = i32, Path, description = "Aluno ID")),
    responses(
        (status = 200, description = "Aluno removido"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_aluno(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<()>>> {
    require_manager(&current)?;
    state.alunos().delete(id).await?;
    Ok(Json(ApiResponse::message("Aluno removido com sucesso")))
}

/// Reactivate a student
#[utoipa::path(
    patch,
    path = "/api/alunos/{id}/reativar",
    tag = "Alunos",
    params(("id" = i32, Path, description = "Aluno ID")),
    responses(
        (status = 200, description = "Aluno reativado"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reativar_aluno(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<AlunoResponse>>> {
    require_manager(&current)?;
    let aluno = state.alunos().reactivate(id).await?;
    Ok(Json(ApiResponse::with_message(aluno, "Aluno reativado com sucesso")))
}

/// Active students of a class
#[utoipa::path(
    get,
    path = "/api/alunos/turma/{turma}",
    tag = "Alunos",
    params(("turma" = String, Path, description = "Nome da turma")),
    responses((status = 200, description = "Alunos ativos da turma", body = AlunosDaTurma)),
    security(("bearer_auth" = []))
)]
pub async fn alunos_da_turma(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(turma): Path<String>,
) -> AppResult<Json<AlunosDaTurma>> {
    Ok(Json(state.alunos().by_turma(&turma).await?))
}

/// Student statistics
#[utoipa::path(
    get,
    path = "/api/alunos/estatisticas",
    tag = "Alunos",
    responses((status = 200, description = "Estatísticas de alunos", body = AlunoEstatisticas)),
    security(("bearer_auth" = []))
)]
pub async fn estatisticas(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> AppResult<Json<AlunoEstatisticas>> {
    Ok(Json(state.alunos().estatisticas().await?))
}
