//! Course (curso) handlers. Every route needs a bearer token; writes need
//! admin or coordenador.

use axum::{
    extract::State,
    response::Json,
    routing::{get, patch},
    Router,
};

use crate::api::extractors::{QueryParams, ValidatedId, ValidatedJson};
use crate::api::middleware::{require_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::{Curso, CursoFilter, CursoForm, CursoListQuery};
use crate::errors::AppResult;
use crate::services::{parse_categoria, parse_curso_status};
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};
use crate::utils::serde_ext::query_flag;

pub fn curso_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cursos).post(create_curso))
        .route(
            "/:id",
            get(get_curso).put(update_curso).delete(delete_curso),
        )
        .route("/:id/reativar", patch(reativar_curso))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn split_query(query: CursoListQuery) -> AppResult<(CursoFilter, PaginationParams)> {
    let filter = CursoFilter {
        search: non_blank(query.search),
        categoria: non_blank(query.categoria)
            .map(|c| parse_categoria(&c))
            .transpose()?,
        status: non_blank(query.status)
            .map(|s| parse_curso_status(&s))
            .transpose()?,
        professor_id: query.professor_id,
        ativo: query_flag(query.ativo.as_deref()),
    };
    Ok((filter, PaginationParams::from_query(query.page, query.limit)))
}

/// List courses
#[utoipa::path(
    get,
    path = "/api/cursos",
    tag = "Cursos",
    params(CursoListQuery),
    responses(
        (status = 200, description = "Página de cursos"),
        (status = 400, description = "Categoria ou status inválido")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_cursos(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CursoListQuery>,
) -> AppResult<Json<Paginated<Curso>>> {
    let (filter, params) = split_query(query)?;
    Ok(Json(state.cursos().list(filter, params).await?))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/cursos/{id}",
    tag = "Cursos",
    params(("id" = i32, Path, description = "Curso ID")),
    responses(
        (status = 200, description = "Curso encontrado", body = Curso),
        (status = 404, description = "Curso não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_curso(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<Curso>> {
    Ok(Json(state.cursos().get(id).await?))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/cursos",
    tag = "Cursos",
    request_body = CursoForm,
    responses(
        (status = 201, description = "Curso cadastrado"),
        (status = 400, description = "Dados inválidos ou professor inexistente"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 409, description = "Código já cadastrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_curso(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(form): ValidatedJson<CursoForm>,
) -> AppResult<Created<Curso>> {
    require_manager(&current)?;
    let curso = state.cursos().create(form, current.id()).await?;
    Ok(Created(curso, "Curso cadastrado com sucesso"))
}

/// Replace a course's data
#[utoipa::path(
    put,
    path = "/api/cursos/{id}",
    tag = "Cursos",
    params(("id" = i32, Path, description = "Curso ID")),
    request_body = CursoForm,
    responses(
        (status = 200, description = "Curso atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Curso não encontrado"),
        (status = 409, description = "Código já cadastrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_curso(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
    ValidatedJson(form): ValidatedJson<CursoForm>,
) -> AppResult<Json<ApiResponse<Curso>>> {
    require_manager(&current)?;
    let curso = state.cursos().update(id, form).await?;
    Ok(Json(ApiResponse::with_message(curso, "Curso atualizado com sucesso")))
}

/// Soft-delete a course
#[utoipa::path(
    delete,
    path = "/api/cursos/{id}",
    tag = "Cursos",
    params(("id" = i32, Path, description = "Curso ID")),
    responses(
        (status = 200, description = "Curso removido"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Curso não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_curso(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<()>>> {
    require_manager(&current)?;
    state.cursos().delete(id).await?;
    Ok(Json(ApiResponse::message("Curso removido com sucesso")))
}

/// Restore a soft-deleted course
#[utoipa::path(
    patch,
    path = "/api/cursos/{id}/reativar",
    tag = "Cursos",
    params(("id" = i32, Path, description = "Curso ID")),
    responses(
        (status = 200, description = "Curso reativado"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Curso não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reativar_curso(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<Curso>>> {
    require_manager(&current)?;
    let curso = state.cursos().reactivate(id).await?;
    Ok(Json(ApiResponse::with_message(curso, "Curso reativado com sucesso")))
}
