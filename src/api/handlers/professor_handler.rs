//! Professor handlers. Every route needs a bearer token; writes
//! need admin or coordenador.

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
    Professor, ProfessorEstatisticas, ProfessorFilter, ProfessorForm, ProfessorListQuery,
};
use crate::errors::AppResult;
use crate::services::parse_status;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};
use crate::utils::serde_ext::query_flag;

pub fn professor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_professores).post(create_professor))
        .route("/estatisticas", get(estatisticas))
        .route("/status/:status", get(professores_por_status))
        .route(
            "/:id",
            get(get_professor)
                .put(update_professor)
                .delete(delete_professor),
        )
        .route("/:id/reativar", patch(reativar_professor))
}

fn split_query(query: ProfessorListQuery) -> AppResult<(ProfessorFilter, PaginationParams)> {
    let status = match query.status.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_status(raw)?),
        _ => None,
    };
    let filter = ProfessorFilter {
        search: query.search.filter(|s| !s.trim().is_empty()),
        status,
        ativo: query_flag(query.ativo.as_deref()),
    };
    Ok((filter, PaginationParams::from_query(query.page, query.limit)))
}

/// List professors
#[utoipa::path(
    get,
    path = "/api/professores",
    tag = "Professores",
    params(ProfessorListQuery),
    responses(
        (status = 200, description = "Página de professores"),
        (status = 400, description = "Status inválido")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_professores(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ProfessorListQuery>,
) -> AppResult<Json<Paginated<Professor>>> {
    let (filter, params) = split_query(query)?;
    Ok(Json(state.professores().list(filter, params).await?))
}

/// Get a professor by id
#[utoipa::path(
    get,
    path = "/api/professores/{id}",
    tag = "Professores",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor encontrado", body = Professor),
        (status = 404, description = "Professor não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_professor(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<Professor>> {
    Ok(Json(state.professores().get(id).await?))
}

/// Active professors with a given status
#[utoipa::path(
    get,
    path = "/api/professores/status/{status}",
    tag = "Professores",
    params(("status" = String, Path, description = "ativo, inativo, licenca ou ferias")),
    responses(
        (status = 200, description = "Professores com o status", body = [Professor]),
        (status = 400, description = "Status inválido")
    ),
    security(("bearer_auth" = []))
)]
pub async fn professores_por_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Professor>>> {
    Ok(Json(state.professores().by_status(&status).await?))
}

/// Professor statistics
#[utoipa::path(
    get,
    path = "/api/professores/estatisticas",
    tag = "Professores",
    responses((status = 200, description = "Estatísticas", body = ProfessorEstatisticas)),
    security(("bearer_auth" = []))
)]
pub async fn estatisticas(State(state): State<AppState>) -> AppResult<Json<ProfessorEstatisticas>> {
    Ok(Json(state.professores().estatisticas().await?))
}

/// Register a professor
#[utoipa::path(
    post,
    path = "/api/professores",
    tag = "Professores",
    request_body = ProfessorForm,
    responses(
        (status = 201, description = "Professor cadastrado"),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 409, description = "CPF ou email já cadastrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_professor(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(form): ValidatedJson<ProfessorForm>,
) -> AppResult<Created<Professor>> {
    require_manager(&current)?;
    let professor = state.professores().create(form, current.id()).await?;
    Ok(Created(professor, "Professor cadastrado com sucesso"))
}

/// Replace a professor's data
#[utoipa::path(
    put,
    path = "/api/professores/{id}",
    tag = "Professores",
    params(("id" = i32, Path, description = "Professor ID")),
    request_body = ProfessorForm,
    responses(
        (status = 200, description = "Professor atualizado"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Professor não encontrado"),
        (status = 409, description = "CPF ou email já cadastrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_professor(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
    ValidatedJson(form): ValidatedJson<ProfessorForm>,
) -> AppResult<Json<ApiResponse<Professor>>> {
    require_manager(&current)?;
    let professor = state.professores().update(id, form).await?;
    Ok(Json(ApiResponse::with_message(
        professor,
        "Professor atualizado com sucesso",
    )))
}

/// Deactivate and soft-delete a professor
#[utoipa::path(
    delete,
    path = "/api/professores/{id}",
    tag = "Professores",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor removido"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Professor não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_professor(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<()>>> {
    require_manager(&current)?;
    state.professores().delete(id).await?;
    Ok(Json(ApiResponse::message("Professor removido com sucesso")))
}

/// Restore a soft-deleted professor
#[utoipa::path(
    patch,
    path = "/api/professores/{id}/reativar",
    tag = "Professores",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor reativado"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Professor não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reativar_professor(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<Professor>>> {
    require_manager(&current)?;
    let professor = state.professores().reactivate(id).await?;
    Ok(Json(ApiResponse::with_message(
        professor,
        "Professor reativado com sucesso",
    )))
}
