//! Dashboard handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::{DashboardResumo, DashboardStats};
use crate::errors::AppResult;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/resumo", get(resumo))
}

/// Full dashboard statistics
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses((status = 200, description = "Estatísticas do painel", body = DashboardStats)),
    security(("bearer_auth" = []))
)]
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.dashboard().stats().await?))
}

/// Short summary with upcoming birthdays
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses((status = 200, description = "Resumo do painel", body = DashboardResumo)),
    security(("bearer_auth" = []))
)]
pub async fn resumo(State(state): State<AppState>) -> AppResult<Json<DashboardResumo>> {
    Ok(Json(state.dashboard().resumo().await?))
}
