//! Course use cases. Courses are soft-deleted and must reference a visible
//! professor.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Categoria, Curso, CursoFilter, CursoForm, CursoStatus, Normalize};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Course service trait for dependency injection.
#[async_trait]
pub trait CursoService: Send + Sync {
    async fn list(&self, filter: CursoFilter, params: PaginationParams)
        -> AppResult<Paginated<Curso>>;

    async fn get(&self, id: i32) -> AppResult<Curso>;

    async fn create(&self, form: CursoForm, usuario_id: i32) -> AppResult<Curso>;

    async fn update(&self, id: i32, form: CursoForm) -> AppResult<Curso>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn reactivate(&self, id: i32) -> AppResult<Curso>;
}

pub fn parse_categoria(raw: &str) -> AppResult<Categoria> {
    raw.trim()
        .to_lowercase()
        .parse()
        .map_err(|_| AppError::validation("Categoria inválida"))
}

pub fn parse_curso_status(raw: &str) -> AppResult<CursoStatus> {
    raw.trim()
        .to_lowercase()
        .parse()
        .map_err(|_| AppError::validation("Status inválido"))
}

/// Concrete implementation of CursoService
pub struct CursoManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CursoManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_professor(&self, professor_id: i32) -> AppResult<()> {
        match self.uow.professores().find_by_id(professor_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::field("professor_id", "Professor não encontrado")),
        }
    }

    async fn ensure_codigo_free(&self, codigo: &str, current: Option<i32>) -> AppResult<()> {
        match self.uow.cursos().find_by_codigo_with_deleted(codigo).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(AppError::conflict("Código já cadastrado"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CursoService for CursoManager<U> {
    async fn list(
        &self,
        filter: CursoFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Curso>> {
        let (cursos, total) = self.uow.cursos().list(filter, params.clone()).await?;
        Ok(Paginated::new(cursos, &params, total))
    }

    async fn get(&self, id: i32) -> AppResult<Curso> {
        self.uow.cursos().find_by_id(id).await?.ok_or_not_found("Curso")
    }

    async fn create(&self, form: CursoForm, usuario_id: i32) -> AppResult<Curso> {
        let form = form.normalized();
        form.check_consistency()?;
        self.ensure_codigo_free(&form.codigo, None).await?;
        self.ensure_professor(form.professor_id).await?;

        let curso = self.uow.cursos().create(form, usuario_id).await?;
        tracing::info!(curso_id = curso.id, codigo = %curso.codigo, "Curso created");
        Ok(curso)
    }

    async fn update(&self, id: i32, form: CursoForm) -> AppResult<Curso> {
        let current = self.get(id).await?;
        let mut form = form.normalized();
        // Occupied seats not sent keep the stored count, which must still fit.
        form.vagas_ocupadas = form.vagas_ocupadas.or(Some(current.vagas_ocupadas));
        form.check_consistency()?;

        self.ensure_codigo_free(&form.codigo, Some(id)).await?;
        if form.professor_id != current.professor_id {
            self.ensure_professor(form.professor_id).await?;
        }

        let curso = self.uow.cursos().update(id, form).await?;
        tracing::info!(curso_id = id, "Curso updated");
        Ok(curso)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.cursos().soft_delete(id).await?;
        tracing::info!(curso_id = id, "Curso deleted");
        Ok(())
    }

    async fn reactivate(&self, id: i32) -> AppResult<Curso> {
        let curso = self.uow.cursos().reactivate(id).await?;
        tracing::info!(curso_id = id, "Curso reactivated");
        Ok(curso)
    }
}
