//! Course repository with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::entities::curso::{dias_to_json, ActiveModel, Column, Entity as CursoEntity, Model};
use crate::domain::{Curso, CursoFilter, CursoForm};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CursoRepository: Send + Sync {
    async fn list(
        &self,
        filter: CursoFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Curso>, u64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Curso>>;

    /// Includes soft-deleted rows, which still hold their code.
    async fn find_by_codigo_with_deleted(&self, codigo: &str) -> AppResult<Option<Curso>>;

    async fn create(&self, form: CursoForm, usuario_id: i32) -> AppResult<Curso>;

    /// Replace the writable fields. Absent enums, flags, price and
    /// `vagas_ocupadas` keep their stored values.
    async fn update(&self, id: i32, form: CursoForm) -> AppResult<Curso>;

    async fn soft_delete(&self, id: i32) -> AppResult<()>;

    async fn reactivate(&self, id: i32) -> AppResult<Curso>;
}

pub struct CursoStore {
    db: DatabaseConnection,
}

impl CursoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn visible() -> Select<CursoEntity> {
        CursoEntity::find().filter(Column::DeletedAt.is_null())
    }

    async fn find_visible_model(&self, id: i32) -> AppResult<Model> {
        Self::visible()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Curso"))
    }
}

fn apply_filter(mut query: Select<CursoEntity>, filter: &CursoFilter) -> Select<CursoEntity> {
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(Column::Nome.contains(search))
                .add(Column::Codigo.contains(search))
                .add(Column::Descricao.contains(search)),
        );
    }
    if let Some(categoria) = filter.categoria {
        query = query.filter(Column::Categoria.eq(categoria.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(professor_id) = filter.professor_id {
        query = query.filter(Column::ProfessorId.eq(professor_id));
    }
    if let Some(ativo) = filter.ativo {
        query = query.filter(Column::Ativo.eq(ativo));
    }
    query
}

fn apply_form(active: &mut ActiveModel, form: &CursoForm) {
    active.nome = Set(form.nome.clone());
    active.codigo = Set(form.codigo.clone());
    active.descricao = Set(form.descricao.clone());
    active.carga_horaria_total = Set(form.carga_horaria_total);
    active.duracao_meses = Set(form.duracao_meses);
    active.idade_minima = Set(form.idade_minima);
    active.idade_maxima = Set(form.idade_maxima);
    active.vagas_disponiveis = Set(form.vagas_disponiveis);
    active.data_inicio = Set(form.data_inicio);
    active.data_fim = Set(form.data_fim);
    active.horario_inicio = Set(form.horario_inicio);
    active.horario_fim = Set(form.horario_fim);
    active.dias_semana = Set(dias_to_json(&form.dias_semana));
    active.local = Set(form.local.clone());
    active.sala = Set(form.sala.clone());
    active.material_necessario = Set(form.material_necessario.clone());
    active.pre_requisitos = Set(form.pre_requisitos.clone());
    active.objetivos = Set(form.objetivos.clone());
    active.metodologia = Set(form.metodologia.clone());
    active.avaliacao = Set(form.avaliacao.clone());
    active.professor_id = Set(form.professor_id);
    active.observacoes = Set(form.observacoes.clone());
    active.foto_url = Set(form.foto_url.clone());
}

#[async_trait]
impl CursoRepository for CursoStore {
    async fn list(
        &self,
        filter: CursoFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Curso>, u64)> {
        let paginator = apply_filter(Self::visible(), &filter)
            .order_by_asc(Column::Nome)
            .order_by_asc(Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page() - 1).await?;

        Ok((models.into_iter().map(Curso::from).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Curso>> {
        let result = Self::visible()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await?;
        Ok(result.map(Curso::from))
    }

    async fn find_by_codigo_with_deleted(&self, codigo: &str) -> AppResult<Option<Curso>> {
        let result = CursoEntity::find()
            .filter(Column::Codigo.eq(codigo))
            .one(&self.db)
            .await?;
        Ok(result.map(Curso::from))
    }

    async fn create(&self, form: CursoForm, usuario_id: i32) -> AppResult<Curso> {
        let now = Utc::now();
        let mut active = ActiveModel {
            categoria: Set(form.categoria.unwrap_or_default().as_str().to_string()),
            nivel: Set(form.nivel.unwrap_or_default().as_str().to_string()),
            status: Set(form.status.unwrap_or_default().as_str().to_string()),
            vagas_ocupadas: Set(form.vagas_ocupadas.unwrap_or(0)),
            certificado: Set(form.certificado.unwrap_or(true)),
            valor_curso: Set(form.valor_curso.unwrap_or(0.0)),
            gratuito: Set(form.gratuito.unwrap_or(true)),
            ativo: Set(form.ativo.unwrap_or(true)),
            usuario_id: Set(usuario_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };
        apply_form(&mut active, &form);

        let model = active.insert(&self.db).await?;
        Ok(Curso::from(model))
    }

    async fn update(&self, id: i32, form: CursoForm) -> AppResult<Curso> {
        let mut active: ActiveModel = self.find_visible_model(id).await?.into();
        apply_form(&mut active, &form);

        if let Some(categoria) = form.categoria {
            active.categoria = Set(categoria.as_str().to_string());
        }
        if let Some(nivel) = form.nivel {
            active.nivel = Set(nivel.as_str().to_string());
        }
        if let Some(status) = form.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(vagas) = form.vagas_ocupadas {
            active.vagas_ocupadas = Set(vagas);
        }
        if let Some(certificado) = form.certificado {
            active.certificado = Set(certificado);
        }
        if let Some(valor) = form.valor_curso {
            active.valor_curso = Set(valor);
        }
        if let Some(gratuito) = form.gratuito {
            active.gratuito = Set(gratuito);
        }
        if let Some(ativo) = form.ativo {
            active.ativo = Set(ativo);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Curso::from(model))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let mut active: ActiveModel = self.find_visible_model(id).await?.into();
        let now = Utc::now();
        active.ativo = Set(false);
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        Ok(())
    }

    async fn reactivate(&self, id: i32) -> AppResult<Curso> {
        let curso = CursoEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Curso"))?;

        let mut active: ActiveModel = curso.into();
        active.deleted_at = Set(None);
        active.ativo = Set(true);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Curso::from(model))
    }
}
