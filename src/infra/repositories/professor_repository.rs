//! Professor repository with soft delete support.
//!
//! Every query excludes rows with `deleted_at` set, except the `*_with_deleted`
//! lookups used for uniqueness checks and reactivation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::entities::professor::{ActiveModel, Column, Entity as ProfessorEntity, Model};
use crate::domain::{
    FormacaoCount, Professor, ProfessorFilter, ProfessorForm, ProfessorStatus,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfessorRepository: Send + Sync {
    async fn list(
        &self,
        filter: ProfessorFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Professor>, u64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Professor>>;

    /// The unique index spans soft-deleted rows, so these include them.
    async fn find_by_cpf_with_deleted(&self, cpf: &str) -> AppResult<Option<Professor>>;

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<Professor>>;

    async fn create(&self, form: ProfessorForm, usuario_id: i32) -> AppResult<Professor>;

    /// Replace the writable fields. Absent `status` and `ativo` are kept.
    async fn update(&self, id: i32, form: ProfessorForm) -> AppResult<Professor>;

    /// Mark inactive and hide the row.
    async fn soft_delete(&self, id: i32) -> AppResult<()>;

    /// Clear the deletion, set `ativo` and status `ativo`.
    async fn reactivate(&self, id: i32) -> AppResult<Professor>;

    /// Active professors with the given status, ordered by nome
    async fn list_by_status(&self, status: ProfessorStatus) -> AppResult<Vec<Professor>>;

    async fn count(&self, filter: ProfessorFilter) -> AppResult<u64>;

    /// Active professors per formacao, largest first
    async fn count_by_formacao(&self) -> AppResult<Vec<FormacaoCount>>;

    /// Non-null experience of active professors
    async fn experiencia_values(&self) -> AppResult<Vec<i32>>;
}

pub struct ProfessorStore {
    db: DatabaseConnection,
}

impl ProfessorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn visible() -> Select<ProfessorEntity> {
        ProfessorEntity::find().filter(Column::DeletedAt.is_null())
    }

    async fn find_visible_model(&self, id: i32) -> AppResult<Model> {
        Self::visible()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Professor"))
    }
}

fn apply_filter(mut query: Select<ProfessorEntity>, filter: &ProfessorFilter) -> Select<ProfessorEntity> {
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(Column::Nome.contains(search))
                .add(Column::Cpf.contains(search))
                .add(Column::Email.contains(search))
                .add(Column::Formacao.contains(search)),
        );
    }
    if let Some(status) = filter.status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(ativo) = filter.ativo {
        query = query.filter(Column::Ativo.eq(ativo));
    }
    query
}

fn apply_form(active: &mut ActiveModel, form: &ProfessorForm) {
    active.nome = Set(form.nome.clone());
    active.cpf = Set(form.cpf.clone());
    active.rg = Set(form.rg.clone());
    active.data_nasc = Set(form.data_nasc);
    active.sexo = Set(form.sexo.as_str().to_string());
    active.email = Set(form.email.clone());
    active.telefone = Set(form.telefone.clone());
    active.endereco = Set(form.endereco.clone());
    active.numero = Set(form.numero.clone());
    active.complemento = Set(form.complemento.clone());
    active.bairro = Set(form.bairro.clone());
    active.cidade = Set(form.cidade.clone());
    active.estado = Set(form.estado.clone());
    active.cep = Set(form.cep.clone());
    active.formacao = Set(form.formacao.clone());
    active.especializacao = Set(form.especializacao.clone());
    active.experiencia_anos = Set(form.experiencia_anos);
    active.registro_profissional = Set(form.registro_profissional.clone());
    active.salario = Set(form.salario);
    active.data_admissao = Set(form.data_admissao);
    active.data_demissao = Set(form.data_demissao);
    active.carga_horaria_semanal = Set(form.carga_horaria_semanal);
    active.observacoes = Set(form.observacoes.clone());
    active.foto_url = Set(form.foto_url.clone());
}

#[derive(Debug, FromQueryResult)]
struct FormacaoRow {
    formacao: String,
    total: i64,
}

#[async_trait]
impl ProfessorRepository for ProfessorStore {
    async fn list(
        &self,
        filter: ProfessorFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Professor>, u64)> {
        let paginator = apply_filter(Self::visible(), &filter)
            .order_by_asc(Column::Nome)
            .order_by_asc(Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page() - 1).await?;

        Ok((models.into_iter().map(Professor::from).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Professor>> {
        let result = Self::visible()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await?;
        Ok(result.map(Professor::from))
    }

    async fn find_by_cpf_with_deleted(&self, cpf: &str) -> AppResult<Option<Professor>> {
        let result = ProfessorEntity::find()
            .filter(Column::Cpf.eq(cpf))
            .one(&self.db)
            .await?;
        Ok(result.map(Professor::from))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<Professor>> {
        let result = ProfessorEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(Professor::from))
    }

    async fn create(&self, form: ProfessorForm, usuario_id: i32) -> AppResult<Professor> {
        let now = Utc::now();
        let mut active = ActiveModel {
            status: Set(form.status.unwrap_or_default().as_str().to_string()),
            ativo: Set(form.ativo.unwrap_or(true)),
            usuario_id: Set(usuario_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };
        apply_form(&mut active, &form);

        let model = active.insert(&self.db).await?;
        Ok(Professor::from(model))
    }

    async fn update(&self, id: i32, form: ProfessorForm) -> AppResult<Professor> {
        let mut active: ActiveModel = self.find_visible_model(id).await?.into();
        apply_form(&mut active, &form);

        if let Some(status) = form.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(ativo) = form.ativo {
            active.ativo = Set(ativo);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Professor::from(model))
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

    async fn reactivate(&self, id: i32) -> AppResult<Professor> {
        let professor = ProfessorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Professor"))?;

        let mut active: ActiveModel = professor.into();
        active.deleted_at = Set(None);
        active.ativo = Set(true);
        active.status = Set(ProfessorStatus::Ativo.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Professor::from(model))
    }

    async fn list_by_status(&self, status: ProfessorStatus) -> AppResult<Vec<Professor>> {
        let models = Self::visible()
            .filter(Column::Status.eq(status.as_str()))
            .filter(Column::Ativo.eq(true))
            .order_by_asc(Column::Nome)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Professor::from).collect())
    }

    async fn count(&self, filter: ProfessorFilter) -> AppResult<u64> {
        Ok(apply_filter(Self::visible(), &filter)
            .count(&self.db)
            .await?)
    }

    async fn count_by_formacao(&self) -> AppResult<Vec<FormacaoCount>> {
        let rows = Self::visible()
            .select_only()
            .column(Column::Formacao)
            .column_as(Expr::col(Column::Id).count(), "total")
            .filter(Column::Ativo.eq(true))
            .group_by(Column::Formacao)
            .into_model::<FormacaoRow>()
            .all(&self.db)
            .await?;

        let mut counts: Vec<FormacaoCount> = rows
            .into_iter()
            .map(|r| FormacaoCount {
                formacao: r.formacao,
                total: r.total,
            })
            .collect();
        counts.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.formacao.cmp(&b.formacao)));
        Ok(counts)
    }

    async fn experiencia_values(&self) -> AppResult<Vec<i32>> {
        Ok(Self::visible()
            .select_only()
            .column(Column::ExperienciaAnos)
            .filter(Column::Ativo.eq(true))
            .filter(Column::ExperienciaAnos.is_not_null())
            .into_tuple()
            .all(&self.db)
            .await?)
    }
}
