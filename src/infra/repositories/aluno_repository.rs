//! Student repository. Students are hard-deleted.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use serde_json::Value;

use super::entities::aluno::{self, ActiveModel, Column, Entity as AlunoEntity};
use crate::domain::{Aluno, AlunoFilter, AlunoForm, Aniversariante, TurmaCount};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AlunoRepository: Send + Sync {
    /// One page ordered by nome, plus the filtered total
    async fn list(
        &self,
        filter: AlunoFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Aluno>, u64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Aluno>>;

    async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Aluno>>;

    async fn numero_matricula_exists(&self, numero: &str) -> AppResult<bool>;

    /// Count using the same filter as `list`
    async fn count(&self, filter: AlunoFilter) -> AppResult<u64>;

    /// `form` must be normalized with `data_matricula` resolved.
    async fn create(
        &self,
        form: AlunoForm,
        numero_matricula: String,
        usuario_id: Option<i32>,
    ) -> AppResult<Aluno>;

    /// Replace the writable fields. Absent `ativo`, `data_matricula`,
    /// `numero_matricula` and `documentos` keep their stored values.
    async fn update(&self, id: i32, form: AlunoForm) -> AppResult<Aluno>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn set_ativo(&self, id: i32, ativo: bool) -> AppResult<Aluno>;

    /// Active students of a class, ordered by nome
    async fn list_by_turma(&self, turma: &str) -> AppResult<Vec<Aluno>>;

    /// Active students per class, largest first
    async fn count_by_turma(&self) -> AppResult<Vec<TurmaCount>>;

    /// Distinct non-null classes among active students
    async fn count_distinct_turmas(&self) -> AppResult<u64>;

    /// Active students with a dietary restriction
    async fn count_with_restricao(&self) -> AppResult<u64>;

    /// Students created in `[since, until)`; `until = None` means open-ended.
    async fn count_created_between(
        &self,
        since: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
        only_active: bool,
    ) -> AppResult<u64>;

    async fn active_birth_dates(&self) -> AppResult<Vec<NaiveDate>>;

    async fn active_birthdays(&self) -> AppResult<Vec<Aniversariante>>;

    /// Newest active students
    async fn latest_active(&self, limit: u64) -> AppResult<Vec<Aluno>>;
}

pub struct AlunoStore {
    db: DatabaseConnection,
}

impl AlunoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> AppResult<aluno::Model> {
        AlunoEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Aluno"))
    }
}

fn apply_filter(mut query: Select<AlunoEntity>, filter: &AlunoFilter) -> Select<AlunoEntity> {
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(Column::Nome.contains(search))
                .add(Column::NumeroMatricula.contains(search))
                .add(Column::Cpf.contains(search)),
        );
    }
    if let Some(ativo) = filter.ativo {
        query = query.filter(Column::Ativo.eq(ativo));
    }
    if let Some(turma) = filter.turma.as_deref().filter(|t| !t.is_empty()) {
        query = query.filter(Column::Turma.eq(turma));
    }
    query
}

fn documentos(value: Option<Vec<Value>>) -> Value {
    Value::Array(value.unwrap_or_default())
}

/// Copy the personal, address, guardian, academic and medical fields.
fn apply_form(active: &mut ActiveModel, form: &AlunoForm) {
    active.nome = Set(form.nome.clone());
    active.data_nasc = Set(form.data_nasc);
    active.cpf = Set(form.cpf.clone());
    active.rg = Set(form.rg.clone());
    active.sexo = Set(form.sexo.as_str().to_string());
    active.telefone = Set(form.telefone.clone());
    active.email = Set(form.email.clone());
    active.endereco = Set(form.endereco.clone());
    active.numero = Set(form.numero.clone());
    active.complemento = Set(form.complemento.clone());
    active.bairro = Set(form.bairro.clone());
    active.cidade = Set(form.cidade.clone());
    active.estado = Set(form.estado.clone());
    active.cep = Set(form.cep.clone());
    active.nome_responsavel = Set(form.nome_responsavel.clone());
    active.cpf_responsavel = Set(form.cpf_responsavel.clone());
    active.telefone_responsavel = Set(form.telefone_responsavel.clone());
    active.email_responsavel = Set(form.email_responsavel.clone());
    active.parentesco = Set(form.parentesco.clone());
    active.turma = Set(form.turma.clone());
    active.serie = Set(form.serie.clone());
    active.escola = Set(form.escola.clone());
    active.restricao_alimentar = Set(form.restricao_alimentar.clone());
    active.medicamentos = Set(form.medicamentos.clone());
    active.observacoes_medicas = Set(form.observacoes_medicas.clone());
    active.foto = Set(form.foto.clone());
}

#[derive(Debug, FromQueryResult)]
struct TurmaRow {
    turma: Option<String>,
    total: i64,
}

#[async_trait]
impl AlunoRepository for AlunoStore {
    async fn list(
        &self,
        filter: AlunoFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Aluno>, u64)> {
        let paginator = apply_filter(AlunoEntity::find(), &filter)
            .order_by_asc(Column::Nome)
            .order_by_asc(Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page() - 1).await?;

        Ok((models.into_iter().map(Aluno::from).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Aluno>> {
        let result = AlunoEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Aluno::from))
    }

    async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Aluno>> {
        let result = AlunoEntity::find()
            .filter(Column::Cpf.eq(cpf))
            .one(&self.db)
            .await?;
        Ok(result.map(Aluno::from))
    }

    async fn numero_matricula_exists(&self, numero: &str) -> AppResult<bool> {
        let count = AlunoEntity::find()
            .filter(Column::NumeroMatricula.eq(numero))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn count(&self, filter: AlunoFilter) -> AppResult<u64> {
        Ok(apply_filter(AlunoEntity::find(), &filter)
            .count(&self.db)
            .await?)
    }

    async fn create(
        &self,
        form: AlunoForm,
        numero_matricula: String,
        usuario_id: Option<i32>,
    ) -> AppResult<Aluno> {
        let now = Utc::now();
        let mut active = ActiveModel {
            ativo: Set(form.ativo.unwrap_or(true)),
            data_matricula: Set(form.data_matricula.unwrap_or_else(|| now.date_naive())),
            numero_matricula: Set(Some(numero_matricula)),
            documentos: Set(documentos(form.documentos.clone())),
            usuario_id: Set(usuario_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_form(&mut active, &form);

        let model = active.insert(&self.db).await?;
        Ok(Aluno::from(model))
    }

    async fn update(&self, id: i32, form: AlunoForm) -> AppResult<Aluno> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        apply_form(&mut active, &form);

        if let Some(ativo) = form.ativo {
            active.ativo = Set(ativo);
        }
        if let Some(data) = form.data_matricula {
            active.data_matricula = Set(data);
        }
        if let Some(numero) = form.numero_matricula.clone() {
            active.numero_matricula = Set(Some(numero));
        }
        if form.documentos.is_some() {
            active.documentos = Set(documentos(form.documentos.clone()));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Aluno::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = AlunoEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Aluno"));
        }
        Ok(())
    }

    async fn set_ativo(&self, id: i32, ativo: bool) -> AppResult<Aluno> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.ativo = Set(ativo);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Aluno::from(model))
    }

    async fn list_by_turma(&self, turma: &str) -> AppResult<Vec<Aluno>> {
        let models = AlunoEntity::find()
            .filter(Column::Turma.eq(turma))
            .filter(Column::Ativo.eq(true))
            .order_by_asc(Column::Nome)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Aluno::from).collect())
    }

    async fn count_by_turma(&self) -> AppResult<Vec<TurmaCount>> {
        let rows = AlunoEntity::find()
            .select_only()
            .column(Column::Turma)
            .column_as(Expr::col(Column::Id).count(), "total")
            .filter(Column::Ativo.eq(true))
            .group_by(Column::Turma)
            .into_model::<TurmaRow>()
            .all(&self.db)
            .await?;

        let mut counts: Vec<TurmaCount> = rows
            .into_iter()
            .map(|r| TurmaCount {
                turma: r.turma,
                total: r.total,
            })
            .collect();
        counts.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.turma.cmp(&b.turma)));
        Ok(counts)
    }

    async fn count_distinct_turmas(&self) -> AppResult<u64> {
        let turmas: Vec<String> = AlunoEntity::find()
            .select_only()
            .column(Column::Turma)
            .distinct()
            .filter(Column::Ativo.eq(true))
            .filter(Column::Turma.is_not_null())
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(turmas.len() as u64)
    }

    async fn count_with_restricao(&self) -> AppResult<u64> {
        Ok(AlunoEntity::find()
            .filter(Column::Ativo.eq(true))
            .filter(Column::RestricaoAlimentar.is_not_null())
            .count(&self.db)
            .await?)
    }

    async fn count_created_between(
        &self,
        since: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
        only_active: bool,
    ) -> AppResult<u64> {
        let mut query = AlunoEntity::find().filter(Column::CreatedAt.gte(since));
        if let Some(until) = until {
            query = query.filter(Column::CreatedAt.lt(until));
        }
        if only_active {
            query = query.filter(Column::Ativo.eq(true));
        }
        Ok(query.count(&self.db).await?)
    }

    async fn active_birth_dates(&self) -> AppResult<Vec<NaiveDate>> {
        Ok(AlunoEntity::find()
            .select_only()
            .column(Column::DataNasc)
            .filter(Column::Ativo.eq(true))
            .into_tuple()
            .all(&self.db)
            .await?)
    }

    async fn active_birthdays(&self) -> AppResult<Vec<Aniversariante>> {
        let rows: Vec<(i32, String, NaiveDate)> = AlunoEntity::find()
            .select_only()
            .columns([Column::Id, Column::Nome, Column::DataNasc])
            .filter(Column::Ativo.eq(true))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, nome, data_nasc)| Aniversariante { id, nome, data_nasc })
            .collect())
    }

    async fn latest_active(&self, limit: u64) -> AppResult<Vec<Aluno>> {
        let models = AlunoEntity::find()
            .filter(Column::Ativo.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Aluno::from).collect())
    }
}
