//! Student use cases.

use async_trait::async_trait;
use chrono::Datelike;
use std::sync::Arc;

use crate::domain::{
    AlunoEstatisticas, AlunoFilter, AlunoForm, AlunoResponse, AlunosDaTurma, Normalize,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};
use crate::utils::dates;

/// Student service trait for dependency injection.
#[async_trait]
pub trait AlunoService: Send + Sync {
    async fn list(
        &self,
        filter: AlunoFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<AlunoResponse>>;

    async fn get(&self, id: i32) -> AppResult<AlunoResponse>;

    /// `usuario_id` is the authenticated caller, when there is one.
    async fn create(&self, form: AlunoForm, usuario_id: Option<i32>) -> AppResult<AlunoResponse>;

    async fn update(&self, id: i32, form: AlunoForm) -> AppResult<AlunoResponse>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn reactivate(&self, id: i32) -> AppResult<AlunoResponse>;

    async fn by_turma(&self, turma: &str) -> AppResult<AlunosDaTurma>;

    async fn estatisticas(&self) -> AppResult<AlunoEstatisticas>;
}

/// Concrete implementation of AlunoService
pub struct AlunoManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AlunoManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_cpf_free(&self, cpf: Option<&str>, current: Option<i32>) -> AppResult<()> {
        let Some(cpf) = cpf else { return Ok(()) };
        match self.uow.alunos().find_by_cpf(cpf).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(AppError::conflict("CPF já cadastrado"))
            }
            _ => Ok(()),
        }
    }

    /// `<year><sequence>`, starting from the current student count and
    /// skipping numbers already in use.
    async fn next_numero_matricula(&self) -> AppResult<String> {
        let repo = self.uow.alunos();
        let year = dates::today().year();
        let mut sequence = repo.count(AlunoFilter::default()).await? + 1;

        loop {
            let candidate = format!("{}{:04}", year, sequence);
            if !repo.numero_matricula_exists(&candidate).await? {
                return Ok(candidate);
            }
            sequence += 1;
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AlunoService for AlunoManager<U> {
    async fn list(
        &self,
        filter: AlunoFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<AlunoResponse>> {
        let (alunos, total) = self.uow.alunos().list(filter, params.clone()).await?;
        let today = dates::today();
        Ok(Paginated::new(alunos, &params, total).map(|a| AlunoResponse::new(a, today)))
    }

    async fn get(&self, id: i32) -> AppResult<AlunoResponse> {
        let aluno = self.uow.alunos().find_by_id(id).await?.ok_or_not_found("Aluno")?;
        Ok(AlunoResponse::new(aluno, dates::today()))
    }

    async fn create(&self, form: AlunoForm, usuario_id: Option<i32>) -> AppResult<AlunoResponse> {
        let form = form.normalized();
        self.ensure_cpf_free(form.cpf.as_deref(), None).await?;

        let numero = match form.numero_matricula.clone() {
            Some(numero) => {
                if self.uow.alunos().numero_matricula_exists(&numero).await? {
                    return Err(AppError::conflict("Número de matrícula já cadastrado"));
                }
                numero
            }
            None => self.next_numero_matricula().await?,
        };

        let aluno = self.uow.alunos().create(form, numero, usuario_id).await?;
        tracing::info!(aluno_id = aluno.id, numero = ?aluno.numero_matricula, "Aluno created");

        Ok(AlunoResponse::new(aluno, dates::today()))
    }

    async fn update(&self, id: i32, form: AlunoForm) -> AppResult<AlunoResponse> {
        let form = form.normalized();
        let current = self.uow.alunos().find_by_id(id).await?.ok_or_not_found("Aluno")?;
        self.ensure_cpf_free(form.cpf.as_deref(), Some(id)).await?;

        if let Some(numero) = form.numero_matricula.as_deref() {
            if current.numero_matricula.as_deref() != Some(numero)
                && self.uow.alunos().numero_matricula_exists(numero).await?
            {
                return Err(AppError::conflict("Número de matrícula já cadastrado"));
            }
        }

        let aluno = self.uow.alunos().update(id, form).await?;
        tracing::info!(aluno_id = id, "Aluno updated");

        Ok(AlunoResponse::new(aluno, dates::today()))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.alunos().delete(id).await?;
        tracing::info!(aluno_id = id, "Aluno deleted");
        Ok(())
    }

    async fn reactivate(&self, id: i32) -> AppResult<AlunoResponse> {
        let aluno = self.uow.alunos().set_ativo(id, true).await?;
        tracing::info!(aluno_id = id, "Aluno reactivated");
        Ok(AlunoResponse::new(aluno, dates::today()))
    }

    async fn by_turma(&self, turma: &str) -> AppResult<AlunosDaTurma> {
        let today = dates::today();
        let alunos: Vec<AlunoResponse> = self
            .uow
            .alunos()
            .list_by_turma(turma)
            .await?
            .into_iter()
            .map(|a| AlunoResponse::new(a, today))
            .collect();

        Ok(AlunosDaTurma {
            turma: turma.to_string(),
            total: alunos.len(),
            alunos,
        })
    }

    async fn estatisticas(&self) -> AppResult<AlunoEstatisticas> {
        let repo = self.uow.alunos();
        let active = AlunoFilter {
            ativo: Some(true),
            ..Default::default()
        };
        let inactive = AlunoFilter {
            ativo: Some(false),
            ..Default::default()
        };

        let (total_alunos, total_inativos, alunos_por_turma, com_restricao) = tokio::try_join!(
            repo.count(active),
            repo.count(inactive),
            repo.count_by_turma(),
            repo.count_with_restricao(),
        )?;

        Ok(AlunoEstatisticas {
            total_alunos,
            total_inativos,
            alunos_por_turma,
            alunos_com_restricao_alimentar: com_restricao,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Sexo, TurmaCount};
    use crate::infra::MockAlunoRepository;
    use crate::services::test_support::{sample_aluno, TestUow};
    use chrono::NaiveDate;

    fn service(repo: MockAlunoRepository) -> AlunoManager<TestUow> {
        AlunoManager::new(Arc::new(TestUow::new().with_alunos(repo)))
    }

    fn form() -> AlunoForm {
        AlunoForm {
            nome: " Ana Clara ".into(),
            data_nasc: NaiveDate::from_ymd_opt(2014, 3, 9).unwrap(),
            sexo: Sexo::F,
            cpf: Some("52998224725".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_cpf() {
        let mut repo = MockAlunoRepository::new();
        repo.expect_find_by_cpf()
            .withf(|cpf| cpf == "529.982.247-25")
            .returning(|_| Ok(Some(sample_aluno(3, "Outra"))));

        let err = service(repo).create(form(), None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "CPF já cadastrado"));
    }

    #[tokio::test]
    async fn test_create_generates_next_free_numero() {
        let year = dates::today().year();
        let taken = format!("{}0005", year);
        let expected = format!("{}0006", year);

        let mut repo = MockAlunoRepository::new();
        repo.expect_find_by_cpf().returning(|_| Ok(None));
        repo.expect_count().returning(|_| Ok(4));
        repo.expect_numero_matricula_exists()
            .returning(move |numero| Ok(numero == taken));
        let check = expected.clone();
        repo.expect_create()
            .withf(move |form, numero, usuario| {
                form.nome == "Ana Clara" && numero == &check && *usuario == Some(2)
            })
            .returning(|_, numero, _| {
                let mut aluno = sample_aluno(10, "Ana Clara");
                aluno.numero_matricula = Some(numero);
                Ok(aluno)
            });

        let created = service(repo).create(form(), Some(2)).await.unwrap();
        assert_eq!(created.aluno.numero_matricula, Some(expected));
    }

    #[tokio::test]
    async fn test_update_allows_own_cpf() {
        let mut repo = MockAlunoRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(sample_aluno(id, "Ana"))));
        repo.expect_find_by_cpf()
            .returning(|_| Ok(Some(sample_aluno(1, "Ana"))));
        repo.expect_update()
            .returning(|id, _| Ok(sample_aluno(id, "Ana Clara")));

        let updated = service(repo).update(1, form()).await.unwrap();
        assert_eq!(updated.aluno.nome, "Ana Clara");
    }

    #[tokio::test]
    async fn test_update_rejects_cpf_of_other_student() {
        let mut repo = MockAlunoRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(sample_aluno(id, "Ana"))));
        repo.expect_find_by_cpf()
            .returning(|_| Ok(Some(sample_aluno(2, "Bia"))));

        let err = service(repo).update(1, form()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut repo = MockAlunoRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo).get(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref e) if e == "Aluno"));
    }

    #[tokio::test]
    async fn test_by_turma_counts_students() {
        let mut repo = MockAlunoRepository::new();
        repo.expect_list_by_turma()
            .withf(|turma| turma == "A")
            .returning(|_| Ok(vec![sample_aluno(1, "Ana"), sample_aluno(2, "Bia")]));

        let turma = service(repo).by_turma("A").await.unwrap();
        assert_eq!(turma.total, 2);
        assert_eq!(turma.alunos[1].aluno.nome, "Bia");
    }

    #[tokio::test]
    async fn test_estatisticas() {
        let mut repo = MockAlunoRepository::new();
        repo.expect_count()
            .returning(|filter| Ok(if filter.ativo == Some(true) { 8 } else { 2 }));
        repo.expect_count_by_turma().returning(|| {
            Ok(vec![TurmaCount {
                turma: Some("A".into()),
                total: 8,
            }])
        });
        repo.expect_count_with_restricao().returning(|| Ok(1));

        let stats = service(repo).estatisticas().await.unwrap();
        assert_eq!(stats.total_alunos, 8);
        assert_eq!(stats.total_inativos, 2);
        assert_eq!(stats.alunos_por_turma.len(), 1);
        assert_eq!(stats.alunos_com_restricao_alimentar, 1);
    }
}
