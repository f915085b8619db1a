//! Professor use cases. Professors are soft-deleted and can be reactivated.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    professor::format_media, Professor, ProfessorEstatisticas, ProfessorFilter, ProfessorForm,
    ProfessorStatus, Normalize,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Professor service trait for dependency injection.
#[async_trait]
pub trait ProfessorService: Send + Sync {
    async fn list(
        &self,
        filter: ProfessorFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Professor>>;

    async fn get(&self, id: i32) -> AppResult<Professor>;

    /// Active professors with the given status string.
    async fn by_status(&self, status: &str) -> AppResult<Vec<Professor>>;

    async fn estatisticas(&self) -> AppResult<ProfessorEstatisticas>;

    async fn create(&self, form: ProfessorForm, usuario_id: i32) -> AppResult<Professor>;

    async fn update(&self, id: i32, form: ProfessorForm) -> AppResult<Professor>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn reactivate(&self, id: i32) -> AppResult<Professor>;
}

/// Parse a status path/query value, 400 when unknown.
pub fn parse_status(raw: &str) -> AppResult<ProfessorStatus> {
    raw.trim()
        .to_lowercase()
        .parse()
        .map_err(|_| AppError::validation("Status inválido"))
}

fn mean(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|v| i64::from(*v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// Concrete implementation of ProfessorService
pub struct ProfessorManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfessorManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// CPF and email stay reserved by soft-deleted professors too.
    async fn ensure_unique(&self, form: &ProfessorForm, current: Option<i32>) -> AppResult<()> {
        let repo = self.uow.professores();

        if let Some(cpf) = form.cpf.as_deref() {
            if let Some(existing) = repo.find_by_cpf_with_deleted(cpf).await? {
                if Some(existing.id) != current {
                    return Err(AppError::conflict("CPF já cadastrado"));
                }
            }
        }

        if let Some(email) = form.email.as_deref() {
            if let Some(existing) = repo.find_by_email_with_deleted(email).await? {
                if Some(existing.id) != current {
                    return Err(AppError::conflict("Email já cadastrado"));
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfessorService for ProfessorManager<U> {
    async fn list(
        &self,
        filter: ProfessorFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Professor>> {
        let (professores, total) = self.uow.professores().list(filter, params.clone()).await?;
        Ok(Paginated::new(professores, &params, total))
    }

    async fn get(&self, id: i32) -> AppResult<Professor> {
        self.uow
            .professores()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Professor")
    }

    async fn by_status(&self, status: &str) -> AppResult<Vec<Professor>> {
        let status = parse_status(status)?;
        self.uow.professores().list_by_status(status).await
    }

    async fn estatisticas(&self) -> AppResult<ProfessorEstatisticas> {
        let repo = self.uow.professores();
        let with_status = |status: ProfessorStatus| ProfessorFilter {
            status: Some(status),
            ativo: Some(true),
            ..Default::default()
        };

        let (total, ativos, inativos, licenca, ferias) = tokio::try_join!(
            repo.count(ProfessorFilter {
                ativo: Some(true),
                ..Default::default()
            }),
            repo.count(with_status(ProfessorStatus::Ativo)),
            repo.count(with_status(ProfessorStatus::Inativo)),
            repo.count(with_status(ProfessorStatus::Licenca)),
            repo.count(with_status(ProfessorStatus::Ferias)),
        )?;
        let (por_formacao, experiencias) =
            tokio::try_join!(repo.count_by_formacao(), repo.experiencia_values())?;

        Ok(ProfessorEstatisticas {
            total,
            ativos,
            inativos,
            licenca,
            ferias,
            por_formacao,
            media_experiencia: format_media(mean(&experiencias)),
        })
    }

    async fn create(&self, form: ProfessorForm, usuario_id: i32) -> AppResult<Professor> {
        let form = form.normalized();
        self.ensure_unique(&form, None).await?;

        let professor = self.uow.professores().create(form, usuario_id).await?;
        tracing::info!(professor_id = professor.id, "Professor created");
        Ok(professor)
    }

    async fn update(&self, id: i32, form: ProfessorForm) -> AppResult<Professor> {
        let form = form.normalized();
        self.get(id).await?;
        self.ensure_unique(&form, Some(id)).await?;

        let professor = self.uow.professores().update(id, form).await?;
        tracing::info!(professor_id = id, "Professor updated");
        Ok(professor)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.professores().soft_delete(id).await?;
        tracing::info!(professor_id = id, "Professor deactivated");
        Ok(())
    }

    async fn reactivate(&self, id: i32) -> AppResult<Professor> {
        let professor = self.uow.professores().reactivate(id).await?;
        tracing::info!(professor_id = id, "Professor reactivated");
        Ok(professor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormacaoCount, Sexo};
    use crate::infra::MockProfessorRepository;
    use crate::services::test_support::{sample_professor, TestUow};
    use chrono::NaiveDate;

    fn service(repo: MockProfessorRepository) -> ProfessorManager<TestUow> {
        ProfessorManager::new(Arc::new(TestUow::new().with_professores(repo)))
    }

    fn form() -> ProfessorForm {
        ProfessorForm {
            nome: "Carlos".into(),
            data_nasc: NaiveDate::from_ymd_opt(1985, 6, 1).unwrap(),
            sexo: Sexo::M,
            email: Some(" Carlos@ONG.org ".into()),
            formacao: "Pedagogia".into(),
            data_admissao: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("Licenca").unwrap(), ProfessorStatus::Licenca);
        assert!(matches!(parse_status("demitido"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2, 3]), Some(2.5));
    }

    #[tokio::test]
    async fn test_by_status_invalid_is_bad_request() {
        let err = service(MockProfessorRepository::new())
            .by_status("aposentado")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Status inválido"));
    }

    #[tokio::test]
    async fn test_create_rejects_email_of_deleted_teacher() {
        let mut repo = MockProfessorRepository::new();
        repo.expect_find_by_email_with_deleted()
            .withf(|email| email == "carlos@ong.org")
            .returning(|_| {
                let mut existing = sample_professor(4, "Carlos");
                existing.deleted_at = Some(chrono::Utc::now());
                Ok(Some(existing))
            });

        let err = service(repo).create(form(), 1).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Email já cadastrado"));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let mut repo = MockProfessorRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(sample_professor(id, "Carlos"))));
        repo.expect_find_by_email_with_deleted()
            .returning(|_| Ok(Some(sample_professor(4, "Carlos"))));
        repo.expect_update()
            .returning(|id, _| Ok(sample_professor(id, "Carlos")));

        let updated = service(repo).update(4, form()).await.unwrap();
        assert_eq!(updated.id, 4);
    }

    #[tokio::test]
    async fn test_update_hidden_teacher_is_not_found() {
        let mut repo = MockProfessorRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo).update(4, form()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_estatisticas() {
        let mut repo = MockProfessorRepository::new();
        repo.expect_count().returning(|filter| {
            Ok(match filter.status {
                None => 6,
                Some(ProfessorStatus::Ativo) => 3,
                Some(ProfessorStatus::Inativo) => 1,
                Some(ProfessorStatus::Licenca) => 1,
                Some(ProfessorStatus::Ferias) => 1,
            })
        });
        repo.expect_count_by_formacao().returning(|| {
            Ok(vec![FormacaoCount {
                formacao: "Pedagogia".into(),
                total: 6,
            }])
        });
        repo.expect_experiencia_values()
            .returning(|| Ok(vec![2, 5, 8, 11]));

        let stats = service(repo).estatisticas().await.unwrap();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.ativos, 3);
        assert_eq!(stats.ferias, 1);
        assert_eq!(stats.media_experiencia, "6.5");
    }
}
