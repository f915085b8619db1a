//! Dashboard aggregates over students and users.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::sync::Arc;

use crate::config::{
    DASHBOARD_LIST_LIMIT, GROWTH_SERIES_MONTHS, RECENT_ENROLLMENT_DAYS, UPCOMING_BIRTHDAY_DAYS,
};
use crate::domain::dashboard::{growth_windows, upcoming_birthdays, Distribuicoes, EstatisticasGerais};
use crate::domain::{
    AlunoFilter, CrescimentoMensal, DashboardResumo, DashboardStats, FaixasEtarias, UltimoAluno,
};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::utils::dates;

/// Dashboard service trait for dependency injection.
#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> AppResult<DashboardStats>;

    async fn resumo(&self) -> AppResult<DashboardResumo>;
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn active_only() -> AlunoFilter {
    AlunoFilter {
        ativo: Some(true),
        ..Default::default()
    }
}

/// Concrete implementation of DashboardService
pub struct DashboardManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn crescimento_mensal(&self, today: NaiveDate) -> AppResult<Vec<CrescimentoMensal>> {
        let repo = self.uow.alunos();
        let mut serie = Vec::new();

        for window in growth_windows(today, GROWTH_SERIES_MONTHS) {
            let total = repo
                .count_created_between(day_start(window.start), Some(day_start(window.end)), false)
                .await?;
            serie.push(CrescimentoMensal {
                mes: window.label,
                total,
            });
        }

        Ok(serie)
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardManager<U> {
    async fn stats(&self) -> AppResult<DashboardStats> {
        let alunos = self.uow.alunos();
        let users = self.uow.users();
        let today = dates::today();
        let recent_since = Utc::now() - Duration::days(RECENT_ENROLLMENT_DAYS);

        let (total_alunos, total_usuarios, alunos_inativos, alunos_recentes, alunos_com_restricao) =
            tokio::try_join!(
                alunos.count(active_only()),
                users.count_active(),
                alunos.count(AlunoFilter {
                    ativo: Some(false),
                    ..Default::default()
                }),
                alunos.count_created_between(recent_since, None, true),
                alunos.count_with_restricao(),
            )?;

        let (por_turma, birth_dates, ultimos, crescimento_mensal) = tokio::try_join!(
            alunos.count_by_turma(),
            alunos.active_birth_dates(),
            alunos.latest_active(DASHBOARD_LIST_LIMIT),
            self.crescimento_mensal(today),
        )?;

        Ok(DashboardStats {
            estatisticas_gerais: EstatisticasGerais {
                total_alunos,
                total_usuarios,
                alunos_inativos,
                alunos_recentes,
                alunos_com_restricao,
            },
            distribuicoes: Distribuicoes {
                por_turma,
                por_faixa_etaria: FaixasEtarias::from_birth_dates(&birth_dates, today),
            },
            ultimos_alunos: ultimos
                .into_iter()
                .map(|a| UltimoAluno {
                    id: a.id,
                    nome: a.nome,
                    turma: a.turma,
                    data_matricula: a.data_matricula,
                    created_at: a.created_at,
                })
                .collect(),
            crescimento_mensal,
        })
    }

    async fn resumo(&self) -> AppResult<DashboardResumo> {
        let alunos = self.uow.alunos();
        let today = dates::today();

        let (total_alunos, total_turmas, alunos_cadastrados_hoje, candidatos) = tokio::try_join!(
            alunos.count(active_only()),
            alunos.count_distinct_turmas(),
            alunos.count_created_between(day_start(today), None, false),
            alunos.active_birthdays(),
        )?;

        let (proximos_aniversarios, aniversariantes) = upcoming_birthdays(
            candidatos,
            today,
            UPCOMING_BIRTHDAY_DAYS,
            DASHBOARD_LIST_LIMIT as usize,
        );

        Ok(DashboardResumo {
            total_alunos,
            total_turmas,
            alunos_cadastrados_hoje,
            proximos_aniversarios,
            aniversariantes,
        })
    }
}
