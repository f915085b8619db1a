//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through `ServiceContainer`, which depends on
//! service traits rather than implementations.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AlunoManager, AlunoService, AuthService, Authenticator, CursoManager, CursoService,
    DashboardManager, DashboardService, ProfessorManager, ProfessorService,
};
use crate::config::Config;
use crate::infra::{Cache, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn alunos(&self) -> Arc<dyn AlunoService>;

    fn professores(&self) -> Arc<dyn ProfessorService>;

    fn cursos(&self) -> Arc<dyn CursoService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth: Arc<dyn AuthService>,
    alunos: Arc<dyn AlunoService>,
    professores: Arc<dyn ProfessorService>,
    cursos: Arc<dyn CursoService>,
    dashboard: Arc<dyn DashboardService>,
}

impl Services {
    pub fn new(
        auth: Arc<dyn AuthService>,
        alunos: Arc<dyn AlunoService>,
        professores: Arc<dyn ProfessorService>,
        cursos: Arc<dyn CursoService>,
        dashboard: Arc<dyn DashboardService>,
    ) -> Self {
        Self {
            auth,
            alunos,
            professores,
            cursos,
            dashboard,
        }
    }

    /// Wire every service over one SeaORM connection. `cache` enables token
    /// revocation on logout.
    pub fn from_connection(
        db: DatabaseConnection,
        cache: Option<Arc<Cache>>,
        config: Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), cache, config)),
            Arc::new(AlunoManager::new(uow.clone())),
            Arc::new(ProfessorManager::new(uow.clone())),
            Arc::new(CursoManager::new(uow.clone())),
            Arc::new(DashboardManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn alunos(&self) -> Arc<dyn AlunoService> {
        self.alunos.clone()
    }

    fn professores(&self) -> Arc<dyn ProfessorService> {
        self.professores.clone()
    }

    fn cursos(&self) -> Arc<dyn CursoService> {
        self.cursos.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard.clone()
    }
}
