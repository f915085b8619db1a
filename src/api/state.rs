//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{
    AlunoService, AuthService, CursoService, DashboardService, ProfessorService,
    ServiceContainer, Services,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub database: Arc<Database>,
    /// Present only when `REDIS_URL` is configured
    pub cache: Option<Arc<Cache>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the service container over the database connection.
    pub fn from_config(database: Arc<Database>, cache: Option<Arc<Cache>>, config: Config) -> Self {
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            cache.clone(),
            config.clone(),
        ));

        Self::new(services, database, cache, config)
    }

    /// Create state with a manually injected service container.
    pub fn new(
        services: Arc<dyn ServiceContainer>,
        database: Arc<Database>,
        cache: Option<Arc<Cache>>,
        config: Config,
    ) -> Self {
        Self {
            services,
            database,
            cache,
            config: Arc::new(config),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.services.auth()
    }

    pub fn alunos(&self) -> Arc<dyn AlunoService> {
        self.services.alunos()
    }

    pub fn professores(&self) -> Arc<dyn ProfessorService> {
        self.services.professores()
    }

    pub fn cursos(&self) -> Arc<dyn CursoService> {
        self.services.cursos()
    }

    pub fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.services.dashboard()
    }
}
