//! Unit of Work: a single access point to every repository.
//!
//! Services receive repositories from here so they share one connection pool.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    AlunoRepository, AlunoStore, CursoRepository, CursoStore, ProfessorRepository,
    ProfessorStore, UserRepository, UserStore,
};

/// Repository access trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn alunos(&self) -> Arc<dyn AlunoRepository>;

    fn professores(&self) -> Arc<dyn ProfessorRepository>;

    fn cursos(&self) -> Arc<dyn CursoRepository>;
}

/// SeaORM-backed Unit of Work
pub struct Persistence {
    users: Arc<UserStore>,
    alunos: Arc<AlunoStore>,
    professores: Arc<ProfessorStore>,
    cursos: Arc<CursoStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            alunos: Arc::new(AlunoStore::new(db.clone())),
            professores: Arc::new(ProfessorStore::new(db.clone())),
            cursos: Arc::new(CursoStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn alunos(&self) -> Arc<dyn AlunoRepository> {
        self.alunos.clone()
    }

    fn professores(&self) -> Arc<dyn ProfessorRepository> {
        self.professores.clone()
    }

    fn cursos(&self) -> Arc<dyn CursoRepository> {
        self.cursos.clone()
    }
}
