//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20260301_000001_create_usuarios_table;
mod m20260301_000002_create_alunos_table;
mod m20260301_000003_create_professores_table;
mod m20260301_000004_create_cursos_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_usuarios_table::Migration),
            Box::new(m20260301_000002_create_alunos_table::Migration),
            Box::new(m20260301_000003_create_professores_table::Migration),
            Box::new(m20260301_000004_create_cursos_table::Migration),
        ]
    }
}
