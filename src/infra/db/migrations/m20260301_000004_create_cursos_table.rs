//! Migration: Create the courses table with soft delete.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_usuarios_table::Usuarios;
use super::m20260301_000003_create_professores_table::Professores;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cursos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cursos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cursos::Nome).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Cursos::Codigo)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Cursos::Descricao).text().null())
                    .col(
                        ColumnDef::new(Cursos::Categoria)
                            .string_len(30)
                            .not_null()
                            .default("outros"),
                    )
                    .col(
                        ColumnDef::new(Cursos::Nivel)
                            .string_len(20)
                            .not_null()
                            .default("iniciante"),
                    )
                    .col(ColumnDef::new(Cursos::CargaHorariaTotal).integer().not_null())
                    .col(ColumnDef::new(Cursos::DuracaoMeses).integer().not_null())
                    .col(ColumnDef::new(Cursos::IdadeMinima).integer().null())
                    .col(ColumnDef::new(Cursos::IdadeMaxima).integer().null())
                    .col(ColumnDef::new(Cursos::VagasDisponiveis).integer().not_null())
                    .col(
                        ColumnDef::new(Cursos::VagasOcupadas)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Cursos::DataInicio).date().not_null())
                    .col(ColumnDef::new(Cursos::DataFim).date().not_null())
                    .col(ColumnDef::new(Cursos::HorarioInicio).time().not_null())
                    .col(ColumnDef::new(Cursos::HorarioFim).time().not_null())
                    .col(ColumnDef::new(Cursos::DiasSemana).json().not_null())
                    .col(ColumnDef::new(Cursos::Local).string_len(200).not_null())
                    .col(ColumnDef::new(Cursos::Sala).string_len(50).null())
                    .col(ColumnDef::new(Cursos::MaterialNecessario).text().null())
                    .col(ColumnDef::new(Cursos::PreRequisitos).text().null())
                    .col(ColumnDef::new(Cursos::Objetivos).text().null())
                    .col(ColumnDef::new(Cursos::Metodologia).text().null())
                    .col(ColumnDef::new(Cursos::Avaliacao).text().null())
                    .col(
                        ColumnDef::new(Cursos::Certificado)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Cursos::ValorCurso)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Cursos::Gratuito)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Cursos::Status)
                            .string_len(30)
                            .not_null()
                            .default("planejado"),
                    )
                    .col(ColumnDef::new(Cursos::ProfessorId).integer().not_null())
                    .col(ColumnDef::new(Cursos::UsuarioId).integer().not_null())
                    .col(ColumnDef::new(Cursos::Observacoes).text().null())
                    .col(ColumnDef::new(Cursos::FotoUrl).string_len(500).null())
                    .col(
                        ColumnDef::new(Cursos::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Cursos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cursos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cursos::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cursos_professor")
                            .from(Cursos::Table, Cursos::ProfessorId)
                            .to(Professores::Table, Professores::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cursos_usuario")
                            .from(Cursos::Table, Cursos::UsuarioId)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cursos_deleted_at")
                    .table(Cursos::Table)
                    .col(Cursos::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cursos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cursos {
    Table,
    Id,
    Nome,
    Codigo,
    Descricao,
    Categoria,
    Nivel,
    CargaHorariaTotal,
    DuracaoMeses,
    IdadeMinima,
    IdadeMaxima,
    VagasDisponiveis,
    VagasOcupadas,
    DataInicio,
    DataFim,
    HorarioInicio,
    HorarioFim,
    DiasSemana,
    Local,
    Sala,
    MaterialNecessario,
    PreRequisitos,
    Objetivos,
    Metodologia,
    Avaliacao,
    Certificado,
    ValorCurso,
    Gratuito,
    Status,
    ProfessorId,
    UsuarioId,
    Observacoes,
    FotoUrl,
    Ativo,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
