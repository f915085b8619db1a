//! Migration: Create the professors table with soft delete.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_usuarios_table::Usuarios;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Professores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professores::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professores::Nome).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Professores::Cpf)
                            .string_len(14)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Professores::Rg).string_len(20).null())
                    .col(ColumnDef::new(Professores::DataNasc).date().not_null())
                    .col(ColumnDef::new(Professores::Sexo).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Professores::Email)
                            .string_len(150)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Professores::Telefone).string_len(20).null())
                    .col(ColumnDef::new(Professores::Endereco).string_len(200).null())
                    .col(ColumnDef::new(Professores::Numero).string_len(10).null())
                    .col(ColumnDef::new(Professores::Complemento).string_len(100).null())
                    .col(ColumnDef::new(Professores::Bairro).string_len(100).null())
                    .col(ColumnDef::new(Professores::Cidade).string_len(100).null())
                    .col(ColumnDef::new(Professores::Estado).string_len(2).null())
                    .col(ColumnDef::new(Professores::Cep).string_len(9).null())
                    .col(ColumnDef::new(Professores::Formacao).string_len(200).not_null())
                    .col(ColumnDef::new(Professores::Especializacao).text().null())
                    .col(ColumnDef::new(Professores::ExperienciaAnos).integer().null())
                    .col(
                        ColumnDef::new(Professores::RegistroProfissional)
                            .string_len(50)
                            .null(),
                    )
                    .col(ColumnDef::new(Professores::Salario).double().null())
                    .col(ColumnDef::new(Professores::DataAdmissao).date().not_null())
                    .col(ColumnDef::new(Professores::DataDemissao).date().null())
                    .col(
                        ColumnDef::new(Professores::Status)
                            .string_len(20)
                            .not_null()
                            .default("ativo"),
                    )
                    .col(
                        ColumnDef::new(Professores::CargaHorariaSemanal)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Professores::Observacoes).text().null())
                    .col(ColumnDef::new(Professores::FotoUrl).string_len(500).null())
                    .col(ColumnDef::new(Professores::UsuarioId).integer().not_null())
                    .col(
                        ColumnDef::new(Professores::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Professores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professores::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professores::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_professores_usuario")
                            .from(Professores::Table, Professores::UsuarioId)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_professores_deleted_at")
                    .table(Professores::Table)
                    .col(Professores::DeletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_professores_status")
                    .table(Professores::Table)
                    .col(Professores::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Professores::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Professores {
    Table,
    Id,
    Nome,
    Cpf,
    Rg,
    DataNasc,
    Sexo,
    Email,
    Telefone,
    Endereco,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    Estado,
    Cep,
    Formacao,
    Especializacao,
    ExperienciaAnos,
    RegistroProfissional,
    Salario,
    DataAdmissao,
    DataDemissao,
    Status,
    CargaHorariaSemanal,
    Observacoes,
    FotoUrl,
    UsuarioId,
    Ativo,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
