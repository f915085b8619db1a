//! Migration: Create the students table.

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
                    .table(Alunos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alunos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alunos::Nome).string_len(100).not_null())
                    .col(ColumnDef::new(Alunos::DataNasc).date().not_null())
                    .col(ColumnDef::new(Alunos::Cpf).string_len(14).null().unique_key())
                    .col(ColumnDef::new(Alunos::Rg).string_len(20).null())
                    .col(ColumnDef::new(Alunos::Sexo).string_len(10).not_null())
                    .col(ColumnDef::new(Alunos::Telefone).string_len(20).null())
                    .col(ColumnDef::new(Alunos::Email).string_len(150).null())
                    .col(ColumnDef::new(Alunos::Endereco).string_len(200).null())
                    .col(ColumnDef::new(Alunos::Numero).string_len(10).null())
                    .col(ColumnDef::new(Alunos::Complemento).string_len(100).null())
                    .col(ColumnDef::new(Alunos::Bairro).string_len(100).null())
                    .col(ColumnDef::new(Alunos::Cidade).string_len(100).null())
                    .col(ColumnDef::new(Alunos::Estado).string_len(2).null())
                    .col(ColumnDef::new(Alunos::Cep).string_len(9).null())
                    .col(ColumnDef::new(Alunos::NomeResponsavel).string_len(100).null())
                    .col(ColumnDef::new(Alunos::CpfResponsavel).string_len(14).null())
                    .col(ColumnDef::new(Alunos::TelefoneResponsavel).string_len(20).null())
                    .col(ColumnDef::new(Alunos::EmailResponsavel).string_len(150).null())
                    .col(ColumnDef::new(Alunos::Parentesco).string_len(50).null())
                    .col(ColumnDef::new(Alunos::Turma).string_len(50).null())
                    .col(ColumnDef::new(Alunos::Serie).string_len(20).null())
                    .col(ColumnDef::new(Alunos::Escola).string_len(150).null())
                    .col(ColumnDef::new(Alunos::RestricaoAlimentar).text().null())
                    .col(ColumnDef::new(Alunos::Medicamentos).text().null())
                    .col(ColumnDef::new(Alunos::ObservacoesMedicas).text().null())
                    .col(
                        ColumnDef::new(Alunos::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Alunos::DataMatricula).date().not_null())
                    .col(
                        ColumnDef::new(Alunos::NumeroMatricula)
                            .string_len(20)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Alunos::Foto).text().null())
                    .col(ColumnDef::new(Alunos::Documentos).json().not_null())
                    .col(ColumnDef::new(Alunos::UsuarioId).integer().null())
                    .col(
                        ColumnDef::new(Alunos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alunos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alunos_usuario")
                            .from(Alunos::Table, Alunos::UsuarioId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alunos_nome")
                    .table(Alunos::Table)
                    .col(Alunos::Nome)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alunos_turma_ativo")
                    .table(Alunos::Table)
                    .col(Alunos::Turma)
                    .col(Alunos::Ativo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alunos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Alunos {
    Table,
    Id,
    Nome,
    DataNasc,
    Cpf,
    Rg,
    Sexo,
    Telefone,
    Email,
    Endereco,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    Estado,
    Cep,
    NomeResponsavel,
    CpfResponsavel,
    TelefoneResponsavel,
    EmailResponsavel,
    Parentesco,
    Turma,
    Serie,
    Escola,
    RestricaoAlimentar,
    Medicamentos,
    ObservacoesMedicas,
    Ativo,
    DataMatricula,
    NumeroMatricula,
    Foto,
    Documentos,
    UsuarioId,
    CreatedAt,
    UpdatedAt,
}
