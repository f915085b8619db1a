//! Migration: Create the staff users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Nome).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Usuarios::Email)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Senha).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Usuarios::Cargo)
                            .string_len(20)
                            .not_null()
                            .default("voluntario"),
                    )
                    .col(
                        ColumnDef::new(Usuarios::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Usuarios::UltimoLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Usuarios::Avatar).text().null())
                    .col(ColumnDef::new(Usuarios::Telefone).string_len(20).null())
                    .col(ColumnDef::new(Usuarios::DataNascimento).date().null())
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Usuarios {
    Table,
    Id,
    Nome,
    Email,
    Senha,
    Cargo,
    Ativo,
    UltimoLogin,
    Avatar,
    Telefone,
    DataNascimento,
    CreatedAt,
    UpdatedAt,
}
