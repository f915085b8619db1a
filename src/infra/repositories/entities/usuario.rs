//! Staff user database entity.

use sea_orm::entity::prelude::*;

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    #[sea_orm(unique)]
    pub email: String,
    pub senha: String,
    pub cargo: String,
    pub ativo: bool,
    pub ultimo_login: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub avatar: Option<String>,
    pub telefone: Option<String>,
    pub data_nascimento: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            nome: model.nome,
            email: model.email,
            senha_hash: model.senha,
            cargo: model.cargo.parse().unwrap_or_default(),
            ativo: model.ativo,
            ultimo_login: model.ultimo_login,
            avatar: model.avatar,
            telefone: model.telefone,
            data_nascimento: model.data_nascimento,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
