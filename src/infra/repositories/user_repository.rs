//! Staff user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::entities::usuario::{self, ActiveModel, Entity as UsuarioEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Lookup by the normalized (lowercase) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Total users, active or not
    async fn count(&self) -> AppResult<u64>;

    async fn count_active(&self) -> AppResult<u64>;

    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<()>;
}

pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UsuarioEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UsuarioEntity::find()
            .filter(usuario::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(UsuarioEntity::find().count(&self.db).await?)
    }

    async fn count_active(&self) -> AppResult<u64> {
        Ok(UsuarioEntity::find()
            .filter(usuario::Column::Ativo.eq(true))
            .count(&self.db)
            .await?)
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            nome: Set(user.nome),
            email: Set(user.email),
            senha: Set(user.senha_hash),
            cargo: Set(user.cargo.as_str().to_string()),
            ativo: Set(true),
            ultimo_login: Set(None),
            avatar: Set(None),
            telefone: Set(user.telefone),
            data_nascimento: Set(user.data_nascimento),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<()> {
        let user = UsuarioEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Usuário"))?;

        let mut active: ActiveModel = user.into();
        active.ultimo_login = Set(Some(at));
        active.update(&self.db).await?;
        Ok(())
    }
}
