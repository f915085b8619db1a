//! Create-admin command - Seeds an administrator account.
//!
//! Public registration only hands out elevated cargos to the very first
//! account; later administrators are created here.

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::{Cargo, NewUser, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UserRepository, UserStore};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let users = UserStore::new(db.get_connection());

    let user = create_admin(&users, args).await?;
    tracing::info!(user_id = user.id, email = %user.email, "Administrator created");
    println!("Administrador criado: {} <{}>", user.nome, user.email);

    Ok(())
}

async fn create_admin(
    users: &dyn UserRepository,
    args: CreateAdminArgs,
) -> AppResult<crate::domain::User> {
    let email = args.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::field("email", "Email inválido"));
    }
    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("Email já cadastrado"));
    }

    let senha_hash = Password::new(&args.senha)?.into_string();
    users
        .create(NewUser {
            nome: args.nome.trim().to_string(),
            email,
            senha_hash,
            cargo: Cargo::Admin,
            telefone: None,
            data_nascimento: None,
        })
        .await
}
