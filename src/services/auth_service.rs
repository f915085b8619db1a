//! Authentication service - login, registration, token verification and logout.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Cargo, NewUser, Password, PublicUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, UnitOfWork};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub email: String,
    pub cargo: String,
    /// Token id, used for revocation
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Body returned by login and register
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "Login realizado com sucesso")]
    pub message: String,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires
    #[schema(example = 604800)]
    pub expires_in: i64,
    pub user: PublicUser,
}

/// Data for a new account
#[derive(Debug, Clone)]
pub struct Registration {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub cargo: Option<Cargo>,
    pub telefone: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: String, senha: String) -> AppResult<AuthResponse>;

    async fn register(&self, registration: Registration) -> AppResult<AuthResponse>;

    /// Resolve a bearer token to its active user.
    async fn authenticate(&self, token: &str) -> AppResult<(User, Claims)>;

    /// Revoke the token until it expires (needs Redis; no-op otherwise).
    async fn logout(&self, claims: &Claims) -> AppResult<()>;

    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn generate_token(user: &User, config: &Config, now: DateTime<Utc>) -> AppResult<(String, i64)> {
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        cargo: user.cargo.as_str().to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok((token, config.jwt_expiration_hours * SECONDS_PER_HOUR))
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Option<Arc<Cache>>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, cache: Option<Arc<Cache>>, config: Config) -> Self {
        Self { uow, cache, config }
    }

    fn respond(&self, user: &User, message: &str) -> AppResult<AuthResponse> {
        let (token, expires_in) = generate_token(user, &self.config, Utc::now())?;
        Ok(AuthResponse {
            message: message.to_string(),
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
            user: PublicUser::from(user),
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, senha: String) -> AppResult<AuthResponse> {
        let email = normalize_email(&email);

        // Unknown emails still pay for one hash verification.
        let user = match self.uow.users().find_by_email(&email).await? {
            Some(user) => user,
            None => {
                Password::verify_dummy(&senha);
                tracing::warn!("Login failed: unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !Password::from_hash(user.senha_hash.clone()).verify(&senha) {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        if !user.ativo {
            tracing::warn!(user_id = user.id, "Login refused: inactive user");
            return Err(AppError::InactiveUser);
        }

        self.uow.users().touch_last_login(user.id, Utc::now()).await?;
        tracing::info!(user_id = user.id, "User logged in");

        self.respond(&user, "Login realizado com sucesso")
    }

    async fn register(&self, registration: Registration) -> AppResult<AuthResponse> {
        let email = normalize_email(&registration.email);
        let users = self.uow.users();

        if users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email já cadastrado"));
        }

        let cargo = registration.cargo.unwrap_or_default();
        if cargo.is_elevated() && users.count().await? > 0 {
            tracing::warn!(cargo = cargo.as_str(), "Public registration of elevated cargo refused");
            return Err(AppError::Forbidden);
        }

        let senha_hash = Password::new(&registration.senha)?.into_string();
        let user = users
            .create(NewUser {
                nome: registration.nome.trim().to_string(),
                email,
                senha_hash,
                cargo,
                telefone: registration.telefone,
                data_nascimento: registration.data_nascimento,
            })
            .await?;

        tracing::info!(user_id = user.id, cargo = cargo.as_str(), "User registered");
        self.respond(&user, "Usuário criado com sucesso")
    }

    async fn authenticate(&self, token: &str) -> AppResult<(User, Claims)> {
        let claims = self.verify_token(token)?;

        if let Some(cache) = &self.cache {
            if cache.is_token_revoked(&claims.jti).await? {
                return Err(AppError::InvalidToken);
            }
        }

        let user = self
            .uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.ativo {
            return Err(AppError::InactiveUser);
        }

        Ok((user, claims))
    }

    async fn logout(&self, claims: &Claims) -> AppResult<()> {
        match &self.cache {
            Some(cache) => {
                let remaining = (claims.exp - Utc::now().timestamp()).max(1) as u64;
                cache.revoke_token(&claims.jti, remaining).await?;
                tracing::info!(user_id = claims.sub, "Token revoked");
            }
            None => tracing::debug!("Logout without Redis: token not revoked"),
        }
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
