//! Redis cache implementation.
//!
//! Backs the fixed-window rate limiter and the logout token blacklist.
//! Redis is optional: without `REDIS_URL` the application runs without it.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::Serialize;

use crate::config::{CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_REVOKED_TOKEN};
use crate::errors::{AppError, AppResult};

/// Outcome of one rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests seen in the current window, this one included
    pub count: u64,
    pub allowed: bool,
    /// Seconds until the window resets
    pub reset_in: u64,
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis at `url`.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }

    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Set a value with a TTL in seconds.
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds.max(1))
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    // =========================================================================
    // Rate limiting
    // =========================================================================

    /// Count one request for `identifier` in a fixed window.
    ///
    /// INCR creates the key, so the expiry is set only by the request that
    /// opened the window.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<RateLimitStatus> {
        let key = rate_limit_key(identifier);
        let mut conn = self.connection.clone();

        let count: u64 = conn.incr(&key, 1u64).await.map_err(cache_error)?;
        if count == 1 {
            let _: () = conn
                .expire(&key, window_seconds as i64)
                .await
                .map_err(cache_error)?;
        }

        let ttl: i64 = conn.ttl(&key).await.map_err(cache_error)?;
        let reset_in = if ttl > 0 { ttl as u64 } else { window_seconds };

        Ok(RateLimitStatus {
            count,
            allowed: count <= max_requests,
            reset_in,
        })
    }

    // =========================================================================
    // Token revocation
    // =========================================================================

    /// Blacklist a token id until the token would have expired anyway.
    pub async fn revoke_token(&self, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        self.set_with_ttl(&revoked_token_key(jti), &true, ttl_seconds)
            .await
    }

    pub async fn is_token_revoked(&self, jti: &str) -> AppResult<bool> {
        self.exists(&revoked_token_key(jti)).await
    }
}

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}

fn revoked_token_key(jti: &str) -> String {
    format!("{}{}", CACHE_PREFIX_REVOKED_TOKEN, jti)
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}
