//! Password value object.
//!
//! Wraps an Argon2 PHC hash so plain text never leaves the auth flow.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hash verified against when the account does not exist, so an unknown email
/// costs the same as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"placeholder-password", &salt)
        .map(|h| h.to_string())
        .ok()
});

#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a new plain text password.
    ///
    /// # Errors
    /// Returns a field error on `senha` if the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::field(
                "senha",
                format!("Senha deve ter pelo menos {} caracteres", MIN_PASSWORD_LENGTH),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password. A malformed stored hash never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        verify_hash(plain_text, &self.hash)
    }

    /// Burn one verification against a throwaway hash.
    pub fn verify_dummy(plain_text: &str) {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_hash(plain_text, hash);
        }
    }
}

fn verify_hash(plain_text: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("segredo123").unwrap();

        assert!(password.verify("segredo123"));
        assert!(!password.verify("segredo124"));
    }

    #[test]
    fn test_password_from_hash() {
        let password = Password::new("abcdef").unwrap();
        let restored = Password::from_hash(password.as_str().to_string());
        assert!(restored.verify("abcdef"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("mesmaSenha").unwrap();
        let pass2 = Password::new("mesmaSenha").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify("mesmaSenha"));
        assert!(pass2.verify("mesmaSenha"));
    }

    #[test]
    fn test_password_too_short() {
        let err = Password::new("12345").unwrap_err();
        assert!(matches!(err, AppError::InvalidFields(ref f) if f[0].field == "senha"));
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(Password::new("123456").is_ok());
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let password = Password::from_hash("not-a-phc-string".to_string());
        assert!(!password.verify("anything"));
    }
}
