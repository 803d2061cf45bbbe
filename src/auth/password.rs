//! Password hashing and verification using Argon2id

use crate::{config::SecurityConfig, error::AppError};
use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use rand::rngs::OsRng;

/// Password hasher with configurable parameters
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create hasher with explicit cost parameters
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::Config(format!("Invalid Argon2 params: {}", e)))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Ok(Self { argon2 })
    }

    /// Create hasher from the security section of the config
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        Self::with_params(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
        )
    }

    /// Hash a password with a fresh random salt.
    ///
    /// The output is a PHC string carrying algorithm, params and salt, so the
    /// same plaintext never hashes to the same value twice.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a mismatch and for a hash that cannot be parsed.
    /// The comparison itself is constant time.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Failed to parse password hash: {:?}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Validate password against the minimum length policy
    pub fn validate_password_policy(password: &str, min_length: usize) -> Result<(), AppError> {
        if password.chars().count() < min_length {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                min_length
            )));
        }

        Ok(())
    }
}
