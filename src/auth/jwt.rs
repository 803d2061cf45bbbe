//! Session token generation and validation
//! Stateless HS256 JWTs: validity is decided by signature and expiry only

use crate::{config::AppConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(rename = "sub")]
    pub user_id: Uuid,

    pub email: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

/// Why a token was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Unparseable, bad signature, wrong algorithm or missing claims
    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            config.security.jwt_secret.expose_secret().as_bytes(),
            config.security.token_ttl_secs,
        )
    }

    /// Create JWT service from a raw secret
    pub fn new(secret: &[u8], ttl_secs: u64) -> Result<Self, AppError> {
        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 bytes)".to_string()));
        }

        let ttl_secs = i64::try_from(ttl_secs)
            .map_err(|_| AppError::Config("token TTL out of range".to_string()))?;

        // Only HS256 is accepted, whatever the token header claims
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp"]);
        validation.leeway = 0;
        // Expiry is checked by hand so that `now == exp` already counts as expired
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a session token valid from now
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a session token as if the current time were `now`
    pub fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let expiration = now + self.ttl;

        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal(format!("Failed to encode session token: {}", e))
        })
    }

    /// Validate and decode token
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate and decode token against the given clock
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                TokenError::Malformed
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            tracing::debug!(exp = claims.exp, "Token expired");
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
