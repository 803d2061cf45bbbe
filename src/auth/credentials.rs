//! Request credential sources
//!
//! A session token can arrive in the `token` cookie or in an
//! `Authorization: Bearer` header. Each transport is a [`CredentialSource`];
//! [`extract_token`] tries them in a fixed order and the first hit wins.

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "token";

/// Somewhere in a request that may carry a session token
pub trait CredentialSource: Send + Sync {
    /// Short label for logs
    fn name(&self) -> &'static str;

    /// The raw token, or `None` when this source carries nothing usable
    fn extract(&self, headers: &HeaderMap) -> Option<String>;
}

/// Session cookie
pub struct CookieSource {
    cookie_name: &'static str,
}

impl CookieSource {
    pub const fn new(cookie_name: &'static str) -> Self {
        Self { cookie_name }
    }
}

impl CredentialSource for CookieSource {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| {
                let (key, val) = pair.trim().split_once('=')?;
                (key.trim() == self.cookie_name).then(|| val.trim())
            })
            // an empty cookie (e.g. after logout) counts as absent
            .find(|val| !val.is_empty())
            .map(str::to_string)
    }
}

/// `Authorization: Bearer <token>` header
pub struct BearerSource;

impl CredentialSource for BearerSource {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;

        // Exactly "Bearer <token>"; any other shape means no credential
        let parts: Vec<&str> = value.split(' ').collect();
        match parts.as_slice() {
            ["Bearer", token] if !token.is_empty() => Some((*token).to_string()),
            _ => None,
        }
    }
}

static COOKIE_SOURCE: CookieSource = CookieSource::new(SESSION_COOKIE_NAME);
static BEARER_SOURCE: BearerSource = BearerSource;

/// Sources in the order they are consulted
pub static CREDENTIAL_SOURCES: [&dyn CredentialSource; 2] = [&COOKIE_SOURCE, &BEARER_SOURCE];

/// First token found across [`CREDENTIAL_SOURCES`]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    CREDENTIAL_SOURCES.iter().find_map(|source| {
        let token = source.extract(headers)?;
        tracing::trace!(source = source.name(), "Credential found");
        Some(token)
    })
}
