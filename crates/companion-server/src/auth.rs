//! Session Authentication
//!
//! Verifies session tokens issued by the external auth provider. The token
//! is read from `Authorization: Bearer <token>` or, failing that, from the
//! `__session` cookie the provider sets for browsers.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use companion::SessionUser;

use crate::config::SessionKey;
use crate::AppState;

/// Cookie carrying the session token for browser requests
pub const SESSION_COOKIE: &str = "__session";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session verification is not configured")]
    NotConfigured,

    #[error("Invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Session token has no subject")]
    MissingSubject,
}

/// Claims read from a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub exp: usize,
}

/// Verifies session tokens against the configured key
pub struct SessionVerifier {
    key: Option<(DecodingKey, Validation)>,
}

impl SessionVerifier {
    /// Build a verifier; `None` rejects every token
    pub fn new(session_key: Option<&SessionKey>) -> anyhow::Result<Self> {
        let key = match session_key {
            Some(SessionKey::RsaPublicPem(pem)) => Some((
                DecodingKey::from_rsa_pem(pem.as_bytes())?,
                validation(Algorithm::RS256),
            )),
            Some(SessionKey::Secret(secret)) => Some((
                DecodingKey::from_secret(secret.as_bytes()),
                validation(Algorithm::HS256),
            )),
            None => None,
        };

        Ok(Self { key })
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Verify a token and resolve the caller
    pub fn verify(&self, token: &str) -> Result<SessionUser, AuthError> {
        let (key, validation) = self.key.as_ref().ok_or(AuthError::NotConfigured)?;
        let claims = decode::<SessionClaims>(token, key, validation)?.claims;

        if claims.sub.is_empty() {
            return Err(AuthError::MissingSubject);
        }

        Ok(SessionUser::new(claims.sub, claims.first_name))
    }

    /// Resolve the caller of a request, if it carries a valid session
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<SessionUser> {
        let token = session_token(headers)?;
        match self.verify(token) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Rejected session token: {}", e);
                None
            }
        }
    }
}

fn validation(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    // Provider session tokens carry `azp` rather than an audience
    validation.validate_aud = false;
    validation
}

/// Extract the session token from the bearer header or the session cookie
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|t| !t.is_empty())
}

/// Caller of the current request; `None` when anonymous.
///
/// Never rejects: handlers decide where a missing session matters, so that
/// request validation keeps its order.
#[derive(Debug, Clone)]
pub struct Session(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Session(state.sessions.authenticate(&parts.headers)))
    }
}
