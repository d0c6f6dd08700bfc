// --- File: crates/quadra_admin/src/auth.rs ---

use axum::{
    body::Body as AxumBody,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use quadra_common::services::{CredentialService, IssuedToken};
use quadra_common::QuadraError;
use quadra_config::env_vars::SECRET_MARKER;
use quadra_config::AdminConfig;
use sha2::Sha256;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Upper bound for the configured session length (one year)
pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Senha inválida.")]
    InvalidPassword,
    #[error("Token de acesso ausente.")]
    MissingToken,
    #[error("Token de acesso inválido.")]
    InvalidToken,
    #[error("Token de acesso expirado.")]
    ExpiredToken,
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<AuthError> for QuadraError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(msg) => QuadraError::InternalError(msg),
            other => QuadraError::AuthError(other.to_string()),
        }
    }
}

/// Stateless admin sessions.
///
/// A token is `base64url(expiry) "." hex(hmac_sha256(key, base64url(expiry)))`
/// where expiry is a Unix timestamp in seconds. Nothing is stored server side;
/// rotating the key invalidates every issued token. No token is accepted
/// while login is disabled.
pub struct HmacCredentialService {
    password: Option<String>,
    key: Vec<u8>,
    ttl: Duration,
}

fn is_configured(value: &str) -> bool {
    !value.is_empty() && value != SECRET_MARKER
}

impl HmacCredentialService {
    pub fn new(password: Option<String>, key: Vec<u8>, ttl: Duration) -> Self {
        Self { password, key, ttl }
    }

    /// Builds the service from the `[admin]` section.
    ///
    /// Login stays disabled while the password is unset. Without a token
    /// secret a random key is drawn for this process, so sessions end on
    /// restart.
    pub fn from_config(config: &AdminConfig) -> Self {
        let password = if is_configured(&config.password) {
            Some(config.password.clone())
        } else {
            warn!("Admin password is not configured; admin login is disabled");
            None
        };

        let key = if is_configured(&config.token_secret) {
            config.token_secret.as_bytes().to_vec()
        } else {
            warn!("Admin token secret is not configured; using a random per-process key");
            random_key()
        };

        let ttl_minutes = config.token_ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES);
        if ttl_minutes != config.token_ttl_minutes {
            warn!(
                "Admin token TTL of {} minutes is out of range; using {}",
                config.token_ttl_minutes, ttl_minutes
            );
        }

        Self::new(password, key, Duration::minutes(ttl_minutes))
    }

    pub fn login_enabled(&self) -> bool {
        self.password.is_some()
    }

    fn sign(&self, payload: &str) -> Result<String, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Issues a token that expires at `expires_at`.
    pub fn token_expiring_at(&self, expires_at: DateTime<Utc>) -> Result<String, AuthError> {
        let payload = URL_SAFE_NO_PAD.encode(expires_at.timestamp().to_string());
        let signature = self.sign(&payload)?;
        Ok(format!("{}.{}", payload, signature))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Checks signature and expiry against `now`.
    pub fn check_token(&self, token: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        if !self.login_enabled() {
            return Err(AuthError::InvalidToken);
        }
        let (payload, signature) = token.split_once('.').ok_or(AuthError::InvalidToken)?;

        let expected = self.sign(payload)?;
        if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            return Err(AuthError::InvalidToken);
        }

        let expiry = URL_SAFE_NO_PAD
            .decode(payload)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(AuthError::InvalidToken)?;

        if now.timestamp() >= expiry {
            return Err(AuthError::ExpiredToken);
        }
        Ok(())
    }
}

// 256 bits from two v4 UUIDs (122 random bits each)
fn random_key() -> Vec<u8> {
    let mut key = Uuid::new_v4().as_bytes().to_vec();
    key.extend_from_slice(Uuid::new_v4().as_bytes());
    key
}

impl CredentialService for HmacCredentialService {
    fn verify_password(&self, candidate: &str) -> bool {
        match &self.password {
            Some(password) => constant_time_eq(candidate.as_bytes(), password.as_bytes()),
            None => false,
        }
    }

    fn issue_token(&self) -> Result<IssuedToken, QuadraError> {
        let expires_at = Utc::now() + self.ttl;
        let token = self.token_expiring_at(expires_at)?;
        Ok(IssuedToken {
            token,
            expires_at: expires_at.naive_utc(),
        })
    }

    fn validate_token(&self, token: &str) -> Result<(), QuadraError> {
        Ok(self.check_token(token, Utc::now())?)
    }
}

/// Axum middleware guarding the admin routes.
/// Expects `Authorization: Bearer <token>`.
pub async fn admin_auth_middleware(
    State(credentials): State<Arc<dyn CredentialService>>,
    req: Request<AxumBody>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        debug!("Admin request without bearer token");
        return QuadraError::from(AuthError::MissingToken).into_response();
    };

    match credentials.validate_token(token) {
        Ok(()) => next.run(req).await,
        Err(err) => {
            debug!("Admin request rejected: {}", err);
            err.into_response()
        }
    }
}
