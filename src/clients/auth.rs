//! Bearer-token lifecycle for the completion endpoint.
//!
//! Tokens are short-lived (documented at roughly 30 minutes). The manager
//! caches the current one and refreshes ahead of expiry; nothing here is
//! persisted, so a restart simply fetches a fresh token.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::RelayError;

/// Tokens are refreshed this many seconds before their stated expiry, so a
/// token is never used to initiate a call that could outlive it.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Fallback lifetime when the auth endpoint omits `expires_at`, just
/// inside the documented ~30-minute lifetime.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 29 * 60;

/// Raw expiry values above this are taken to be epoch milliseconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Normalize a raw `expires_at` value to epoch seconds.
///
/// The endpoint has been observed returning epoch milliseconds, but the
/// unit is undocumented, so magnitude decides: anything past 13 digits is
/// milliseconds. TODO: confirm the actual unit against the live endpoint
/// and drop the heuristic.
pub fn normalize_expiry(raw: i64) -> i64 {
    if raw > MILLIS_THRESHOLD { raw / 1000 } else { raw }
}

#[derive(Debug, Clone)]
pub struct CachedToken {
    pub token: String,
    /// Absolute expiry, epoch seconds.
    pub expires_at: i64,
}

impl CachedToken {
    /// Whether the token can still initiate a call at `now` without
    /// crossing into the expiry margin.
    pub fn is_fresh_at(&self, now: i64) -> bool {
        now < self.expires_at - TOKEN_EXPIRY_MARGIN_SECS
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    expires_at: Option<i64>,
}

pub struct TokenManager {
    http: reqwest::Client,
    auth_url: String,
    /// Pre-encoded Basic authorization blob.
    credentials: String,
    scope: String,
    cached: Option<CachedToken>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, auth_url: String, credentials: String, scope: String) -> Self {
        Self {
            http,
            auth_url,
            credentials,
            scope,
            cached: None,
        }
    }

    /// Return a usable bearer token, requesting a fresh one when the cache
    /// is empty or inside the expiry margin.
    ///
    /// Any failure (transport, non-2xx, malformed payload) surfaces as
    /// `RelayError::Auth`; the caller treats it as "summarization
    /// unavailable this cycle" rather than aborting anything.
    pub async fn get_token(&mut self) -> Result<String, RelayError> {
        let now = Utc::now().timestamp();
        if let Some(cached) = &self.cached
            && cached.is_fresh_at(now)
        {
            return Ok(cached.token.clone());
        }

        let fresh = self.request_token(now).await?;
        let token = fresh.token.clone();
        self.cached = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self, now: i64) -> Result<CachedToken, RelayError> {
        let response = self
            .http
            .post(&self.auth_url)
            .header("Accept", "application/json")
            .header("RqUID", Uuid::new_v4().to_string())
            .header("Authorization", format!("Basic {}", self.credentials))
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await
            .map_err(|e| RelayError::Auth(format!("auth request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(RelayError::Auth(format!(
                "auth endpoint returned {}: {}",
                status, body
            )));
        }

        let payload: AuthResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Auth(format!("malformed auth response: {}", e)))?;

        let expires_at = payload
            .expires_at
            .map(normalize_expiry)
            .unwrap_or(now + DEFAULT_TOKEN_LIFETIME_SECS);

        info!(expires_at, "obtained fresh access token");
        Ok(CachedToken {
            token: payload.access_token,
            expires_at,
        })
    }
}
