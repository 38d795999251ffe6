use crate::error::{config_error, google_calendar_error, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Read/write access to calendar events
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each signed assertion, in seconds
const ASSERTION_LIFETIME: i64 = 3600;

/// Refresh this many seconds before the access token actually expires
const EXPIRY_MARGIN: i64 = 60;

/// Something that can hand out a bearer token for the Calendar API
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> AppResult<String>;
}

/// Fixed bearer token
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> AppResult<String> {
        Ok(self.0.clone())
    }
}

/// The fields of a Google service account JSON key that token exchange needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Load a key downloaded from the Google Cloud console
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            config_error(&format!(
                "Invalid service account key {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Exchanges signed service account assertions for access tokens and caches them
#[derive(Clone)]
pub struct TokenManager {
    key: Arc<ServiceAccountKey>,
    client: Client,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenManager {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key: Arc::new(key),
            client: Client::new(),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Get an access token, reusing the cached one while it is still valid
    pub async fn get_token(&self) -> AppResult<String> {
        let now = Utc::now().timestamp();

        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at - EXPIRY_MARGIN > now {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let mut cached = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if token.expires_at - EXPIRY_MARGIN > now {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.request_token(now).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }

    /// Sign the JWT assertion presented to the token endpoint
    fn sign_assertion(&self, now: i64) -> AppResult<String> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: CALENDAR_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| config_error(&format!("Invalid service account private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| google_calendar_error(&format!("Failed to sign assertion: {}", e)))
    }

    async fn request_token(&self, now: i64) -> AppResult<CachedToken> {
        debug!("Requesting access token for {}", self.key.client_email);
        let assertion = self.sign_assertion(now)?;

        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to request token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to request token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        info!("Obtained access token, valid for {}s", token.expires_in);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}

#[async_trait]
impl TokenSource for TokenManager {
    async fn access_token(&self) -> AppResult<String> {
        self.get_token().await
    }
}
