//! Obtains an access token we can use to call the Sheets API.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::credentials::{Credentials, ServiceAccountKey};

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of the assertion exchanged for an access token.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign the JWT-bearer assertion for a service account.
pub(crate) fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String> {
    let iat = now.timestamp();
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: SCOPES.join(" "),
        aud: key.token_uri.clone(),
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("Service account private key is not a valid RSA PEM key")?;

    jsonwebtoken::encode(&header, &claims, &signing_key).context("Failed to sign assertion")
}

/// A short-lived access token. Fetched per request and never stored.
pub struct Session {
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub async fn create(http: &reqwest::Client, credentials: &Credentials) -> Result<Self> {
        match credentials {
            Credentials::AccessToken(token) => Ok(Session {
                access_token: token.clone(),
                expires_at: None,
            }),
            Credentials::ServiceAccount(key) => Self::exchange(http, key).await,
        }
    }

    async fn exchange(http: &reqwest::Client, key: &ServiceAccountKey) -> Result<Self> {
        let assertion = sign_assertion(key, Utc::now())?;

        let response = http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send token request to {}", key.token_uri))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Failed to obtain access token for {} ({}): {}",
                key.client_email,
                status,
                error_text
            );
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default)]
            expires_in: Option<i64>,
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        let expires_at = token.expires_in.map(|s| Utc::now() + Duration::seconds(s));
        log::debug!(
            "Obtained access token for {} (expires {:?})",
            key.client_email,
            expires_at
        );

        Ok(Session {
            access_token: token.access_token,
            expires_at,
        })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
