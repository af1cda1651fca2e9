//! Server configuration.
//!
//! Loaded once at startup from an optional TOML file and `RSVP_*`
//! environment variables (later sources win), e.g.:
//!
//!   spreadsheet_id = "1AbC..."
//!   sheet_name = "Sheet1"
//!   service_account_file = "/etc/rsvp/service-account.json"

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use rsvp_core::SheetLayout;
use rsvp_provider_google::{Credentials, DEFAULT_API_URL, ServiceAccountKey};
use serde::Deserialize;

const ENV_PREFIX: &str = "RSVP";

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8888))
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub spreadsheet_id: String,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Inline service account key JSON.
    #[serde(default)]
    pub service_account: Option<String>,

    #[serde(default)]
    pub service_account_file: Option<PathBuf>,

    /// Pre-issued OAuth access token, for local runs.
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_api_url")]
    pub sheets_api_url: String,
}

impl ServerConfig {
    /// ~/.config/rsvp/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rsvp").join("config.toml"))
    }

    /// Load from `path` (must exist) or the default path (optional), then
    /// the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder.add_source(File::from(default).required(false));
                }
            }
        }

        Self::from_builder(builder.add_source(Environment::with_prefix(ENV_PREFIX)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: ServerConfig = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if config.spreadsheet_id.trim().is_empty() {
            anyhow::bail!("spreadsheet_id must not be empty");
        }

        Ok(config)
    }

    pub fn layout(&self) -> SheetLayout {
        SheetLayout::new(self.sheet_name.clone())
    }

    /// Exactly one credential source must be configured.
    pub fn credentials(&self) -> Result<Credentials> {
        let inline = self.service_account.as_deref().filter(|s| !s.trim().is_empty());
        let file = self.service_account_file.as_deref();
        let token = self.access_token.as_deref().filter(|s| !s.trim().is_empty());

        match (inline, file, token) {
            (Some(json), None, None) => Ok(Credentials::ServiceAccount(
                ServiceAccountKey::from_json(json)
                    .context("Invalid RSVP_SERVICE_ACCOUNT")?,
            )),
            (None, Some(path), None) => {
                Ok(Credentials::ServiceAccount(ServiceAccountKey::from_file(path)?))
            }
            (None, None, Some(token)) => Ok(Credentials::AccessToken(token.to_string())),
            (None, None, None) => anyhow::bail!(
                "No Google credentials configured.\n\n\
                Set one of:\n  \
                  service_account       (inline key JSON, env RSVP_SERVICE_ACCOUNT)\n  \
                  service_account_file  (path to key JSON, env RSVP_SERVICE_ACCOUNT_FILE)\n  \
                  access_token          (env RSVP_ACCESS_TOKEN)"
            ),
            _ => anyhow::bail!(
                "Configure only one of service_account, service_account_file or access_token"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    fn load(toml: &str, env: &[(&str, &str)]) -> Result<ServerConfig> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        ServerConfig::from_builder(
            Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(env))),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load(r#"spreadsheet_id = "abc""#, &[]).unwrap();

        assert_eq!(config.spreadsheet_id, "abc");
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.bind, default_bind());
        assert_eq!(config.sheets_api_url, DEFAULT_API_URL);
        assert_eq!(config.layout().guest_range().to_string(), "Sheet1!A:B");
    }

    #[test]
    fn test_environment_overrides_file() {
        let config = load(
            r#"
            spreadsheet_id = "from-file"
            sheet_name = "Guests"
            "#,
            &[("RSVP_SPREADSHEET_ID", "from-env"), ("RSVP_BIND", "0.0.0.0:9000")],
        )
        .unwrap();

        assert_eq!(config.spreadsheet_id, "from-env");
        assert_eq!(config.sheet_name, "Guests");
        assert_eq!(config.bind, SocketAddr::from(([0, 0, 0, 0], 9000)));
    }

    #[test]
    fn test_missing_spreadsheet_id_is_an_error() {
        assert!(load("", &[]).is_err());
        assert!(load(r#"spreadsheet_id = " ""#, &[]).is_err());
    }

    #[test]
    fn test_credentials_require_exactly_one_source() {
        let none = load(r#"spreadsheet_id = "abc""#, &[]).unwrap();
        assert!(none.credentials().unwrap_err().to_string().contains("No Google credentials"));

        let token = load(r#"spreadsheet_id = "abc""#, &[("RSVP_ACCESS_TOKEN", "tok")]).unwrap();
        assert!(matches!(token.credentials().unwrap(), Credentials::AccessToken(t) if t == "tok"));

        let both = load(
            r#"
            spreadsheet_id = "abc"
            access_token = "tok"
            service_account_file = "/nonexistent.json"
            "#,
            &[],
        )
        .unwrap();
        assert!(both.credentials().unwrap_err().to_string().contains("only one"));
    }

    #[test]
    fn test_inline_service_account_is_parsed() {
        let key = r#"{"client_email": "rsvp@x.iam.gserviceaccount.com", "private_key": "pem"}"#;
        let config = load(
            r#"spreadsheet_id = "abc""#,
            &[("RSVP_SERVICE_ACCOUNT", key)],
        )
        .unwrap();

        match config.credentials().unwrap() {
            Credentials::ServiceAccount(key) => {
                assert_eq!(key.client_email, "rsvp@x.iam.gserviceaccount.com")
            }
            other => panic!("expected service account, got {other:?}"),
        }
    }
}
