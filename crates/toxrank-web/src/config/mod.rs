//! Configuration loading for toxrank.
//! Reads toxrank.toml from the current directory or the path in TOXRANK_CONFIG.
//! The CompTox API key is never read from the file; it comes from the
//! environment variable named by `api.api_key_env` (TOXRANK_API_KEY by default).

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use toxrank_common::ToxRankError;
use toxrank_ingestion::sources::comptox::COMPTOX_API_URL;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means requests never time out.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url()    -> String { COMPTOX_API_URL.to_string() }
fn default_api_key_env() -> String { "TOXRANK_API_KEY".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ToxRankError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ToxRankError::Config(format!("invalid server address: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Choices offered before the user enters their own list.
    #[serde(default = "default_identifiers")]
    pub default_identifiers: Vec<String>,
}

fn default_identifiers() -> Vec<String> { vec!["50-00-0".to_string()] }

impl Default for FormConfig {
    fn default() -> Self {
        Self { default_identifiers: default_identifiers() }
    }
}


impl Config {
    /// Load configuration from toxrank.toml.
    /// Checks TOXRANK_CONFIG env var first, then current directory; falls back
    /// to defaults when no file exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("TOXRANK_CONFIG")
            .unwrap_or_else(|_| "toxrank.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::info!("No config file at {}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ToxRankError> {
        toml::from_str(content).map_err(|e| ToxRankError::Config(e.to_string()))
    }

    /// Read the CompTox API key from the environment.
    pub fn api_key(&self) -> Result<SecretString, ToxRankError> {
        let name = &self.api.api_key_env;
        match std::env::var(name) {
            Ok(key) if !key.trim().is_empty() => {
                Ok(SecretString::new(key.trim().to_string().into_boxed_str()))
            }
            _ => Err(ToxRankError::Config(format!(
                "CompTox API key not set (export {} or add it to .env)",
                name
            ))),
        }
    }
}
