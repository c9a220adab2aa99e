//! Configuration for bfhl

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address reported in every response envelope
    #[serde(default = "default_official_email")]
    pub official_email: String,

    /// AI provider settings
    #[serde(default)]
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key sent as the `key` query parameter
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the model listing call
    #[serde(default = "default_list_timeout_secs")]
    pub list_timeout_secs: u64,

    /// Timeout for the content generation call
    #[serde(default = "default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            official_email: default_official_email(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            list_timeout_secs: default_list_timeout_secs(),
            generate_timeout_secs: default_generate_timeout_secs(),
        }
    }
}

impl AiConfig {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}

impl Config {
    /// Load config from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override fields from `PORT`, `OFFICIAL_EMAIL`, `GEMINI_API_KEY` and `GEMINI_API_BASE`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(email) = lookup("OFFICIAL_EMAIL") {
            self.official_email = email;
        }
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.ai.api_key = Some(key);
        }
        if let Some(base) = lookup("GEMINI_API_BASE") {
            self.ai.base_url = base.trim_end_matches('/').to_string();
        }
        Ok(())
    }
}

// Default value functions

fn default_port() -> u16 {
    3000
}

fn default_official_email() -> String {
    "ritin0867.be23@chitkara.edu.in".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_list_timeout_secs() -> u64 {
    10
}

fn default_generate_timeout_secs() -> u64 {
    15
}
