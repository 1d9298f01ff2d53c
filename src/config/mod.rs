use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::redact_url_credentials;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Outbound request settings
    pub http: HttpConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Forward proxy for all requests to YouTube
    pub proxy_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human readable ones
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            proxy_url: None,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from file (if any) and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::config_path(path)? {
            Some(config_path) => Self::from_file(&config_path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;

        serde_yaml::from_str(&content).context("Failed to parse config file")
    }

    /// Get configuration file path, if one exists
    fn config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file does not exist: {}", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        // Current directory first for easy local runs
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(Some(local_config));
        }

        let user_config = dirs::config_dir()
            .map(|dir| dir.join("yt-transcript-api").join("config.yaml"))
            .filter(|path| path.exists());

        Ok(user_config)
    }

    /// Apply overrides from environment-style variables. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = var("HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }

        if let Some(proxy_url) = var("PROXY_URL") {
            self.http.proxy_url = Some(proxy_url);
        }

        if let Some(timeout) = var("REQUEST_TIMEOUT_SECS") {
            self.http.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid REQUEST_TIMEOUT_SECS value: {}", timeout))?;
        }

        if let Some(format) = var("LOG_FORMAT") {
            self.logging.json = match format.to_lowercase().as_str() {
                "json" => true,
                "text" | "pretty" => false,
                other => anyhow::bail!("Unknown LOG_FORMAT: {}", other),
            };
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be non-zero");
        }

        if self.http.timeout_secs == 0 {
            anyhow::bail!("Request timeout must be at least one second");
        }

        if let Some(proxy_url) = &self.http.proxy_url {
            let parsed = url::Url::parse(proxy_url).map_err(|_| {
                anyhow::anyhow!("Invalid proxy URL: {}", redact_url_credentials(proxy_url))
            })?;

            if !matches!(parsed.scheme(), "http" | "https" | "socks5" | "socks5h") {
                anyhow::bail!("Proxy URL must use http, https or socks5");
            }
        }

        Ok(())
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Listen: {}", self.bind_address());
        match &self.http.proxy_url {
            Some(proxy) => println!("  Proxy: {}", redact_url_credentials(proxy)),
            None => println!("  Proxy: none"),
        }
        println!("  Request Timeout: {}s", self.http.timeout_secs);
        println!("  JSON Logs: {}", self.logging.json);
    }
}
