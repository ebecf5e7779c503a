use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Backend origin; endpoint paths (`/api/...`) are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport-level timeout. Unset means rely on the transport's own behavior.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QueryConfig {
    /// Ignore responses that arrive after a newer request was dispatched on
    /// the same panel. Off by default: the last response to arrive wins.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// JSON log lines. Unset means JSON whenever stdout is not a terminal.
    #[serde(default)]
    pub json: Option<bool>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("mediawatchlist/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Whether to log JSON in this run, deciding from stdout when unset
    pub fn json_enabled(&self) -> bool {
        use std::io::IsTerminal;
        self.json.unwrap_or_else(|| !std::io::stdout().is_terminal())
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file when it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `MEDIAWATCHLIST_API_URL` if set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MEDIAWATCHLIST_API_URL") {
            if !url.trim().is_empty() {
                self.server.base_url = url;
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.server.base_url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("server.base_url cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "server.base_url must start with http:// or https:// (got {})",
                url
            ));
        }
        if self.server.timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!("server.timeout_seconds must be positive when set"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.server.base_url.trim().trim_end_matches('/')
    }
}
