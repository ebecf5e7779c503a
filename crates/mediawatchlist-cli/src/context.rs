use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;
use watchlist_client::ApiClient;
use watchlist_config::{Config, PathManager};
use watchlist_core::StalePolicy;

/// Configuration as resolved for this run: file, then environment, then flags
pub struct Settings {
    pub config: Config,
    pub paths: PathManager,
    pub config_file: PathBuf,
    pub file_exists: bool,
}

pub fn load_config(api_url: Option<&str>) -> Result<Settings> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let file_exists = config_file.exists();

    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_env_overrides();
    if let Some(url) = api_url {
        config.server.base_url = url.to_string();
    }
    config.logging.file = config.logging.file.map(|file| paths.resolve_log_file(&file));

    Ok(Settings {
        config,
        paths,
        config_file,
        file_exists,
    })
}

impl Settings {
    /// Validate and build the API client
    pub fn connect(&self) -> Result<AppContext> {
        self.config
            .validate()
            .map_err(|e| eyre!("Configuration validation failed: {}", e))?;
        let client = ApiClient::from_config(&self.config)
            .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;
        tracing::debug!(base_url = self.config.base_url(), "Connected client");
        Ok(AppContext {
            config: self.config.clone(),
            client,
        })
    }
}

pub struct AppContext {
    pub config: Config,
    pub client: ApiClient,
}

impl AppContext {
    pub fn stale_policy(&self) -> StalePolicy {
        StalePolicy::from_discard_flag(self.config.query.discard_stale_responses)
    }
}
