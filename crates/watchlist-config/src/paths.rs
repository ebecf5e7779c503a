use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override, used by containers and tests
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("MEDIAWATCHLIST_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("mediawatchlist");

        Ok(Self::from_base(base_dir))
    }

    /// Config files directly in `base`, logs in a subdirectory
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Relative log file names live under the log directory
    pub fn resolve_log_file(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.log_dir.join(file)
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/mediawatchlist on Linux)
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".mediawatchlist")))
    }
}
