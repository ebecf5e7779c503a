pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, QueryConfig, ServerConfig, DEFAULT_BASE_URL};
pub use paths::{PathManager, base_path_override};
