pub mod env;
mod loader;

pub use env::{
    AppConfig, ConfigError, DirectoryConfig, FeedConfig, LoggingConfig, ReporterConfig,
    ServerConfig,
};
pub use loader::{load_config, load_feed_config};
