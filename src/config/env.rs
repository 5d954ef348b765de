use std::{net::SocketAddr, time::Duration};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub reporter: ReporterConfig,
    pub positive_words: Vec<String>,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: "ANALYSER_BIND_ADDR",
                value: self.bind_addr.clone(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct ReporterConfig {
    pub period: Duration,
    pub news_limit: usize,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub analyser_host: String,
    pub analyser_port: u16,
    pub interval: Duration,
    pub headline_words: Vec<String>,
    pub priority_weights: Vec<f64>,
    pub min_words: usize,
    pub max_words: usize,
    pub seed: Option<u64>,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
    #[error("MAX_WORDS_IN_HEADLINE ({max}) is smaller than MIN_WORDS_IN_HEADLINE ({min})")]
    WordRange { min: usize, max: usize },
}
