use std::{env, str::FromStr, time::Duration};

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, FeedConfig, LoggingConfig, ReporterConfig,
    ServerConfig,
};

const DEFAULT_PORT: u16 = 5555;
const DEFAULT_REPORTING_PERIOD_MS: u64 = 10_000;
const DEFAULT_NEWS_LIMIT: usize = 3;
const DEFAULT_POSITIVE_WORDS: &str = "up,rise,good,success,high,über";
const DEFAULT_FEEDING_INTERVAL_MS: u64 = 1_000;
const DEFAULT_HEADLINE_WORDS: &str = "up,down,rise,fall,good,bad,success,failure,high,low";
const DEFAULT_PRIORITY_WEIGHTS: &str = "29.3,19.3,14.3,10.9,8.4,6.5,4.8,3.4,2.1,1";
const DEFAULT_MIN_WORDS: usize = 3;
const DEFAULT_MAX_WORDS: usize = 5;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

pub fn load_feed_config() -> Result<FeedConfig, ConfigError> {
    FeedConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            bind_addr: lookup("ANALYSER_BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "ANALYSER_PORT", DEFAULT_PORT)?,
        };

        let period_ms = parse_or(&lookup, "REPORTING_PERIOD_MS", DEFAULT_REPORTING_PERIOD_MS)?;
        if period_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "REPORTING_PERIOD_MS",
                value: period_ms.to_string(),
            });
        }
        let reporter = ReporterConfig {
            period: Duration::from_millis(period_ms),
            news_limit: parse_or(&lookup, "MAX_NEWS_COUNT_TO_SHOW", DEFAULT_NEWS_LIMIT)?,
        };

        let positive_words = split_list(
            &lookup("POSITIVE_WORDS").unwrap_or_else(|| DEFAULT_POSITIVE_WORDS.to_string()),
        );

        Ok(Self {
            server,
            reporter,
            positive_words,
            directories: directories(&lookup),
            logging: logging(&lookup),
        })
    }
}

impl FeedConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval_ms = parse_or(&lookup, "FEEDING_INTERVAL_MS", DEFAULT_FEEDING_INTERVAL_MS)?;
        if interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "FEEDING_INTERVAL_MS",
                value: interval_ms.to_string(),
            });
        }

        let headline_words = split_list(
            &lookup("HEADLINE_WORDS").unwrap_or_else(|| DEFAULT_HEADLINE_WORDS.to_string()),
        );
        if headline_words.is_empty() {
            return Err(ConfigError::Empty {
                key: "HEADLINE_WORDS",
            });
        }

        let priority_weights = split_list(
            &lookup("PRIORITY_WEIGHTS").unwrap_or_else(|| DEFAULT_PRIORITY_WEIGHTS.to_string()),
        )
        .into_iter()
        .map(|weight| match weight.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(ConfigError::Invalid {
                key: "PRIORITY_WEIGHTS",
                value: weight,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

        let min_words = parse_or(&lookup, "MIN_WORDS_IN_HEADLINE", DEFAULT_MIN_WORDS)?;
        let max_words = parse_or(&lookup, "MAX_WORDS_IN_HEADLINE", DEFAULT_MAX_WORDS)?;
        if max_words < min_words {
            return Err(ConfigError::WordRange {
                min: min_words,
                max: max_words,
            });
        }

        Ok(Self {
            analyser_host: lookup("ANALYSER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            analyser_port: parse_or(&lookup, "ANALYSER_PORT", DEFAULT_PORT)?,
            interval: Duration::from_millis(interval_ms),
            headline_words,
            priority_weights,
            min_words,
            max_words,
            seed: lookup("FEED_SEED")
                .map(|value| parse_value("FEED_SEED", value))
                .transpose()?,
            directories: directories(&lookup),
            logging: logging(&lookup),
        })
    }
}

fn directories<F: Fn(&str) -> Option<String>>(lookup: &F) -> DirectoryConfig {
    DirectoryConfig {
        logs_dir: lookup("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
    }
}

fn logging<F: Fn(&str) -> Option<String>>(lookup: &F) -> LoggingConfig {
    LoggingConfig {
        level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => parse_value(key, value),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn analyser_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.server.port, 5555);
        assert_eq!(config.reporter.period, Duration::from_millis(10_000));
        assert_eq!(config.reporter.news_limit, 3);
        assert_eq!(
            config.positive_words,
            vec!["up", "rise", "good", "success", "high", "über"]
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn analyser_values_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ANALYSER_PORT", "7777"),
            ("REPORTING_PERIOD_MS", "2500"),
            ("MAX_NEWS_COUNT_TO_SHOW", "0"),
            ("POSITIVE_WORDS", " positive , good,,"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 7777);
        assert_eq!(config.reporter.period, Duration::from_millis(2500));
        assert_eq!(config.reporter.news_limit, 0);
        assert_eq!(config.positive_words, vec!["positive", "good"]);
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "0.0.0.0:7777".parse::<std::net::SocketAddr>().unwrap()
        );
    }

    #[test]
    fn unreadable_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("ANALYSER_PORT", "port")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "ANALYSER_PORT",
                value: "port".to_string()
            }
        );

        assert!(AppConfig::from_lookup(lookup_from(&[("REPORTING_PERIOD_MS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("MAX_NEWS_COUNT_TO_SHOW", "-1")])).is_err());
    }

    #[test]
    fn bad_bind_addr_is_reported() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("ANALYSER_BIND_ADDR", "nowhere")])).unwrap();
        assert!(config.server.socket_addr().is_err());
    }

    #[test]
    fn feed_defaults() {
        let config = FeedConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.analyser_host, "127.0.0.1");
        assert_eq!(config.analyser_port, 5555);
        assert_eq!(config.interval, Duration::from_millis(1_000));
        assert_eq!(config.priority_weights.len(), 10);
        assert_eq!(config.priority_weights[0], 29.3);
        assert_eq!((config.min_words, config.max_words), (3, 5));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn feed_values_are_validated() {
        let config = FeedConfig::from_lookup(lookup_from(&[
            ("HEADLINE_WORDS", "up,down"),
            ("PRIORITY_WEIGHTS", "1, 0, 2.5"),
            ("FEED_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!(config.headline_words, vec!["up", "down"]);
        assert_eq!(config.priority_weights, vec![1.0, 0.0, 2.5]);
        assert_eq!(config.seed, Some(42));

        assert_eq!(
            FeedConfig::from_lookup(lookup_from(&[
                ("MIN_WORDS_IN_HEADLINE", "6"),
                ("MAX_WORDS_IN_HEADLINE", "2"),
            ]))
            .unwrap_err(),
            ConfigError::WordRange { min: 6, max: 2 }
        );
        assert!(FeedConfig::from_lookup(lookup_from(&[("PRIORITY_WEIGHTS", "1,-3")])).is_err());
        assert!(FeedConfig::from_lookup(lookup_from(&[("HEADLINE_WORDS", " , ")])).is_err());
    }
}
