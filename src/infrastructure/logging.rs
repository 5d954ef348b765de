use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{config::LoggingConfig, infrastructure::directories::ResolvedPaths};

const FALLBACK_LEVEL: &str = "info";

static INIT: OnceCell<()> = OnceCell::new();
static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Installs the global subscriber for one binary. Diagnostics go to stderr and
/// to `<logs_dir>/<file_name>.<date>`; stdout is left to the digest presenter.
/// Later calls are no-ops.
pub fn init_tracing(logging: &LoggingConfig, paths: &ResolvedPaths, file_name: &str) -> Result<()> {
    INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let (filter, directive) = resolve_filter(rust_log, &logging.level);

        let file_appender = tracing_appender::rolling::daily(&paths.logs_dir, file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_ansi(false),
            )
            .try_init()?;

        tracing::info!(
            logs = %paths.logs_dir.display(),
            file = file_name,
            filter = %directive,
            "tracing initialized"
        );
        Ok(())
    })?;
    Ok(())
}

/// `RUST_LOG` wins over `LOG_LEVEL`; an unparseable directive falls through to
/// the next source and finally to `info`. Returns the directive actually used.
fn resolve_filter(rust_log: Option<String>, level: &str) -> (EnvFilter, String) {
    rust_log
        .into_iter()
        .chain([level.to_string()])
        .find_map(|directive| {
            EnvFilter::try_new(&directive)
                .ok()
                .map(|filter| (filter, directive))
        })
        .unwrap_or_else(|| (EnvFilter::new(FALLBACK_LEVEL), FALLBACK_LEVEL.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_takes_precedence() {
        let (_, used) = resolve_filter(Some("news_analyser=debug".into()), "warn");
        assert_eq!(used, "news_analyser=debug");
    }

    #[test]
    fn configured_level_used_without_rust_log() {
        let (_, used) = resolve_filter(None, "warn");
        assert_eq!(used, "warn");
    }

    #[test]
    fn invalid_directives_fall_back() {
        let (_, used) = resolve_filter(Some("news_analyser=loud".into()), "debug");
        assert_eq!(used, "debug");

        let (_, used) = resolve_filter(Some("news_analyser=loud".into()), "server=shout");
        assert_eq!(used, "info");
    }
}
