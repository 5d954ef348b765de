use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use tokio::{task::JoinHandle, time::timeout};

use crate::{
    config::AppConfig,
    domain::PositiveWords,
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    server::NewsServer,
    tasks::{
        accumulator::Accumulator,
        presenter::{ConsolePresenter, Presenter},
        reporter::Reporter,
    },
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct NewsAnalyserApp {
    _paths: ResolvedPaths,
    server: NewsServer,
    reporter_handle: JoinHandle<()>,
    shutdown: Shutdown,
}

impl NewsAnalyserApp {
    pub async fn initialize(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
    ) -> Result<Self> {
        let presenter: Arc<dyn Presenter> = Arc::new(ConsolePresenter::stdout());
        Self::with_presenter(config, paths, shutdown, presenter).await
    }

    pub async fn with_presenter(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self> {
        let addr = config.server.socket_addr()?;
        let positive_words: Arc<PositiveWords> =
            Arc::new(config.positive_words.iter().cloned().collect());
        if positive_words.is_empty() {
            tracing::warn!("no positive words configured; every message will be negative");
        }
        let accumulator = Arc::new(Accumulator::new());

        let server = NewsServer::bind(
            addr,
            positive_words,
            accumulator.clone(),
            shutdown.child_token(),
        )
        .await?;

        let reporter = Arc::new(Reporter::new(
            accumulator,
            presenter,
            config.reporter.period,
            config.reporter.news_limit,
        ));
        let reporter_handle = reporter.spawn(shutdown.subscribe());

        Ok(Self {
            _paths: paths,
            server,
            reporter_handle,
            shutdown,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.server.local_addr()
    }

    pub async fn run(self) -> Result<()> {
        let NewsAnalyserApp {
            _paths: _,
            server,
            mut reporter_handle,
            shutdown,
        } = self;

        tracing::info!("news analyser started");

        let shutdown_listener = shutdown.subscribe();
        let mut server_future = Box::pin(server.run());
        let mut server_completed = false;

        tokio::select! {
            _ = shutdown_listener.notified() => {
                tracing::info!("shutdown requested (CTRL+C / SIGTERM)");
            }
            _ = &mut server_future => {
                server_completed = true;
                tracing::warn!(target: "server", "listener exited before shutdown");
            }
        }

        shutdown.trigger();

        if !server_completed && timeout(SHUTDOWN_TIMEOUT, &mut server_future).await.is_err() {
            tracing::warn!(
                target: "server",
                "dispatchers did not stop within {:?}; forcing exit",
                SHUTDOWN_TIMEOUT
            );
        }

        let reporter_sleep = tokio::time::sleep(SHUTDOWN_TIMEOUT);
        tokio::pin!(reporter_sleep);
        tokio::select! {
            res = &mut reporter_handle => {
                if let Err(err) = res {
                    if err.is_panic() {
                        tracing::error!(target: "reporter", "reporter task panicked");
                    }
                }
            }
            _ = &mut reporter_sleep => {
                tracing::warn!(
                    target: "reporter",
                    "reporter did not stop within {:?}; aborting",
                    SHUTDOWN_TIMEOUT
                );
                reporter_handle.abort();
            }
        }

        tracing::info!("news analyser stopped");
        Ok(())
    }
}
