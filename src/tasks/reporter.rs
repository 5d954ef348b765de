use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tokio::{
    task::{self, JoinHandle},
    time::{interval_at, Instant, MissedTickBehavior},
};

use crate::{
    analysis::select,
    domain::Digest,
    infrastructure::shutdown::ShutdownListener,
    tasks::{accumulator::Accumulator, presenter::Presenter},
};

/// Periodically drains the accumulator and hands a ranked digest to the presenter.
///
/// Cycles run one at a time inside the timer loop, each on the blocking pool
/// since presenters write to stdout. A failed cycle is logged and its messages
/// are gone.
pub struct Reporter {
    accumulator: Arc<Accumulator>,
    presenter: Arc<dyn Presenter>,
    period: Duration,
    news_limit: usize,
}

impl Reporter {
    pub fn new(
        accumulator: Arc<Accumulator>,
        presenter: Arc<dyn Presenter>,
        period: Duration,
        news_limit: usize,
    ) -> Self {
        Self {
            accumulator,
            presenter,
            period,
            news_limit,
        }
    }

    pub fn spawn(self: Arc<Self>, shutdown: ShutdownListener) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run_loop(&shutdown).await;
        })
    }

    async fn run_loop(self: &Arc<Self>, shutdown: &ShutdownListener) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        tracing::info!(
            target: "reporter",
            period_ms = self.period.as_millis() as u64,
            news_limit = self.news_limit,
            "reporter started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.notified() => break,
                _ = ticker.tick() => self.tick().await,
            }
        }
        tracing::info!(target: "reporter", "reporter stopped");
    }

    async fn tick(self: &Arc<Self>) {
        let reporter = Arc::clone(self);
        match task::spawn_blocking(move || reporter.run_cycle()).await {
            Ok(Ok(digest)) => {
                tracing::debug!(
                    target: "reporter",
                    total = digest.total_positive_count,
                    selected = digest.selected.len(),
                    "digest reported"
                );
            }
            Ok(Err(err)) => {
                tracing::error!(target: "reporter", error = %err, "report cycle failed");
            }
            Err(err) => {
                tracing::error!(
                    target: "reporter",
                    panicked = err.is_panic(),
                    "report cycle aborted"
                );
            }
        }
    }

    /// Drains everything accumulated so far and presents the resulting digest.
    pub fn run_cycle(&self) -> Result<Digest> {
        let drained = self.accumulator.drain_and_clear();
        let digest = Digest::new(drained.len(), select(drained, self.news_limit));
        self.presenter.present(&digest)?;
        Ok(digest)
    }
}
