use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tokio::{
    io::BufReader,
    net::{TcpListener, TcpStream},
    time::sleep,
};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{domain::PositiveWords, server::dispatcher::Dispatcher, tasks::accumulator::Accumulator};

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Accepts producer connections and runs one dispatcher per connection.
///
/// Dispatchers are tracked so `run` only returns once all of them have finished.
pub struct NewsServer {
    listener: TcpListener,
    positive_words: Arc<PositiveWords>,
    accumulator: Arc<Accumulator>,
    tracker: TaskTracker,
    token: CancellationToken,
}

impl NewsServer {
    pub async fn bind(
        addr: SocketAddr,
        positive_words: Arc<PositiveWords>,
        accumulator: Arc<Accumulator>,
        token: CancellationToken,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind news listener on {addr}"))?;
        Ok(Self {
            listener,
            positive_words,
            accumulator,
            tracker: TaskTracker::new(),
            token,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn run(self) {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(target: "server", %addr, "listening for news feeds");
        }

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => self.spawn_dispatcher(stream, peer),
                    Err(err) => {
                        tracing::warn!(target: "server", error = %err, "accept failed");
                        sleep(ACCEPT_RETRY_DELAY).await;
                    }
                },
            }
        }

        self.tracker.close();
        tracing::info!(
            target: "server",
            open_connections = self.tracker.len(),
            "listener stopped; waiting for dispatchers"
        );
        self.tracker.wait().await;
        tracing::info!(target: "server", "all dispatchers finished");
    }

    fn spawn_dispatcher(&self, stream: TcpStream, peer: SocketAddr) {
        tracing::info!(target: "server", %peer, "feed connected");
        let dispatcher = Dispatcher::new(
            peer.to_string(),
            self.positive_words.clone(),
            self.accumulator.clone(),
        );
        let cancel = self.token.child_token();
        self.tracker.spawn(async move {
            dispatcher.run(BufReader::new(stream), cancel).await;
        });
    }
}
