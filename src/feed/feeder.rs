use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    net::TcpStream,
    time::{interval_at, Instant},
};

use crate::{
    config::FeedConfig, feed::generator::NewsGenerator,
    infrastructure::shutdown::ShutdownListener,
};

/// TCP client that sends one generated message per interval to the analyser.
pub struct NewsFeeder {
    addr: String,
    interval: Duration,
    generator: NewsGenerator,
}

impl NewsFeeder {
    pub fn new(config: &FeedConfig) -> Self {
        Self::with_generator(
            format!("{}:{}", config.analyser_host, config.analyser_port),
            config.interval,
            NewsGenerator::from_config(config),
        )
    }

    pub fn with_generator(addr: String, interval: Duration, generator: NewsGenerator) -> Self {
        Self {
            addr,
            interval,
            generator,
        }
    }

    /// Connects and feeds until shutdown. Returns the number of messages sent.
    pub async fn run(mut self, shutdown: ShutdownListener) -> Result<u64> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .with_context(|| format!("analyser at {} doesn't accept connections", self.addr))?;
        tracing::info!(target: "feed", addr = %self.addr, "connected to analyser");
        self.feed(stream, &shutdown).await
    }

    pub async fn feed<W>(&mut self, mut writer: W, shutdown: &ShutdownListener) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        let mut sent = 0u64;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.notified() => break,
                _ = ticker.tick() => {}
            }

            let message = self.generator.generate();
            let mut line = serde_json::to_string(&message)?;
            line.push('\n');
            writer
                .write_all(line.as_bytes())
                .await
                .context("failed to send news message")?;
            writer.flush().await.context("failed to send news message")?;
            sent += 1;
            tracing::debug!(
                target: "feed",
                priority = message.priority,
                headline = %message.headline,
                "news sent"
            );
        }

        if let Err(err) = writer.shutdown().await {
            tracing::debug!(target: "feed", error = %err, "closing connection failed");
        }
        tracing::info!(target: "feed", sent, "feed stopped");
        Ok(sent)
    }
}
