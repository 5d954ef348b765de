use std::{io, str, sync::Arc};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use crate::{
    analysis::{is_positive, parse_message},
    domain::{DispatchStats, PositiveWords},
    tasks::accumulator::Accumulator,
};

/// Longest accepted line, newline excluded. Longer lines are dropped as malformed.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadLine {
    Eof,
    Line,
    Oversized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Accepted,
    Rejected,
    Malformed,
}

/// Feeds the lines of one connection through the classifier into the shared accumulator.
pub struct Dispatcher {
    peer: String,
    positive_words: Arc<PositiveWords>,
    accumulator: Arc<Accumulator>,
    max_line_bytes: usize,
}

impl Dispatcher {
    pub fn new(
        peer: impl Into<String>,
        positive_words: Arc<PositiveWords>,
        accumulator: Arc<Accumulator>,
    ) -> Self {
        Self {
            peer: peer.into(),
            positive_words,
            accumulator,
            max_line_bytes: MAX_LINE_BYTES,
        }
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Reads until end of stream, a read error, or cancellation.
    pub async fn run<R>(&self, mut reader: R, cancel: CancellationToken) -> DispatchStats
    where
        R: AsyncBufRead + Unpin,
    {
        let mut stats = DispatchStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(target: "dispatcher", peer = %self.peer, "dispatcher cancelled");
                    break;
                }
                read = self.read_line(&mut reader, &mut buf) => read,
            };

            match read {
                Ok(ReadLine::Eof) => break,
                Ok(ReadLine::Oversized) => {
                    tracing::debug!(
                        target: "dispatcher",
                        peer = %self.peer,
                        limit = self.max_line_bytes,
                        "dropping oversized line"
                    );
                    stats.received += 1;
                    stats.malformed += 1;
                }
                Ok(ReadLine::Line) => {
                    stats.received += 1;
                    match self.handle_line(&buf) {
                        LineOutcome::Accepted => stats.accepted += 1,
                        LineOutcome::Rejected => {}
                        LineOutcome::Malformed => stats.malformed += 1,
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        target: "dispatcher",
                        peer = %self.peer,
                        error = %err,
                        "connection read failed"
                    );
                    break;
                }
            }
        }

        tracing::info!(
            target: "dispatcher",
            peer = %self.peer,
            received = stats.received,
            accepted = stats.accepted,
            malformed = stats.malformed,
            "connection closed"
        );
        stats
    }

    /// Reads one line into `buf` without ever holding more than
    /// `max_line_bytes + 1` bytes; the rest of an oversized line is discarded.
    async fn read_line<R>(&self, reader: &mut R, buf: &mut Vec<u8>) -> io::Result<ReadLine>
    where
        R: AsyncBufRead + Unpin,
    {
        let cap = self.max_line_bytes as u64 + 1;
        let read = (&mut *reader).take(cap).read_until(b'\n', buf).await?;
        if read == 0 {
            return Ok(ReadLine::Eof);
        }
        if buf.last() == Some(&b'\n') || (read as u64) < cap {
            return Ok(ReadLine::Line);
        }

        loop {
            buf.clear();
            let read = (&mut *reader).take(cap).read_until(b'\n', buf).await?;
            if read == 0 || buf.last() == Some(&b'\n') {
                return Ok(ReadLine::Oversized);
            }
        }
    }

    fn handle_line(&self, raw: &[u8]) -> LineOutcome {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let Ok(line) = str::from_utf8(raw) else {
            tracing::debug!(target: "dispatcher", peer = %self.peer, "dropping non utf-8 line");
            return LineOutcome::Malformed;
        };

        let Some(message) = parse_message(line) else {
            return LineOutcome::Malformed;
        };
        if !is_positive(&message.headline, &self.positive_words) {
            return LineOutcome::Rejected;
        }
        self.accumulator.append(message);
        LineOutcome::Accepted
    }
}
