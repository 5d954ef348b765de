use std::io::{self, Write};

use anyhow::{Context, Result};
use parking_lot::Mutex;

use crate::domain::Digest;

/// Renders a digest once per report cycle.
///
/// The reporter calls this from the blocking pool, so implementations may do
/// blocking I/O; the next cycle waits until it returns.
pub trait Presenter: Send + Sync {
    fn present(&self, digest: &Digest) -> Result<()>;
}

/// Writes digests as plain text, stdout by default.
pub struct ConsolePresenter<W> {
    out: Mutex<W>,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn present(&self, digest: &Digest) -> Result<()> {
        let text = render_digest(digest);
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())
            .context("failed to write digest")?;
        out.flush().context("failed to flush digest")
    }
}

pub fn render_digest(digest: &Digest) -> String {
    let mut out = String::new();
    out.push_str("=======================================\n");
    out.push_str(&format!(
        "Positive news since the last digest: {}\n",
        digest.total_positive_count
    ));
    out.push_str("The most important news:\n");
    out.push_str("---------------------------------------\n");
    for message in &digest.selected {
        out.push_str(&format!("Prio. {}: {}\n", message.priority, message.headline));
    }
    out
}
