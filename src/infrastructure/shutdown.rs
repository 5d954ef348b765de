use tokio_util::sync::CancellationToken;

/// Process-wide stop signal. Every listener and child token derives from one root token.
#[derive(Clone)]
pub struct Shutdown {
    token: CancellationToken,
}

#[derive(Clone)]
pub struct ShutdownListener {
    token: CancellationToken,
}

impl Shutdown {
    pub fn new() -> (Self, ShutdownListener) {
        let token = CancellationToken::new();
        let listener = ShutdownListener {
            token: token.clone(),
        };
        (Self { token }, listener)
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            token: self.token.clone(),
        }
    }

    /// Token cancelled together with this shutdown, but which can also be cancelled on its own.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn trigger(&self) {
        self.token.cancel();
    }
}

impl ShutdownListener {
    pub async fn notified(&self) {
        self.token.cancelled().await;
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }
}

pub fn install_signal_handlers(shutdown: Shutdown) {
    let ctrlc = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received ctrl-c");
            ctrlc.trigger();
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let term = shutdown.clone();
        tokio::spawn(async move {
            if let Ok(mut sig) = signal(SignalKind::terminate()) {
                sig.recv().await;
                tracing::info!("received SIGTERM");
                term.trigger();
            }
        });
    }
}
