use sse::Broadcaster;
use std::sync::Arc;
use tokio::sync::watch;

pub mod config;
pub mod logging;

use config::Config;

// Service-level state shared by the router, the ingest path and every
// connection task. Needs to implement Clone to be able to be passed into
// Router as State.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub broadcaster: Arc<Broadcaster>,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            config,
            broadcaster: Arc::new(Broadcaster::new()),
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    /// A receiver that resolves once process shutdown has begun. Every open
    /// event stream holds one and closes when it fires.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Tells every open event stream to close.
    pub fn begin_shutdown(&self) {
        // Err only means no stream is currently subscribed.
        let _ = self.shutdown_tx.send(true);
    }
}
