//! src/shutdown.rs
//!
//! A process-wide stop flag carried over a `watch` channel. Long-running tasks hold a
//! receiver and select on `changed()` next to their own sleeps.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct ShutdownSignal {
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: Arc::new(tx),
            shutdown_rx: rx,
        }
    }

    pub fn trigger(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
