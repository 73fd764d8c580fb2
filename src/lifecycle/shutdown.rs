//! Shutdown fan-out.
//!
//! `main` spawns a task that waits for an OS signal and calls
//! [`Shutdown::trigger`]; [`HttpServer::run`](crate::http::HttpServer::run)
//! holds a receiver and stops accepting connections when it fires, letting
//! in-flight `/api/dados` fetches finish.

use tokio::sync::broadcast;

/// Cloneable handle that stops every server subscribed to it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop all subscribed servers. A no-op when nothing is running.
    pub fn trigger(&self) {
        let listening = self.tx.send(()).unwrap_or(0);
        tracing::debug!(listening, "Shutdown triggered");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
