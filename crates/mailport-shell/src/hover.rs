//! Link-hover preview with stale-result suppression
//!
//! Every hover transition bumps a generation counter. A resolution result
//! is applied only if its generation is still current, so an in-flight
//! resolve for a link the mouse has left can never overwrite the display.

use mailport_resolver::LinkResolve;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Status-text driver for hovered links
pub struct LinkPreview<R> {
    resolver: Arc<R>,
    generation: Arc<AtomicU64>,
    status_tx: mpsc::UnboundedSender<Option<String>>,
}

impl<R: LinkResolve + 'static> LinkPreview<R> {
    /// Returns the preview and the stream of status-text updates
    /// (None clears the display).
    pub fn new(resolver: Arc<R>) -> (Self, mpsc::UnboundedReceiver<Option<String>>) {
        let (status_tx, status_rx) = mpsc::unbounded_channel();
        (
            Self {
                resolver,
                generation: Arc::new(AtomicU64::new(0)),
                status_tx,
            },
            status_rx,
        )
    }

    /// Handle a hover transition. An empty URL clears the display and
    /// invalidates any in-flight resolution.
    pub fn hover(&self, url: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if url.is_empty() {
            let _ = self.status_tx.send(None);
            return;
        }

        // Show the raw URL immediately; a resolution may upgrade it later
        let _ = self.status_tx.send(Some(url.to_string()));

        if !self.resolver.is_candidate(url) {
            return;
        }

        let resolver = Arc::clone(&self.resolver);
        let generations = Arc::clone(&self.generation);
        let status_tx = self.status_tx.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            let Some(resolved) = resolver.resolve(&url).await else {
                return;
            };
            if generations.load(Ordering::SeqCst) == generation {
                let _ = status_tx.send(Some(resolved));
            } else {
                debug!("Discarding stale resolution for {}", url);
            }
        });
    }
}
