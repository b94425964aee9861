//! Quiet-window debouncing
//!
//! Collapses a burst of triggers into a single fire once no trigger has
//! arrived for the quiet window. The page-side observer does the same with
//! a timer; this is the native-layer counterpart for host-driven reads.

use std::time::Duration;
use tokio::sync::mpsc;

/// Handle to a debounce worker; dropping it stops the worker
pub struct Debouncer {
    trigger_tx: mpsc::UnboundedSender<()>,
}

impl Debouncer {
    /// Spawn a worker with the given quiet window. The returned receiver
    /// yields one `()` per collapsed burst.
    pub fn spawn(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (trigger_tx, mut trigger_rx) = mpsc::unbounded_channel::<()>();
        let (fire_tx, fire_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while trigger_rx.recv().await.is_some() {
                // A burst is open; every further trigger restarts the window
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(quiet) => {
                            let _ = fire_tx.send(());
                            break;
                        }
                        more = trigger_rx.recv() => {
                            if more.is_none() {
                                return;
                            }
                        }
                    }
                }
            }
        });

        (Self { trigger_tx }, fire_rx)
    }

    /// Register a trigger; restarts the quiet window.
    pub fn trigger(&self) {
        let _ = self.trigger_tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Instant};

    const QUIET: Duration = Duration::from_millis(1500);

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_one_fire() {
        let (debouncer, mut fired) = Debouncer::spawn(QUIET);

        for _ in 0..5 {
            debouncer.trigger();
        }

        assert!(fired.recv().await.is_some());
        // No second fire without a new trigger
        assert!(timeout(Duration::from_secs(10), fired.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_restarts_on_each_trigger() {
        let (debouncer, mut fired) = Debouncer::spawn(QUIET);
        let start = Instant::now();

        debouncer.trigger();
        tokio::time::advance(Duration::from_millis(1000)).await;
        debouncer.trigger();
        tokio::time::advance(Duration::from_millis(1000)).await;
        debouncer.trigger();

        assert!(fired.recv().await.is_some());
        // Fired 1500ms after the last trigger, not the first
        assert_eq!(start.elapsed(), Duration::from_millis(3500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (debouncer, mut fired) = Debouncer::spawn(QUIET);

        debouncer.trigger();
        assert!(fired.recv().await.is_some());

        debouncer.trigger();
        assert!(fired.recv().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_worker_without_firing() {
        let (debouncer, mut fired) = Debouncer::spawn(QUIET);
        debouncer.trigger();
        drop(debouncer);

        assert!(fired.recv().await.is_none());
    }
}
