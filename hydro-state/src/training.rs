//! Watching a model retrain triggered from the dashboard.
//!
//! The backend offers no completion signal, so the watch polls the metrics
//! endpoint every [`METRICS_POLL_INTERVAL`] and, after
//! [`ASSUMED_TRAINING_DURATION`], optimistically reports the run as
//! finished. That phase only means "stop polling", not that the job is done.

use hydro_core::{
    backend::{HydroBackend, TrainingMetrics},
    error::Result,
};
use log::{debug, info, warn};
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};

pub const METRICS_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub const ASSUMED_TRAINING_DURATION: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingPhase {
    Running,
    AssumedComplete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingProgress {
    pub phase: TrainingPhase,
    pub metrics: TrainingMetrics,
    /// Successful metric polls so far
    pub polls: u32,
}

impl Default for TrainingProgress {
    fn default() -> Self {
        Self {
            phase: TrainingPhase::Running,
            metrics: TrainingMetrics::default(),
            polls: 0,
        }
    }
}

/// Handle owning the poll task and the completion timer.
///
/// Dropping the handle cancels both.
pub struct TrainingWatch {
    progress: watch::Receiver<TrainingProgress>,
    poller: JoinHandle<()>,
    timer: JoinHandle<()>,
}

impl TrainingWatch {
    /// Trigger a retrain on the backend and start watching it.
    pub async fn start<B: HydroBackend + 'static>(backend: Arc<B>) -> Result<Self> {
        let ack = backend.retrain().await?;
        info!("Retraining requested: {}", ack.status);
        Ok(Self::spawn(backend))
    }

    /// Watch with the default poll interval and completion delay.
    pub fn spawn<B: HydroBackend + 'static>(backend: Arc<B>) -> Self {
        Self::spawn_with(backend, METRICS_POLL_INTERVAL, ASSUMED_TRAINING_DURATION)
    }

    pub fn spawn_with<B: HydroBackend + 'static>(
        backend: Arc<B>,
        poll_every: Duration,
        assume_done_after: Duration,
    ) -> Self {
        let (tx, progress) = watch::channel(TrainingProgress::default());
        let tx = Arc::new(tx);

        let poll_tx = Arc::clone(&tx);
        let poller = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_every);
            loop {
                ticker.tick().await;
                match backend.metrics().await {
                    Ok(metrics) => {
                        if let Some(latest) = metrics.latest() {
                            debug!(
                                "Epoch {} loss {:.4} IoU {:.4}",
                                latest.epoch, latest.loss, latest.iou
                            );
                        }
                        poll_tx.send_modify(|p| {
                            p.metrics = metrics;
                            p.polls += 1;
                        });
                    }
                    Err(e) => warn!("Training metrics poll failed: {}", e),
                }
                let done = poll_tx.borrow().phase == TrainingPhase::AssumedComplete;
                if done {
                    break;
                }
            }
        });

        let timer = tokio::spawn(async move {
            tokio::time::sleep(assume_done_after).await;
            info!("Assuming training finished after {:?}", assume_done_after);
            tx.send_modify(|p| p.phase = TrainingPhase::AssumedComplete);
        });

        Self {
            progress,
            poller,
            timer,
        }
    }

    /// Latest published progress.
    pub fn progress(&self) -> TrainingProgress {
        self.progress.borrow().clone()
    }

    /// Receiver that is notified on every progress change.
    pub fn subscribe(&self) -> watch::Receiver<TrainingProgress> {
        self.progress.clone()
    }

    /// True once polling has stopped, by completion or cancellation.
    pub fn is_finished(&self) -> bool {
        self.poller.is_finished()
    }

    /// Stop polling and the completion timer.
    pub fn cancel(&self) {
        self.poller.abort();
        self.timer.abort();
    }
}

impl Drop for TrainingWatch {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    #[tokio::test]
    async fn test_polls_until_assumed_complete() {
        let backend = Arc::new(FakeBackend::online());
        let training = TrainingWatch::spawn_with(
            Arc::clone(&backend),
            Duration::from_millis(10),
            Duration::from_millis(60),
        );
        let mut rx = training.subscribe();
        tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|p| p.phase == TrainingPhase::AssumedComplete),
        )
        .await
        .unwrap()
        .unwrap();

        let progress = training.progress();
        assert!(progress.polls >= 1);
        assert_eq!(progress.metrics.history.len() as u32, progress.polls);
    }

    #[tokio::test]
    async fn test_cancel_stops_polling() {
        let backend = Arc::new(FakeBackend::online());
        let training = TrainingWatch::spawn_with(
            Arc::clone(&backend),
            Duration::from_millis(10),
            Duration::from_secs(60),
        );
        tokio::time::sleep(Duration::from_millis(30)).await;
        training.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(training.is_finished());

        let calls = backend.metrics_calls();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(backend.metrics_calls(), calls);
        assert_eq!(training.progress().phase, TrainingPhase::Running);
    }

    #[tokio::test]
    async fn test_failed_polls_are_skipped() {
        let backend = Arc::new(FakeBackend::offline());
        let training = TrainingWatch::spawn_with(
            Arc::clone(&backend),
            Duration::from_millis(10),
            Duration::from_millis(40),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        let progress = training.progress();
        assert_eq!(progress.polls, 0);
        assert_eq!(progress.phase, TrainingPhase::AssumedComplete);
        assert!(backend.metrics_calls() >= 1);
    }

    #[tokio::test]
    async fn test_start_requires_backend() {
        let offline = Arc::new(FakeBackend::offline());
        assert!(TrainingWatch::start(offline).await.is_err());
        let online = Arc::new(FakeBackend::online());
        assert!(TrainingWatch::start(online).await.is_ok());
    }
}
