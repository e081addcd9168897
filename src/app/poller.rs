use crate::api::BackendApi;
use crate::app::Action;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Periodic deployment fetcher.
///
/// Fires once immediately and then every `interval`. Each fetch runs on its
/// own task so a slow request never delays the next tick; results are tagged
/// with a number drawn from `sequence`, which outlives any single poller so
/// numbering stays monotonic across sign-ins, and the state layer drops stale
/// responses. Every result also carries the connection `generation` it was
/// started under. Dropping the poller stops future ticks. Requests already
/// in flight still report back.
pub struct DeploymentPoller {
    handle: JoinHandle<()>,
}

impl DeploymentPoller {
    pub fn spawn(
        api: Arc<dyn BackendApi>,
        interval: Duration,
        sequence: Arc<AtomicU64>,
        generation: u64,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        tracing::info!(interval_secs = interval.as_secs(), generation, "starting deployment poller");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if action_tx.is_closed() {
                    break;
                }

                let seq = sequence.fetch_add(1, Ordering::Relaxed) + 1;
                let api = Arc::clone(&api);
                let tx = action_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(Action::PollStarted { generation, seq });
                    let outcome = api
                        .get_deployments()
                        .await
                        .map(|payload| payload.deployments)
                        .map_err(|e| e.to_string());
                    let _ = tx.send(Action::DeploymentsPolled {
                        generation,
                        seq,
                        outcome,
                    });
                });
            }
        });

        Self { handle }
    }
}

impl Drop for DeploymentPoller {
    fn drop(&mut self) {
        tracing::info!("stopping deployment poller");
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::FakeBackend;

    fn counter() -> Arc<AtomicU64> {
        Arc::new(AtomicU64::new(0))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> (Vec<u64>, usize) {
        let mut started = Vec::new();
        let mut completed = 0;
        while let Ok(action) = rx.try_recv() {
            match action {
                Action::PollStarted { seq, .. } => started.push(seq),
                Action::DeploymentsPolled { .. } => completed += 1,
                _ => {}
            }
        }
        (started, completed)
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_immediately_then_on_interval() {
        let backend = Arc::new(FakeBackend::with_deployments(Vec::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = DeploymentPoller::spawn(backend.clone(), Duration::from_secs(30), counter(), 1, tx);

        tokio::time::sleep(Duration::from_secs(65)).await;
        let (started, completed) = drain(&mut rx);
        assert_eq!(started, vec![1, 2, 3]);
        assert_eq!(completed, 3);
        assert_eq!(backend.deployment_calls(), 3);

        drop(poller);
        tokio::time::sleep(Duration::from_secs(120)).await;
        let (started, _) = drain(&mut rx);
        assert!(started.is_empty());
        assert_eq!(backend.deployment_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_reported_and_polling_continues() {
        let backend = Arc::new(FakeBackend::failing());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _poller = DeploymentPoller::spawn(backend.clone(), Duration::from_secs(10), counter(), 1, tx);

        tokio::time::sleep(Duration::from_secs(25)).await;
        let mut failures = 0;
        while let Ok(action) = rx.try_recv() {
            if let Action::DeploymentsPolled { outcome, .. } = action {
                assert!(outcome.is_err());
                failures += 1;
            }
        }
        assert_eq!(failures, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let backend = Arc::new(FakeBackend::with_deployments(Vec::new()));
        let (tx, rx) = mpsc::unbounded_channel();
        let poller = DeploymentPoller::spawn(backend.clone(), Duration::from_secs(5), counter(), 1, tx);

        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(rx);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(backend.deployment_calls(), 1);
        assert!(poller.handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_continues_across_pollers() {
        let backend = Arc::new(FakeBackend::with_deployments(Vec::new()));
        let sequence = counter();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let first = DeploymentPoller::spawn(backend.clone(), Duration::from_secs(30), sequence.clone(), 1, tx.clone());
        tokio::time::sleep(Duration::from_secs(35)).await;
        drop(first);

        let _second = DeploymentPoller::spawn(backend.clone(), Duration::from_secs(30), sequence, 2, tx);
        tokio::time::sleep(Duration::from_secs(1)).await;

        let (started, _) = drain(&mut rx);
        assert_eq!(started, vec![1, 2, 3]);
    }
}
