//! Periodic re-computation of the score table.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use netpulse_common::models::TickReport;

use crate::engine::Engine;
use crate::error::EngineError;

/// Repeating tick task. Ticks once immediately, then every `period`.
///
/// The task is aborted when the `Ticker` is dropped.
#[derive(Debug)]
pub struct Ticker {
    task: JoinHandle<()>,
    reports: watch::Receiver<Arc<TickReport>>,
}

impl Ticker {
    pub fn spawn(engine: Arc<Engine>, period: Duration) -> Result<Self, EngineError> {
        if period.is_zero() {
            return Err(EngineError::Config("tick period must be > 0".into()));
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| EngineError::RuntimeUnavailable)?;
        let (tx, reports) = watch::channel(Arc::new(TickReport::default()));

        tracing::info!(period_ms = period.as_millis() as u64, "ticker started");
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tx.send_replace(Arc::new(engine.tick()));
            }
        });

        Ok(Self { task, reports })
    }

    /// Receiver that is notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TickReport>> {
        self.reports.clone()
    }

    /// Most recent report; sequence 0 means no tick has run yet.
    pub fn latest(&self) -> Arc<TickReport> {
        self.reports.borrow().clone()
    }

    /// Abort the task and wait for it to wind down.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        tracing::info!("ticker stopped");
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn engine() -> Arc<Engine> {
        Arc::new(Engine::new(EngineConfig {
            seed: Some(21),
            ..EngineConfig::default()
        }))
    }

    #[test]
    fn spawn_outside_runtime_is_an_error() {
        assert!(matches!(
            Ticker::spawn(engine(), Duration::from_secs(30)),
            Err(EngineError::RuntimeUnavailable)
        ));
    }

    #[tokio::test]
    async fn zero_period_is_rejected() {
        assert!(matches!(
            Ticker::spawn(engine(), Duration::ZERO),
            Err(EngineError::Config(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_immediately_then_every_period() {
        let ticker = Ticker::spawn(engine(), Duration::from_secs(30)).unwrap();
        let mut rx = ticker.subscribe();
        let start = tokio::time::Instant::now();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().sequence, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().sequence, 2);
        assert_eq!(start.elapsed(), Duration::from_secs(30));

        assert_eq!(ticker.latest().sequence, 2);
        assert_eq!(ticker.latest().len(), 36);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_ticking() {
        let ticker = Ticker::spawn(engine(), Duration::from_secs(30)).unwrap();
        let mut rx = ticker.subscribe();
        rx.changed().await.unwrap();

        ticker.shutdown().await;
        assert!(rx.changed().await.is_err());
    }
}
