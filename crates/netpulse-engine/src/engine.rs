//! Engine facade consumed by the view layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;

use netpulse_common::events::{ResetState, StatusEvent, ToggleEvent};
use netpulse_common::models::{CellKey, CellReport, OptimizationFlag, OptimizationFlags, TickReport};
use netpulse_common::summary::FleetSummary;

use crate::actions::{self, ResetOperation, ResetTracker, ToggleOutcome};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::sampler::Sampler;
use crate::scorer;
use crate::store::OptimizationStore;
use crate::trend::TrendSeries;

/// Owns the optimization state and the sampler for one catalog.
///
/// Share it behind an `Arc`: ticks and operator actions may come from
/// different tasks, so the store and the sampler sit behind mutexes and
/// reset phases live in a concurrent map.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    tick_interval: Duration,
    reset_delay: Duration,
    store: Mutex<OptimizationStore>,
    sampler: Mutex<Sampler>,
    resets: ResetTracker,
    status_tx: broadcast::Sender<StatusEvent>,
    sequence: AtomicU64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let (status_tx, _) = broadcast::channel(config.status_channel_capacity.max(1));
        tracing::debug!(
            cells = config.catalog.len(),
            seeded = config.seed.is_some(),
            "engine created"
        );
        Self {
            catalog: config.catalog,
            tick_interval: config.tick_interval,
            reset_delay: config.reset_delay,
            store: Mutex::new(OptimizationStore::new()),
            sampler: Mutex::new(Sampler::new(config.seed)),
            resets: ResetTracker::default(),
            status_tx,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    /// Sample and score every cell in the catalog.
    ///
    /// Flags are read once at the start; a toggle racing with a tick lands
    /// on the next one.
    pub fn tick(&self) -> TickReport {
        let flags: Vec<(CellKey, OptimizationFlags)> = {
            let store = lock(&self.store);
            self.catalog
                .cells()
                .map(|key| {
                    let flags = store.get(&key);
                    (key, flags)
                })
                .collect()
        };

        let cells: Vec<CellReport> = {
            let mut sampler = lock(&self.sampler);
            flags
                .into_iter()
                .map(|(key, flags)| {
                    let sample = sampler.sample(&key, flags);
                    let score = scorer::score(&sample);
                    CellReport { key, sample, score }
                })
                .collect()
        };

        let report = TickReport {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            cells,
        };

        if tracing::enabled!(tracing::Level::DEBUG) {
            let summary = FleetSummary::from_report(&report);
            tracing::debug!(
                sequence = report.sequence,
                cells = summary.cells,
                global_health = summary.global_health,
                critical = summary.critical,
                "tick"
            );
        }
        report
    }

    pub fn flags(&self, key: &CellKey) -> Result<OptimizationFlags, EngineError> {
        self.check(key)?;
        Ok(lock(&self.store).get(key))
    }

    /// Flip one flag. Takes effect from the next tick.
    pub fn toggle(
        &self,
        key: &CellKey,
        flag: OptimizationFlag,
    ) -> Result<ToggleOutcome, EngineError> {
        self.check(key)?;
        let flags = lock(&self.store).toggle(key, flag);
        let status = actions::toggle_text(key, flag, flags);
        tracing::info!(cell = %key, %flag, enabled = flags.is_enabled(flag), "optimization toggled");

        let _ = self.status_tx.send(StatusEvent::Toggled(ToggleEvent {
            key: key.clone(),
            flag,
            flags,
            text: status.clone(),
        }));
        Ok(ToggleOutcome { flags, status })
    }

    pub fn toggle_hardware_acceleration(
        &self,
        key: &CellKey,
    ) -> Result<ToggleOutcome, EngineError> {
        self.toggle(key, OptimizationFlag::HardwareAcceleration)
    }

    pub fn toggle_qos_optimization(&self, key: &CellKey) -> Result<ToggleOutcome, EngineError> {
        self.toggle(key, OptimizationFlag::QosOptimization)
    }

    /// Start a node reset on `key`. Must be called from within a Tokio runtime.
    pub fn reset_node(&self, key: &CellKey) -> Result<ResetOperation, EngineError> {
        self.check(key)?;
        self.resets
            .start(key.clone(), self.reset_delay, self.status_tx.clone())
    }

    pub fn reset_state(&self, key: &CellKey) -> ResetState {
        self.resets.state(key)
    }

    /// Subscribe to status events from all operator actions.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.status_tx.subscribe()
    }

    /// 24-hour performance series, drawn from the engine's random stream.
    pub fn trend(&self) -> TrendSeries {
        TrendSeries::generate(&mut lock(&self.sampler))
    }

    fn check(&self, key: &CellKey) -> Result<(), EngineError> {
        if self.catalog.contains(key) {
            Ok(())
        } else {
            tracing::warn!(cell = %key, "rejected key outside catalog");
            Err(EngineError::stale(key))
        }
    }
}

/// Lock, recovering from poisoning. No critical section here can leave the
/// guarded value half-updated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
