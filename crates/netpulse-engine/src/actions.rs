//! Operator action handlers.
//!
//! Toggles are synchronous and only describe the new state. A node reset is
//! cosmetic: the cell goes `Pending` immediately and back to `Idle` after a
//! fixed delay. It never touches sampling or scoring, has no failure branch,
//! and cannot be cancelled once started.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use netpulse_common::events::{ResetEvent, ResetPhase, ResetState, StatusEvent};
use netpulse_common::models::{CellKey, OptimizationFlag, OptimizationFlags};

use crate::error::EngineError;

/// Result of flipping one optimization flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub flags: OptimizationFlags,
    pub status: String,
}

pub fn toggle_text(key: &CellKey, flag: OptimizationFlag, flags: OptimizationFlags) -> String {
    let state = if flags.is_enabled(flag) {
        "enabled"
    } else {
        "disabled"
    };
    format!("{} {state} for {key}", flag.label())
}

pub fn reset_pending_text(key: &CellKey) -> String {
    format!("Resetting nodes for {key}...")
}

pub fn reset_done_text(key: &CellKey) -> String {
    format!("Node reset complete for {key}")
}

/// Tracks outstanding resets per cell.
///
/// A cell is `Pending` while at least one reset on it has not completed.
#[derive(Debug, Clone, Default)]
pub struct ResetTracker {
    outstanding: Arc<DashMap<CellKey, u32>>,
}

impl ResetTracker {
    pub fn state(&self, key: &CellKey) -> ResetState {
        if self.outstanding.contains_key(key) {
            ResetState::Pending
        } else {
            ResetState::Idle
        }
    }

    fn begin(&self, key: &CellKey) {
        *self.outstanding.entry(key.clone()).or_insert(0) += 1;
    }

    fn finish(&self, key: &CellKey) {
        if let Some(mut n) = self.outstanding.get_mut(key) {
            *n = n.saturating_sub(1);
        }
        self.outstanding.remove_if(key, |_, n| *n == 0);
    }

    /// Start a reset on `key`. The `pending` event is published before this
    /// returns; `done` follows after `delay` on the current Tokio runtime.
    pub fn start(
        &self,
        key: CellKey,
        delay: Duration,
        status_tx: broadcast::Sender<StatusEvent>,
    ) -> Result<ResetOperation, EngineError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| EngineError::RuntimeUnavailable)?;

        let (tx, rx) = mpsc::unbounded_channel();
        self.begin(&key);

        let pending = ResetEvent {
            key: key.clone(),
            phase: ResetPhase::Pending,
            text: reset_pending_text(&key),
        };
        tracing::info!(cell = %key, delay_ms = delay.as_millis() as u64, "node reset pending");
        let _ = tx.send(pending.clone());
        // No subscribers is fine.
        let _ = status_tx.send(StatusEvent::Reset(pending));

        let tracker = self.clone();
        let task_key = key.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tracker.finish(&task_key);

            let done = ResetEvent {
                text: reset_done_text(&task_key),
                key: task_key,
                phase: ResetPhase::Done,
            };
            tracing::info!(cell = %done.key, "node reset done");
            let _ = tx.send(done.clone());
            let _ = status_tx.send(StatusEvent::Reset(done));
        });

        Ok(ResetOperation {
            key,
            events: rx,
            task,
        })
    }
}

/// Handle to an in-flight node reset.
///
/// Yields the `pending` event and then the `done` event. Dropping the handle
/// does not stop the reset; the cell still returns to `Idle` on schedule.
#[derive(Debug)]
pub struct ResetOperation {
    key: CellKey,
    events: mpsc::UnboundedReceiver<ResetEvent>,
    task: JoinHandle<()>,
}

impl ResetOperation {
    pub fn key(&self) -> &CellKey {
        &self.key
    }

    /// Next status event, or `None` once both have been delivered.
    pub async fn next_event(&mut self) -> Option<ResetEvent> {
        self.events.recv().await
    }

    /// Wait for the `done` event, skipping anything before it.
    pub async fn finished(mut self) -> Option<ResetEvent> {
        while let Some(event) = self.events.recv().await {
            if event.phase == ResetPhase::Done {
                return Some(event);
            }
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
