//! Status events published by operator actions.
//!
//! Toggles produce a single event describing the new flag state. Node resets
//! produce two: `pending` immediately and `done` after the reset delay.

use serde::{Deserialize, Serialize};

use crate::models::{CellKey, OptimizationFlag, OptimizationFlags};

/// Phase of a node reset as reported to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPhase {
    Pending,
    Done,
}

/// Current reset state of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetState {
    #[default]
    Idle,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetEvent {
    pub key: CellKey,
    pub phase: ResetPhase,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleEvent {
    pub key: CellKey,
    pub flag: OptimizationFlag,
    pub flags: OptimizationFlags,
    pub text: String,
}

/// Everything an operator action can announce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StatusEvent {
    #[serde(rename = "optimization.toggled")]
    Toggled(ToggleEvent),
    #[serde(rename = "node.reset")]
    Reset(ResetEvent),
}

impl StatusEvent {
    pub fn key(&self) -> &CellKey {
        match self {
            StatusEvent::Toggled(e) => &e.key,
            StatusEvent::Reset(e) => &e.key,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            StatusEvent::Toggled(e) => &e.text,
            StatusEvent::Reset(e) => &e.text,
        }
    }
}
