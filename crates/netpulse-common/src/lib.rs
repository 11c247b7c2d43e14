//! Shared types for the netpulse health engine.
//!
//! This crate contains:
//! - **Data models**: Service, Region, CellKey, flags, samples, scores
//! - **Status events**: operator action outcomes and reset transitions
//! - **Summary**: fleet-wide aggregates over a tick report
//! - **Metrics**: Prometheus text rendering of a tick report

pub mod events;
pub mod metrics;
pub mod models;
pub mod summary;
