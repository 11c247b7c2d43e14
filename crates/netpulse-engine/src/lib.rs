//! Network-health scoring and state-feedback engine.
//!
//! Every tick samples synthetic telemetry for each (service, region) cell,
//! biased by the operator's optimization toggles, and reduces each sample to
//! a composite health score. Operator actions mutate the per-cell toggles,
//! which only influence samples drawn on later ticks.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod sampler;
pub mod scorer;
pub mod store;
pub mod ticker;
pub mod trend;

pub use engine::Engine;
pub use error::EngineError;
