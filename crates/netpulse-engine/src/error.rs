use thiserror::Error;

use netpulse_common::models::CellKey;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The key does not address a cell in this engine's catalog.
    #[error("stale reference: {service} ({region}) is not in the catalog")]
    StaleReference { service: String, region: String },
    /// A reset was requested outside a Tokio runtime.
    #[error("no async runtime available to schedule the reset")]
    RuntimeUnavailable,
    #[error("invalid config: {0}")]
    Config(String),
}

impl EngineError {
    pub fn stale(key: &CellKey) -> Self {
        EngineError::StaleReference {
            service: key.service.to_string(),
            region: key.region.to_string(),
        }
    }
}
