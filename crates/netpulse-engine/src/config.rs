use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use netpulse_common::models::{Region, Service};

use crate::catalog::{Catalog, DEFAULT_REGIONS, DEFAULT_SERVICES};
use crate::error::EngineError;

pub const CONFIG_VERSION: u32 = 1;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(30_000);
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3_000);
pub const DEFAULT_STATUS_CAPACITY: usize = 256;
const MIN_STATUS_CAPACITY: usize = 16;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfigInput {
    pub version: u32,
    pub tick_interval_ms: Option<u64>,
    pub reset_delay_ms: Option<u64>,
    pub seed: Option<u64>,
    pub status_channel_capacity: Option<usize>,
    pub catalog: CatalogConfigInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfigInput {
    pub services: Option<Vec<String>>,
    pub regions: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub version: u32,
    pub tick_interval: Duration,
    pub reset_delay: Duration,
    /// Fixes the sampler's random stream when set.
    pub seed: Option<u64>,
    pub status_channel_capacity: usize,
    pub catalog: Catalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            tick_interval: DEFAULT_TICK_INTERVAL,
            reset_delay: DEFAULT_RESET_DELAY,
            seed: None,
            status_channel_capacity: DEFAULT_STATUS_CAPACITY,
            catalog: Catalog::default(),
        }
    }
}

impl EngineConfigInput {
    pub fn resolve(self) -> Result<EngineConfig, EngineError> {
        let version = if self.version == 0 {
            CONFIG_VERSION
        } else {
            self.version
        };
        if version != CONFIG_VERSION {
            return Err(EngineError::Config(format!(
                "unsupported config version {version}"
            )));
        }

        let tick_interval = match self.tick_interval_ms {
            Some(0) => return Err(EngineError::Config("tick_interval_ms must be > 0".into())),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_TICK_INTERVAL,
        };
        let reset_delay = self
            .reset_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESET_DELAY);
        let status_channel_capacity = self
            .status_channel_capacity
            .unwrap_or(DEFAULT_STATUS_CAPACITY)
            .max(MIN_STATUS_CAPACITY);

        let services = names(self.catalog.services, DEFAULT_SERVICES);
        if services.is_empty() {
            return Err(EngineError::Config("catalog has no services".into()));
        }
        let regions = names(self.catalog.regions, DEFAULT_REGIONS);
        if regions.is_empty() {
            return Err(EngineError::Config("catalog has no regions".into()));
        }

        Ok(EngineConfig {
            version,
            tick_interval,
            reset_delay,
            seed: self.seed,
            status_channel_capacity,
            catalog: Catalog::new(
                services.into_iter().map(Service::new).collect(),
                regions.into_iter().map(Region::new).collect(),
            ),
        })
    }
}

/// Trim, drop blanks and duplicates, keep first-seen order.
fn names(input: Option<Vec<String>>, defaults: &[&str]) -> Vec<String> {
    let Some(list) = input else {
        return defaults.iter().map(|s| s.to_string()).collect();
    };
    let mut used = HashSet::new();
    let mut out = Vec::new();
    for name in list {
        let trimmed = name.trim();
        if trimmed.is_empty() || !used.insert(trimmed.to_string()) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, EngineError> {
        if input.trim().is_empty() {
            return Ok(EngineConfig::default());
        }
        let parsed: EngineConfigInput = toml::from_str(input)
            .map_err(|e| EngineError::Config(format!("invalid config TOML: {e}")))?;
        parsed.resolve()
    }
}
