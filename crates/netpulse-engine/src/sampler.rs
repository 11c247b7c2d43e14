//! Synthetic telemetry generation.
//!
//! Every cell is drawn from the same distributions; only the optimization
//! flags bias the result. Hardware acceleration and QoS optimization act as
//! multipliers below one on latency (and, for QoS, on error rate). They never
//! touch traffic volume or node count.

use rand::RngExt as _;
use rand::SeedableRng;
use rand::rngs::StdRng;

use netpulse_common::models::{CellKey, OptimizationFlags, RawSample};

pub const TRAFFIC_GBPS: (f64, f64) = (500.0, 1500.0);
pub const LATENCY_MS: (f64, f64) = (50.0, 70.0);
pub const ERROR_RATE_PCT: (f64, f64) = (1.0, 2.0);
pub const ACTIVE_NODES: (f64, f64) = (75.0, 175.0);

pub const ACCELERATION_FACTOR: f64 = 0.8;
pub const QOS_FACTOR: f64 = 0.9;

/// Draws raw samples from a private random stream.
///
/// A seeded sampler replays the same stream: draws happen in a fixed order
/// (traffic, latency, error rate, nodes) whatever the flags are.
#[derive(Debug)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sample(&mut self, key: &CellKey, flags: OptimizationFlags) -> RawSample {
        let acceleration = if flags.hardware_acceleration {
            ACCELERATION_FACTOR
        } else {
            1.0
        };
        let qos = if flags.qos_optimization {
            QOS_FACTOR
        } else {
            1.0
        };

        let traffic_gbps = self.uniform(TRAFFIC_GBPS);
        let latency_ms = self.uniform(LATENCY_MS) * acceleration * qos;
        let error_rate_pct = self.uniform(ERROR_RATE_PCT) * qos;
        let active_nodes = self.uniform(ACTIVE_NODES).floor() as u32;

        tracing::trace!(
            cell = %key,
            traffic_gbps,
            latency_ms,
            error_rate_pct,
            active_nodes,
            "sampled"
        );

        RawSample {
            traffic_gbps,
            latency_ms,
            error_rate_pct,
            active_nodes,
        }
    }

    /// Uniform draw from `[lo, hi)`.
    pub(crate) fn uniform(&mut self, (lo, hi): (f64, f64)) -> f64 {
        self.rng.random_range(lo..hi)
    }
}
