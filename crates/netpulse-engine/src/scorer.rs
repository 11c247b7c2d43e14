//! Composite health scoring.
//!
//! Four sub-scores, each capped at 100, summed and scaled to a percentage,
//! then capped at 100 again. Traffic dominates the weights and error rate
//! barely registers. These calibration constants must stay verbatim.
//!
//! A NaN input yields a NaN score, which classifies as critical.
//!
//! Only the upper bound is clamped. Latency above 70 ms or an error rate
//! above 2 % produces a negative sub-score that is carried into the total.

use serde::Serialize;

use netpulse_common::models::{HealthScore, RawSample};

pub const TRAFFIC_TARGET_GBPS: f64 = 1500.0;
pub const LATENCY_CEILING_MS: f64 = 70.0;
pub const ERROR_RATE_CEILING_PCT: f64 = 2.0;
pub const NODE_TARGET: f64 = 175.0;

pub const TRAFFIC_WEIGHT: f64 = 0.85861477;
pub const LATENCY_WEIGHT: f64 = 0.04006869;
pub const ERROR_WEIGHT: f64 = 0.00114482;
pub const NODE_WEIGHT: f64 = 0.10017172;

const CAP: f64 = 100.0;

/// Weighted sub-scores of one sample, before scaling to a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub traffic: f64,
    pub latency: f64,
    pub error: f64,
    pub nodes: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> HealthScore {
        HealthScore(cap((self.traffic + self.latency + self.error + self.nodes) * 100.0))
    }
}

/// Upper clamp that lets NaN through. `f64::min` would turn a NaN term into
/// a perfect 100.
fn cap(v: f64) -> f64 {
    if v > CAP { CAP } else { v }
}

pub fn breakdown(sample: &RawSample) -> ScoreBreakdown {
    ScoreBreakdown {
        traffic: cap((sample.traffic_gbps / TRAFFIC_TARGET_GBPS) * TRAFFIC_WEIGHT),
        latency: cap(
            ((LATENCY_CEILING_MS - sample.latency_ms) / LATENCY_CEILING_MS) * LATENCY_WEIGHT,
        ),
        error: cap(
            ((ERROR_RATE_CEILING_PCT - sample.error_rate_pct) / ERROR_RATE_CEILING_PCT)
                * ERROR_WEIGHT,
        ),
        nodes: cap((f64::from(sample.active_nodes) / NODE_TARGET) * NODE_WEIGHT),
    }
}

pub fn score(sample: &RawSample) -> HealthScore {
    breakdown(sample).total()
}
