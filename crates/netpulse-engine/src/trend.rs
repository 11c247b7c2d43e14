//! 24-hour network performance series for the trend chart.

use serde::Serialize;

use crate::sampler::Sampler;

pub const HOURS: usize = 24;

const TRAFFIC_GBPS: (f64, f64) = (500.0, 1500.0);
const LATENCY_MS: (f64, f64) = (20.0, 70.0);
const ERROR_RATE_PCT: (f64, f64) = (0.0, 2.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Hour label, `"0:00"` through `"23:00"`.
    pub label: String,
    pub traffic_gbps: f64,
    pub latency_ms: f64,
    pub error_rate_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Draw one point per hour. Not influenced by optimization flags.
    pub fn generate(sampler: &mut Sampler) -> Self {
        let points = (0..HOURS)
            .map(|hour| TrendPoint {
                label: format!("{hour}:00"),
                traffic_gbps: sampler.uniform(TRAFFIC_GBPS),
                latency_ms: sampler.uniform(LATENCY_MS),
                error_rate_pct: sampler.uniform(ERROR_RATE_PCT),
            })
            .collect();
        Self { points }
    }
}
