//! Fleet-wide aggregates over one tick report.

use serde::{Deserialize, Serialize};

use crate::models::{HealthBand, TickReport};

/// Nominal node capacity of a single cell.
pub const NODE_CAPACITY: u32 = 175;

/// Traffic ceiling of a single cell in Gbps, used for utilisation.
pub const TRAFFIC_CEILING_GBPS: f64 = 1500.0;

/// Aggregates rendered in the summary cards of the console view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub cells: usize,
    /// Mean health score across all cells.
    pub global_health: f64,
    pub total_traffic_gbps: f64,
    pub avg_latency_ms: f64,
    pub avg_error_rate_pct: f64,
    /// Mean active nodes per cell, out of [`NODE_CAPACITY`].
    pub avg_active_nodes: f64,
    /// Total traffic as a percentage of the fleet's traffic ceiling.
    pub utilization_pct: f64,
    pub healthy: usize,
    pub stable: usize,
    pub warning: usize,
    pub critical: usize,
}

impl FleetSummary {
    pub fn from_report(report: &TickReport) -> Self {
        let cells = report.len();
        if cells == 0 {
            return Self::default();
        }
        let n = cells as f64;

        let mut summary = FleetSummary {
            cells,
            ..Default::default()
        };
        let mut score_sum = 0.0;
        let mut latency_sum = 0.0;
        let mut error_sum = 0.0;
        let mut nodes_sum = 0u64;

        for cell in report.iter() {
            score_sum += cell.score.value();
            summary.total_traffic_gbps += cell.sample.traffic_gbps;
            latency_sum += cell.sample.latency_ms;
            error_sum += cell.sample.error_rate_pct;
            nodes_sum += u64::from(cell.sample.active_nodes);
            match cell.score.band() {
                HealthBand::Healthy => summary.healthy += 1,
                HealthBand::Stable => summary.stable += 1,
                HealthBand::Warning => summary.warning += 1,
                HealthBand::Critical => summary.critical += 1,
            }
        }

        summary.global_health = score_sum / n;
        summary.avg_latency_ms = latency_sum / n;
        summary.avg_error_rate_pct = error_sum / n;
        summary.avg_active_nodes = nodes_sum as f64 / n;
        summary.utilization_pct = summary.total_traffic_gbps / (TRAFFIC_CEILING_GBPS * n) * 100.0;
        summary
    }

    pub fn band_count(&self, band: HealthBand) -> usize {
        match band {
            HealthBand::Healthy => self.healthy,
            HealthBand::Stable => self.stable,
            HealthBand::Warning => self.warning,
            HealthBand::Critical => self.critical,
        }
    }
}
