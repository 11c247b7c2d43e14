//! Data models for the netpulse health engine.
//!
//! These types are produced by the engine on every tick and consumed by the
//! view layer (console, metrics exporter). None of them carry behaviour
//! beyond small accessors; sampling and scoring live in `netpulse-engine`.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

// ── Catalog identifiers ─────────────────────────────────────────────

/// A monitored service, e.g. `Instagram`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Service(CompactString);

impl Service {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monitored region, e.g. `EU-West`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(CompactString);

impl Region {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One monitored unit: a service deployed in a region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub service: Service,
    pub region: Region,
}

impl CellKey {
    pub fn new(service: impl Into<CompactString>, region: impl Into<CompactString>) -> Self {
        Self {
            service: Service::new(service),
            region: Region::new(region),
        }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.service, self.region)
    }
}

// ── Optimization flags ──────────────────────────────────────────────

/// One of the two remediation toggles an operator can flip on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptimizationFlag {
    HardwareAcceleration,
    QosOptimization,
}

impl OptimizationFlag {
    /// Human-readable label used in status text.
    pub fn label(self) -> &'static str {
        match self {
            OptimizationFlag::HardwareAcceleration => "Hardware acceleration",
            OptimizationFlag::QosOptimization => "QoS optimization",
        }
    }
}

impl std::fmt::Display for OptimizationFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizationFlag::HardwareAcceleration => write!(f, "hardwareAcceleration"),
            OptimizationFlag::QosOptimization => write!(f, "qosOptimization"),
        }
    }
}

impl std::str::FromStr for OptimizationFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hardwareAcceleration" => Ok(OptimizationFlag::HardwareAcceleration),
            "qosOptimization" => Ok(OptimizationFlag::QosOptimization),
            other => Err(format!("unknown optimization flag: {other}")),
        }
    }
}

/// Active remediation toggles for one cell. Both default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationFlags {
    pub hardware_acceleration: bool,
    pub qos_optimization: bool,
}

impl OptimizationFlags {
    pub fn is_enabled(&self, flag: OptimizationFlag) -> bool {
        match flag {
            OptimizationFlag::HardwareAcceleration => self.hardware_acceleration,
            OptimizationFlag::QosOptimization => self.qos_optimization,
        }
    }

    /// Flip exactly one flag in place.
    pub fn toggle(&mut self, flag: OptimizationFlag) {
        match flag {
            OptimizationFlag::HardwareAcceleration => {
                self.hardware_acceleration = !self.hardware_acceleration
            }
            OptimizationFlag::QosOptimization => self.qos_optimization = !self.qos_optimization,
        }
    }
}

// ── Samples and scores ──────────────────────────────────────────────

/// One tick's synthetic metrics for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(rename = "traffic")]
    pub traffic_gbps: f64,
    #[serde(rename = "latency")]
    pub latency_ms: f64,
    #[serde(rename = "errorRate")]
    pub error_rate_pct: f64,
    #[serde(rename = "activeNodes")]
    pub active_nodes: u32,
}

/// Composite health of a cell. Capped at 100; no lower bound is enforced.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthScore(pub f64);

impl HealthScore {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn band(self) -> HealthBand {
        HealthBand::classify(self.0)
    }
}

impl std::fmt::Display for HealthScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Display bucket for a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Critical,
    Warning,
    Stable,
    Healthy,
}

impl HealthBand {
    pub const HEALTHY_MIN: f64 = 95.0;
    pub const STABLE_MIN: f64 = 90.0;
    pub const WARNING_MIN: f64 = 85.0;

    pub fn classify(score: f64) -> Self {
        if score >= Self::HEALTHY_MIN {
            HealthBand::Healthy
        } else if score >= Self::STABLE_MIN {
            HealthBand::Stable
        } else if score >= Self::WARNING_MIN {
            HealthBand::Warning
        } else {
            HealthBand::Critical
        }
    }

    /// All bands, best first.
    pub const ALL: [HealthBand; 4] = [
        HealthBand::Healthy,
        HealthBand::Stable,
        HealthBand::Warning,
        HealthBand::Critical,
    ];
}

impl std::fmt::Display for HealthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthBand::Healthy => write!(f, "healthy"),
            HealthBand::Stable => write!(f, "stable"),
            HealthBand::Warning => write!(f, "warning"),
            HealthBand::Critical => write!(f, "critical"),
        }
    }
}

// ── Tick report ─────────────────────────────────────────────────────

/// Sample and score for one cell in one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    pub key: CellKey,
    pub sample: RawSample,
    pub score: HealthScore,
}

/// The full score table produced by one tick, in catalog order
/// (services outer, regions inner).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Monotonic tick counter, starting at 1 for the first tick of an engine.
    pub sequence: u64,
    pub cells: Vec<CellReport>,
}

impl TickReport {
    pub fn get(&self, key: &CellKey) -> Option<&CellReport> {
        self.cells.iter().find(|c| &c.key == key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellReport> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_toggle_flips_one_flag() {
        let mut flags = OptimizationFlags::default();
        flags.toggle(OptimizationFlag::QosOptimization);
        assert!(flags.qos_optimization);
        assert!(!flags.hardware_acceleration);
        flags.toggle(OptimizationFlag::QosOptimization);
        assert_eq!(flags, OptimizationFlags::default());
    }

    #[test]
    fn flag_parses_wire_names() {
        assert_eq!(
            "hardwareAcceleration".parse::<OptimizationFlag>(),
            Ok(OptimizationFlag::HardwareAcceleration)
        );
        assert_eq!(
            "qosOptimization".parse::<OptimizationFlag>(),
            Ok(OptimizationFlag::QosOptimization)
        );
        assert!("turbo".parse::<OptimizationFlag>().is_err());
    }

    #[test]
    fn flags_serialize_camel_case() {
        let flags = OptimizationFlags {
            hardware_acceleration: true,
            qos_optimization: false,
        };
        let json = serde_json::to_value(flags).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"hardwareAcceleration": true, "qosOptimization": false})
        );
    }

    #[test]
    fn sample_serializes_with_metric_names() {
        let sample = RawSample {
            traffic_gbps: 1000.0,
            latency_ms: 60.0,
            error_rate_pct: 1.5,
            active_nodes: 120,
        };
        let json = serde_json::to_value(sample).unwrap();
        assert_eq!(json["traffic"], 1000.0);
        assert_eq!(json["errorRate"], 1.5);
        assert_eq!(json["activeNodes"], 120);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(HealthBand::classify(100.0), HealthBand::Healthy);
        assert_eq!(HealthBand::classify(95.0), HealthBand::Healthy);
        assert_eq!(HealthBand::classify(94.99), HealthBand::Stable);
        assert_eq!(HealthBand::classify(90.0), HealthBand::Stable);
        assert_eq!(HealthBand::classify(85.0), HealthBand::Warning);
        assert_eq!(HealthBand::classify(84.9), HealthBand::Critical);
        assert_eq!(HealthBand::classify(-3.0), HealthBand::Critical);
    }

    #[test]
    fn cell_key_display() {
        let key = CellKey::new("Quest Store", "APAC");
        assert_eq!(key.to_string(), "Quest Store (APAC)");
    }

    #[test]
    fn report_lookup_by_key() {
        let key = CellKey::new("WhatsApp", "LATAM");
        let report = TickReport {
            sequence: 1,
            cells: vec![CellReport {
                key: key.clone(),
                sample: RawSample {
                    traffic_gbps: 700.0,
                    latency_ms: 55.0,
                    error_rate_pct: 1.1,
                    active_nodes: 80,
                },
                score: HealthScore(45.0),
            }],
        };
        assert_eq!(report.get(&key).map(|c| c.score), Some(HealthScore(45.0)));
        assert!(report.get(&CellKey::new("WhatsApp", "APAC")).is_none());
    }
}
