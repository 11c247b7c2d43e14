//! Prometheus metrics rendering for tick reports.
//!
//! Renders a [`TickReport`] in Prometheus text exposition format, suitable
//! for scraping by Prometheus or compatible collectors.

use std::fmt::Write;

use crate::models::{CellReport, HealthBand, TickReport};
use crate::summary::FleetSummary;

/// Render a tick report as Prometheus text exposition format.
pub fn render_prometheus(report: &TickReport) -> String {
    let mut out = String::with_capacity(4096);

    // ── Per-cell gauges ─────────────────────────────────────────

    cell_gauge(
        &mut out,
        report,
        "netpulse_cell_traffic_gbps",
        "Sampled traffic in gigabits per second.",
        |c| format!("{:.3}", c.sample.traffic_gbps),
    );
    cell_gauge(
        &mut out,
        report,
        "netpulse_cell_latency_ms",
        "Sampled latency in milliseconds.",
        |c| format!("{:.3}", c.sample.latency_ms),
    );
    cell_gauge(
        &mut out,
        report,
        "netpulse_cell_error_rate_percent",
        "Sampled error rate in percent.",
        |c| format!("{:.6}", c.sample.error_rate_pct),
    );
    cell_gauge(
        &mut out,
        report,
        "netpulse_cell_active_nodes",
        "Active nodes serving the cell.",
        |c| c.sample.active_nodes.to_string(),
    );
    cell_gauge(
        &mut out,
        report,
        "netpulse_cell_health_score",
        "Composite health score (capped at 100).",
        |c| format!("{:.3}", c.score.value()),
    );

    // ── Aggregate metrics ───────────────────────────────────────

    let summary = FleetSummary::from_report(report);

    header(&mut out, "netpulse_tick_sequence", "Sequence number of the rendered tick.", "counter");
    let _ = writeln!(out, "netpulse_tick_sequence {}", report.sequence);

    header(&mut out, "netpulse_cells_total", "Number of monitored cells.", "gauge");
    let _ = writeln!(out, "netpulse_cells_total {}", summary.cells);

    header(&mut out, "netpulse_global_health_score", "Mean health score across cells.", "gauge");
    let _ = writeln!(out, "netpulse_global_health_score {:.3}", summary.global_health);

    header(&mut out, "netpulse_total_traffic_gbps", "Aggregate traffic across cells.", "gauge");
    let _ = writeln!(out, "netpulse_total_traffic_gbps {:.3}", summary.total_traffic_gbps);

    header(&mut out, "netpulse_utilization_percent", "Aggregate traffic against fleet ceiling.", "gauge");
    let _ = writeln!(out, "netpulse_utilization_percent {:.3}", summary.utilization_pct);

    header(&mut out, "netpulse_cells_by_band", "Number of cells per health band.", "gauge");
    for band in HealthBand::ALL {
        let _ = writeln!(
            out,
            "netpulse_cells_by_band{{band=\"{band}\"}} {}",
            summary.band_count(band)
        );
    }

    out
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {kind}");
}

fn cell_gauge(
    out: &mut String,
    report: &TickReport,
    name: &str,
    help: &str,
    value: impl Fn(&CellReport) -> String,
) {
    header(out, name, help, "gauge");
    for c in report.iter() {
        let _ = writeln!(
            out,
            "{name}{{service=\"{}\",region=\"{}\"}} {}",
            escape_label(c.key.service.as_str()),
            escape_label(c.key.region.as_str()),
            value(c)
        );
    }
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellKey, HealthScore, RawSample};

    fn sample_report() -> TickReport {
        TickReport {
            sequence: 7,
            cells: vec![
                CellReport {
                    key: CellKey::new("Facebook", "NA-East"),
                    sample: RawSample {
                        traffic_gbps: 1200.0,
                        latency_ms: 55.5,
                        error_rate_pct: 1.25,
                        active_nodes: 150,
                    },
                    score: HealthScore(95.5),
                },
                CellReport {
                    key: CellKey::new("Quest Store", "LATAM"),
                    sample: RawSample {
                        traffic_gbps: 600.0,
                        latency_ms: 68.0,
                        error_rate_pct: 1.9,
                        active_nodes: 80,
                    },
                    score: HealthScore(40.0),
                },
            ],
        }
    }

    #[test]
    fn render_contains_help_and_type_lines() {
        let out = render_prometheus(&sample_report());
        assert!(out.contains("# HELP netpulse_cell_traffic_gbps"));
        assert!(out.contains("# TYPE netpulse_cell_traffic_gbps gauge"));
        assert!(out.contains("# HELP netpulse_cell_health_score"));
        assert!(out.contains("# TYPE netpulse_tick_sequence counter"));
        assert!(out.contains("# HELP netpulse_cells_by_band"));
    }

    #[test]
    fn render_per_cell_values() {
        let out = render_prometheus(&sample_report());
        assert!(out.contains(
            r#"netpulse_cell_traffic_gbps{service="Facebook",region="NA-East"} 1200.000"#
        ));
        assert!(out.contains(
            r#"netpulse_cell_latency_ms{service="Quest Store",region="LATAM"} 68.000"#
        ));
        assert!(out.contains(
            r#"netpulse_cell_active_nodes{service="Facebook",region="NA-East"} 150"#
        ));
        assert!(out.contains(
            r#"netpulse_cell_health_score{service="Quest Store",region="LATAM"} 40.000"#
        ));
    }

    #[test]
    fn render_aggregate_values() {
        let out = render_prometheus(&sample_report());
        assert!(out.contains("netpulse_tick_sequence 7"));
        assert!(out.contains("netpulse_cells_total 2"));
        assert!(out.contains("netpulse_global_health_score 67.750"));
        assert!(out.contains("netpulse_total_traffic_gbps 1800.000"));
        assert!(out.contains(r#"netpulse_cells_by_band{band="healthy"} 1"#));
        assert!(out.contains(r#"netpulse_cells_by_band{band="critical"} 1"#));
    }

    #[test]
    fn render_empty_report() {
        let out = render_prometheus(&TickReport::default());
        assert!(out.contains("netpulse_cells_total 0"));
        assert!(out.contains("netpulse_global_health_score 0.000"));
    }

    #[test]
    fn label_values_are_escaped() {
        assert_eq!(escape_label(r#"a"b\c"#), r#"a\"b\\c"#);
    }

    #[test]
    fn newline_in_catalog_name_stays_on_one_sample_line() {
        let mut report = sample_report();
        report.cells.truncate(1);
        report.cells[0].key = CellKey::new("Face\nbook", "NA-East");
        let out = render_prometheus(&report);
        assert!(out.contains(
            r#"netpulse_cell_active_nodes{service="Face\nbook",region="NA-East"} 150"#
        ));
        assert!(out.lines().all(|l| !l.starts_with("book")));
    }
}
