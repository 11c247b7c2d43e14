//! Plain-text rendering of engine output for the console.

use std::fmt::Write;

use netpulse_common::models::{HealthBand, TickReport};
use netpulse_common::summary::{FleetSummary, NODE_CAPACITY};
use netpulse_engine::catalog::Catalog;
use netpulse_engine::trend::TrendSeries;

const NAME_WIDTH: usize = 12;
const CELL_WIDTH: usize = 12;

fn band_marker(band: HealthBand) -> char {
    match band {
        HealthBand::Healthy => '+',
        HealthBand::Stable => ' ',
        HealthBand::Warning => '~',
        HealthBand::Critical => '!',
    }
}

/// Services-by-regions score grid.
pub fn render_table(report: &TickReport, catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:NAME_WIDTH$}", format!("tick #{}", report.sequence));
    for region in catalog.regions() {
        let _ = write!(out, "{:>CELL_WIDTH$}", region.as_str());
    }
    out.push('\n');

    for service in catalog.services() {
        let _ = write!(out, "{:NAME_WIDTH$}", service.as_str());
        for region in catalog.regions() {
            let cell = report
                .iter()
                .find(|c| &c.key.service == service && &c.key.region == region);
            match cell {
                Some(c) => {
                    let text = format!("{}{}", c.score, band_marker(c.score.band()));
                    let _ = write!(out, "{text:>CELL_WIDTH$}");
                }
                None => {
                    let _ = write!(out, "{:>CELL_WIDTH$}", "-");
                }
            }
        }
        out.push('\n');
    }
    out.push_str("(+ healthy, blank stable, ~ warning, ! critical)");
    out
}

pub fn render_summary(summary: &FleetSummary) -> String {
    format!(
        "global health {:.1}% | traffic {:.1} Gbps | latency {:.1} ms | errors {:.2}% | \
         nodes {:.0}/{NODE_CAPACITY} | utilization {:.1}% | \
         healthy {} stable {} warning {} critical {}",
        summary.global_health,
        summary.total_traffic_gbps,
        summary.avg_latency_ms,
        summary.avg_error_rate_pct,
        summary.avg_active_nodes,
        summary.utilization_pct,
        summary.healthy,
        summary.stable,
        summary.warning,
        summary.critical,
    )
}

pub fn render_trend(series: &TrendSeries) -> String {
    let mut out = String::from("hour    traffic(Gbps)  latency(ms)  errors(%)\n");
    for p in &series.points {
        let _ = writeln!(
            out,
            "{:<6}{:>15.1}{:>13.1}{:>11.2}",
            p.label, p.traffic_gbps, p.latency_ms, p.error_rate_pct
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use netpulse_engine::Engine;
    use netpulse_engine::config::EngineConfig;

    fn engine() -> Engine {
        Engine::new(EngineConfig {
            seed: Some(17),
            ..EngineConfig::default()
        })
    }

    #[test]
    fn table_has_header_and_one_row_per_service() {
        let engine = engine();
        let out = render_table(&engine.tick(), engine.catalog());
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("tick #1"));
        assert!(lines[0].contains("EU-Central"));
        assert_eq!(lines.len(), 1 + 6 + 1);
        assert!(lines[6].starts_with("Quest Store"));
        assert!(!out.contains(" - "));
    }

    #[test]
    fn legend_names_every_band() {
        let engine = engine();
        let out = render_table(&engine.tick(), engine.catalog());
        let legend = out.lines().last().unwrap();
        for band in HealthBand::ALL {
            assert!(legend.contains(&band.to_string()), "{band} missing from {legend}");
        }
    }

    #[test]
    fn empty_report_renders_placeholders() {
        let out = render_table(&TickReport::default(), &Catalog::default());
        assert!(out.lines().nth(1).unwrap().contains('-'));
    }

    #[test]
    fn summary_line_mentions_capacity() {
        let engine = engine();
        let out = render_summary(&FleetSummary::from_report(&engine.tick()));
        assert!(out.contains("/175"));
        assert!(out.starts_with("global health"));
    }

    #[test]
    fn trend_has_24_rows() {
        let out = render_trend(&engine().trend());
        assert_eq!(out.lines().count(), 25);
        assert!(out.lines().nth(1).unwrap().starts_with("0:00"));
    }
}
