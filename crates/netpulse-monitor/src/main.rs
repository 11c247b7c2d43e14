//! netpulse monitor
//!
//! Headless console view over the health engine.
//!
//! - Re-samples and scores every cell on a fixed period (and once at startup)
//! - Logs a fleet summary per tick
//! - Reads operator commands from stdin (toggles, resets, views)
//! - Logs status events as operator actions progress

mod command;
mod view;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, watch};
use tracing_subscriber::EnvFilter;

use netpulse_common::metrics::render_prometheus;
use netpulse_common::models::TickReport;
use netpulse_common::summary::FleetSummary;
use netpulse_engine::Engine;
use netpulse_engine::config::EngineConfig;
use netpulse_engine::ticker::Ticker;

use crate::command::Command;

/// Console view over the netpulse health engine.
#[derive(Parser, Debug)]
#[command(name = "netpulse-monitor", about = "netpulse network health monitor")]
struct Cli {
    /// Engine config file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the tick interval in seconds.
    #[arg(long)]
    tick_interval_secs: Option<u64>,

    /// Fix the sampler seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing::info!(
        cells = config.catalog.len(),
        tick_interval_ms = config.tick_interval.as_millis() as u64,
        reset_delay_ms = config.reset_delay.as_millis() as u64,
        "netpulse-monitor starting"
    );

    let engine = Arc::new(Engine::new(config));
    let ticker = Ticker::spawn(Arc::clone(&engine), engine.tick_interval())?;

    // ── Task 1: per-tick summary log ────────────────────────────
    let summary_handle = tokio::spawn(log_ticks(ticker.subscribe()));

    // ── Task 2: status event log ────────────────────────────────
    let status_handle = tokio::spawn(log_status(engine.subscribe()));

    // ── Operator input ──────────────────────────────────────────
    println!("{}", command::HELP);
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received SIGINT, shutting down");
        }
        result = run_console(Arc::clone(&engine), &ticker) => {
            if let Err(e) = result {
                tracing::error!("console failed: {e:#}");
            }
        }
    }

    ticker.shutdown().await;
    summary_handle.abort();
    status_handle.abort();
    tracing::info!("netpulse-monitor stopped");
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_toml_str(&raw)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(secs) = cli.tick_interval_secs {
        anyhow::ensure!(secs > 0, "--tick-interval-secs must be > 0");
        config.tick_interval = Duration::from_secs(secs);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

async fn log_ticks(mut reports: watch::Receiver<Arc<TickReport>>) {
    while reports.changed().await.is_ok() {
        let report = reports.borrow_and_update().clone();
        let summary = FleetSummary::from_report(&report);
        tracing::info!(sequence = report.sequence, "{}", view::render_summary(&summary));
    }
}

async fn log_status(mut events: broadcast::Receiver<netpulse_common::events::StatusEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => tracing::info!(cell = %event.key(), "{}", event.text()),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "status log lagging");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}

/// Read commands until `quit` or end of input.
async fn run_console(engine: Arc<Engine>, ticker: &Ticker) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let cmd = match command::parse(&line, engine.catalog()) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match cmd {
            Command::Toggle(flag, key) => match engine.toggle(&key, flag) {
                Ok(outcome) => println!("{}", outcome.status),
                Err(e) => println!("{e}"),
            },
            // The status log reports both phases; the handle can go.
            Command::Reset(key) => {
                if let Err(e) = engine.reset_node(&key) {
                    println!("{e}");
                }
            }
            Command::Flags(key) => match engine.flags(&key) {
                Ok(flags) => println!(
                    "{key}: hardwareAcceleration={} qosOptimization={} reset={:?}",
                    flags.hardware_acceleration,
                    flags.qos_optimization,
                    engine.reset_state(&key)
                ),
                Err(e) => println!("{e}"),
            },
            Command::Table => {
                println!("{}", view::render_table(&ticker.latest(), engine.catalog()))
            }
            Command::Summary => println!(
                "{}",
                view::render_summary(&FleetSummary::from_report(&ticker.latest()))
            ),
            Command::Trend => println!("{}", view::render_trend(&engine.trend())),
            Command::Metrics => print!("{}", render_prometheus(&ticker.latest())),
            Command::Json => println!("{}", serde_json::to_string_pretty(&*ticker.latest())?),
            Command::Help => println!("{}", command::HELP),
            Command::Quit => break,
        }
    }
    Ok(())
}
