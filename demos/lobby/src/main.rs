//! lobby — smallest runnable demo of the lift_sim dispatch simulation.
//!
//! A pool of elevators serves randomly generated trips in a small building.
//! Pass a JSON file with `DispatchConfig` fields to override the defaults:
//!
//! ```text
//! cargo run -p lobby -- lobby.json
//! RUST_LOG=debug cargo run -p lobby      # include every passing floor
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lift_core::DispatchConfig;
use lift_output::{CsvWriter, RecordingSink};
use lift_sim::{EventSink, RandomSource, TracingSink};

const OUTPUT_DIR: &str = "output/lobby";

fn load_config() -> Result<DispatchConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(DispatchConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!(path = %path, "loaded dispatch config");
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    println!("=== lobby — lift_sim elevator dispatch ===");
    println!(
        "Elevators: {}  |  Floors: {}  |  Requests: {}  |  Seed: {:?}",
        config.pool_size, config.floor_count, config.request_count, config.seed
    );
    println!(
        "Transit: {} ms/floor  |  Submit interval: {} ms",
        config.transit_delay_ms, config.submit_interval_ms
    );
    println!();

    // 1. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let recorder = Arc::new(RecordingSink::new(CsvWriter::new(Path::new(OUTPUT_DIR))?));
    let sink: Arc<dyn EventSink> = Arc::new((TracingSink, recorder.clone()));

    // 2. Run.
    let t0 = Instant::now();
    let outcome = lift_sim::run(&config, RandomSource::from_config(&config), sink)?;
    let elapsed = t0.elapsed();

    recorder.finish()?;
    if let Some(e) = recorder.take_error() {
        eprintln!("output error: {e}");
    }

    // 3. Summary.
    println!();
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  submitted: {}  |  rejected: {}  |  served: {}",
        outcome.feed.submitted.len(),
        outcome.feed.rejected,
        outcome.summary.served()
    );
    println!("  output written to {OUTPUT_DIR}/");
    println!();

    println!("{:<10} {:<8} {:<10} {:<8}", "Elevator", "Served", "Floors", "Final");
    println!("{}", "-".repeat(38));
    for report in &outcome.summary.reports {
        println!(
            "{:<10} {:<8} {:<10} {:<8}",
            report.elevator.to_string(),
            report.served,
            report.floors_travelled,
            report.final_floor.to_string(),
        );
    }

    Ok(())
}
