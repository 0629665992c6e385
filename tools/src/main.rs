//! scenario-runner: headless driver for the epiviz analytical layer.
//!
//! Usage:
//!   scenario-runner --seed 42 --days 200 --groups 2
//!   scenario-runner --input run.json --output-type HospitalIncidence
//!   scenario-runner --seed 7 --json > report.json

use anyhow::{Context, Result};
use epiviz_core::{
    format::thousands,
    recipes::{arm_series, peak_labels, prevented_summary, PreventedSummary},
    scale::{LinearScale, ScalePair},
    scenario::ScenarioRun,
    session::Session,
    synthetic::{self, SyntheticConfig},
    types::{MitigationType, OutputType},
};
use serde::Serialize;
use std::env;
use std::fs;

/// One curve peak, flattened for the JSON report.
#[derive(Debug, Serialize)]
struct PeakReport {
    arm: MitigationType,
    day: u32,
    value: f64,
}

/// Everything the runner prints, in one serializable shape for `--json`.
#[derive(Debug, Serialize)]
struct RunReport {
    source: String,
    rows: usize,
    summary: PreventedSummary,
    peaks: Vec<PeakReport>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 200u32);
    let groups = parse_arg(&args, "--groups", 2usize);
    let as_json = args.iter().any(|a| a == "--json");
    let unmitigated_only = args.iter().any(|a| a == "--unmitigated-only");
    let input = args
        .windows(2)
        .find(|w| w[0] == "--input")
        .map(|w| w[1].as_str());
    let output_type: OutputType = args
        .windows(2)
        .find(|w| w[0] == "--output-type")
        .map(|w| w[1].parse())
        .transpose()?
        .unwrap_or(OutputType::InfectionIncidence);

    let run: ScenarioRun = match input {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            log::info!("loading scenario run from {path}");
            serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?
        }
        None => {
            log::info!("generating synthetic run: seed {seed}, {days} days, {groups} age groups");
            synthetic::generate(&SyntheticConfig {
                seed,
                days,
                age_groups: groups,
                mitigated: !unmitigated_only,
            })
        }
    };

    let mut session = Session::new();
    let run_table = session.ingest(&run);

    let group_labels: Vec<String> = (0..groups).map(|g| format!("Age group {g}")).collect();
    let label_refs: Vec<&str> = group_labels.iter().map(String::as_str).collect();
    let summary = prevented_summary(&run_table.table, output_type, &label_refs);

    // Peak labels for the comparison chart, on a nominal 640x400 canvas.
    let series = arm_series(&run_table.table, output_type);
    let max_x = run_table.table.max_day().unwrap_or(1).max(1);
    let max_y = series
        .values()
        .flat_map(|points| points.iter().map(|p| p.y))
        .fold(0.0f64, f64::max)
        .max(1.0);
    let scales = ScalePair {
        x: LinearScale::new("x", (0.0, f64::from(max_x)), (40.0, 620.0))?,
        y: LinearScale::new("y", (0.0, max_y), (370.0, 20.0))?,
    };
    let peaks: Vec<PeakReport> = peak_labels(&series, &scales)
        .into_iter()
        .map(|label| PeakReport {
            arm: label.arm,
            day: label.at.x as u32,
            value: label.at.y,
        })
        .collect();

    if as_json {
        let report = RunReport {
            source: input.unwrap_or("synthetic").to_string(),
            rows: run_table.table.len(),
            summary,
            peaks,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("epiviz — scenario-runner");
    println!("  source:       {}", input.unwrap_or("synthetic"));
    if input.is_none() {
        println!("  seed:         {seed}");
    }
    println!("  rows:         {}", run_table.table.len());
    println!(
        "  arms:         {}",
        run_table
            .mitigation_types
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  output type:  {output_type}");
    println!();

    println!("=== {} SUMMARY ===", output_type.label().to_uppercase());
    for row in &summary.rows {
        let fmt = |v: Option<f64>| v.map(thousands).unwrap_or_else(|| "-".to_string());
        let pct = row
            .prevented_pct
            .map(|p| format!("{:.1}%", p * 100.0))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<14} | Unmitigated: {:>12} | Mitigated: {:>12} | Prevented: {:>12} ({})",
            row.group,
            fmt(row.unmitigated),
            fmt(row.mitigated),
            fmt(row.prevented),
            pct,
        );
    }

    println!();
    println!("=== CURVE PEAKS ===");
    for peak in &peaks {
        println!(
            "  {:<12} peak {:>12} on day {}",
            peak.arm.as_str(),
            thousands(peak.value),
            peak.day,
        );
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
