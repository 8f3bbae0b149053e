use std::path::PathBuf;

use clap::Parser;

use metersim::config::SimConfig;
use metersim::output::{build_summary, write_csv, write_summary, OutputFiles};
use metersim::sim::run_simulation;

#[derive(Debug, Parser)]
#[command(name = "metersim")]
#[command(about = "Deterministic synthetic gas-meter pulse telemetry generator")]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "output-metersim")]
    outdir: PathBuf,

    /// Simulated horizon in seconds (multiple of 60)
    #[arg(long)]
    duration: Option<usize>,

    /// Measuring-chamber volume [m³]
    #[arg(long)]
    chamber_volume: Option<f64>,

    /// Compose baseline/burst/cycle events instead of a flat base rate
    #[arg(long)]
    superposition: Option<bool>,

    /// Flat base rate [m³/h], used when superposition is off
    #[arg(long)]
    base_flow_rate: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => SimConfig::from_toml_file(path)?,
        None => SimConfig::default(),
    };

    if let Some(v) = cli.duration {
        cfg.duration_s = v;
    }
    if let Some(v) = cli.chamber_volume {
        cfg.chamber_volume_m3 = v;
    }
    if let Some(v) = cli.superposition {
        cfg.superposition = v;
    }
    if let Some(v) = cli.base_flow_rate {
        cfg.base_flow_rate_m3h = v;
    }
    cfg.validate()?;

    let data = run_simulation(&cfg)?;

    let outputs = OutputFiles {
        output_dir: cli.outdir.clone(),
        csv_path: cli.outdir.join("simulated_flow_data.csv"),
        summary_path: cli.outdir.join("summary.json"),
    };

    write_csv(&outputs.csv_path, &data)?;
    let summary = build_summary(&cfg, &data, outputs.clone());
    write_summary(&summary.outputs.summary_path, &summary)?;

    println!(
        "Simulation complete. Samples: {} | Minutes: {} | Pulses: {}",
        summary.samples, summary.minutes, summary.total_pulses
    );
    println!("CSV: {}", summary.outputs.csv_path.display());
    println!("Summary: {}", summary.outputs.summary_path.display());

    Ok(())
}
