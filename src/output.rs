//! Output table and summary writers.
//!
//! One CSV row per simulated second, with per-minute values broadcast
//! back to second resolution, plus a JSON run summary. Flow rates are
//! converted to m³/h for display; the core works in m³/s and m³/min.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use csv::WriterBuilder;
use serde::Serialize;

use crate::config::{SimConfig, SECONDS_PER_HOUR};
use crate::minutes::broadcast;
use crate::sim::SimulationData;

/// Conversion from the per-minute reconstruction unit to display m³/h.
const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Clone, Serialize)]
pub struct OutputFiles {
    pub output_dir: PathBuf,
    pub csv_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Run summary persisted next to the data table.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub config: SimConfig,
    pub samples: usize,
    pub minutes: usize,
    pub total_pulses: u64,
    pub total_volume_m3: f64,
    pub outputs: OutputFiles,
}

fn fmt_f64(v: f64) -> String {
    format!("{v:.10}")
}

/// Writes the per-second data table. Event component columns are present
/// only when the run composed multiple events.
pub fn write_csv(path: &Path, data: &SimulationData) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to open CSV path {}", path.display()))?;

    let mut header = vec![
        "time_seconds".to_string(),
        "time_minutes".to_string(),
        "actual_flow_rate".to_string(),
        "pulse_counts".to_string(),
        "pulse_counts_per_minute".to_string(),
        "observed_flow_rate".to_string(),
        "smoothed_flow_rate".to_string(),
    ];
    if data.events.is_some() {
        header.push("baseline_rate".to_string());
        header.push("burst_rate".to_string());
        header.push("cycle_rate".to_string());
    }
    wtr.write_record(&header)?;

    let minute_index: Vec<usize> = (1..=data.minutes()).collect();
    let time_minutes = broadcast(&minute_index);
    let per_minute = broadcast(&data.per_minute_pulses);
    let observed = broadcast(&data.observed_m3min);
    let smoothed = broadcast(&data.smoothed_m3min);

    for t in 0..data.seconds() {
        let mut record = vec![
            t.to_string(),
            time_minutes[t].to_string(),
            fmt_f64(data.flow_m3s[t] * SECONDS_PER_HOUR),
            data.pulse_counts[t].to_string(),
            per_minute[t].to_string(),
            fmt_f64(observed[t] * MINUTES_PER_HOUR),
            fmt_f64(smoothed[t] * MINUTES_PER_HOUR),
        ];
        if let Some(events) = &data.events {
            record.push(fmt_f64(events.baseline[t] * SECONDS_PER_HOUR));
            record.push(fmt_f64(events.burst[t] * SECONDS_PER_HOUR));
            record.push(fmt_f64(events.cycle[t] * SECONDS_PER_HOUR));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_summary(path: &Path, summary: &Summary) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    fs::write(path, payload)
        .with_context(|| format!("failed to write summary: {}", path.display()))?;
    Ok(())
}

/// Builds the summary for a completed run.
pub fn build_summary(cfg: &SimConfig, data: &SimulationData, outputs: OutputFiles) -> Summary {
    Summary {
        config: cfg.clone(),
        samples: data.seconds(),
        minutes: data.minutes(),
        total_pulses: data.total_pulses(),
        total_volume_m3: data.total_volume_m3(),
        outputs,
    }
}
