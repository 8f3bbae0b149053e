use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Seconds per aggregation window. The reporting pipeline works on
/// per-minute pulse counts, so the horizon must tile into whole minutes.
pub const WINDOW_S: usize = 60;

/// Seconds per hour, used to convert between the m³/h rates quoted in
/// configuration and the m³/s rates the integrator works in.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Runtime configuration for one simulated meter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated horizon [s]; must be a positive multiple of 60
    pub duration_s: usize,
    /// Measuring-chamber volume, one pulse per chamber [m³]
    pub chamber_volume_m3: f64,
    /// Compose baseline/burst/cycle events instead of a flat base rate
    pub superposition: bool,
    /// Flat base rate [m³/h], used only when `superposition` is false
    pub base_flow_rate_m3h: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration_s: 3600,
            chamber_volume_m3: 0.01,
            superposition: true,
            base_flow_rate_m3h: 1.3,
        }
    }
}

impl SimConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let cfg: SimConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_s == 0 {
            return Err(SimError::Configuration("duration_s must be > 0".into()));
        }
        if self.duration_s % WINDOW_S != 0 {
            return Err(SimError::Configuration(format!(
                "duration_s must be a multiple of {WINDOW_S}, got {}",
                self.duration_s
            )));
        }
        if !self.chamber_volume_m3.is_finite() || self.chamber_volume_m3 <= 0.0 {
            return Err(SimError::Configuration(format!(
                "chamber_volume_m3 must be a positive finite number, got {}",
                self.chamber_volume_m3
            )));
        }
        if !self.base_flow_rate_m3h.is_finite() || self.base_flow_rate_m3h < 0.0 {
            return Err(SimError::Configuration(format!(
                "base_flow_rate_m3h must be a non-negative finite number, got {}",
                self.base_flow_rate_m3h
            )));
        }
        Ok(())
    }

    /// Horizon in whole minutes.
    pub fn minutes(&self) -> usize {
        self.duration_s / WINDOW_S
    }

    /// Flat base rate in the integrator's working unit [m³/s].
    pub fn base_flow_rate_m3s(&self) -> f64 {
        self.base_flow_rate_m3h / SECONDS_PER_HOUR
    }
}
