//! Deterministic synthetic gas-meter pulse telemetry generator.
//!
//! Models how a positive-displacement meter discretizes continuous flow
//! into volumetric pulses, and how a monitoring pipeline reconstructs
//! coarse flow estimates from the pulse stream. The output table is used
//! to validate leak-detection logic before running it on real telemetry.

pub mod config;
pub mod error;
pub mod events;
pub mod meter;
pub mod minutes;
pub mod output;
pub mod perturb;
pub mod reconstruct;
pub mod sim;
pub mod smooth;

pub use config::SimConfig;
pub use error::SimError;
pub use events::{build_event, EventKind, FlowEvent};
pub use meter::{pulse_counts, PulseAccumulator};
pub use sim::{run_simulation, EventSeries, SimulationData};
