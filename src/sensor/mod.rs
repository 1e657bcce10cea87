// src/sensor/mod.rs

// Declare the modules within the sensor directory.
// These modules contain the device side of the probe: the sampling loop that
// answers `S`/`X` and streams readings.

mod formatter; // Logic to write a Line to the serial output
pub mod state; // RunState and PollOutcome
pub mod sync_sensor; // The blocking sampling controller

// --- Public Re-exports ---
pub use state::{PollOutcome, RunState};
pub use sync_sensor::SamplingController;
