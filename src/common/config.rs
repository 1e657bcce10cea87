// src/common/config.rs

use super::timing;
use core::time::Duration;

/// Fixed parameters of a sampling run.
///
/// `Default` yields the probe's firmware constants: 5 samples, 2 s apart,
/// moisture reported as the placeholder `50.15`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Samples per run. A run stops on its own once this many were emitted.
    pub max_samples: u8,
    /// Pause after every emitted sample.
    pub sample_interval: Duration,
    /// Value reported in the moisture field.
    pub moisture_placeholder: f32,
}

impl SamplerConfig {
    pub const fn new() -> Self {
        SamplerConfig {
            max_samples: timing::MAX_SAMPLES,
            sample_interval: timing::SAMPLE_INTERVAL,
            moisture_placeholder: timing::PLACEHOLDER_MOISTURE,
        }
    }

    /// The pause in whole milliseconds, saturated to what `ProbeTimer::delay_ms` accepts.
    pub fn sample_interval_ms(&self) -> u32 {
        u32::try_from(self.sample_interval.as_millis()).unwrap_or(u32::MAX)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new()
    }
}
