// src/sensor/state.rs

use crate::common::types::Reading;

/// Run state of the sampling controller.
///
/// The sample counter only exists while a run is active.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not sampling; waiting for `S`.
    #[default]
    Idle,
    /// A run is active and `completed` samples have been emitted so far.
    Sampling { completed: u8 },
}

impl RunState {
    #[inline]
    pub const fn is_running(&self) -> bool {
        matches!(self, RunState::Sampling { .. })
    }

    /// Samples emitted in the active run, or `None` when idle.
    #[inline]
    pub const fn samples_taken(&self) -> Option<u8> {
        match self {
            RunState::Idle => None,
            RunState::Sampling { completed } => Some(*completed),
        }
    }
}

/// What one loop iteration did.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PollOutcome {
    /// No sample was taken; the iteration returned without pausing.
    NoSample,
    /// A sample was emitted and the loop paused afterwards.
    /// `count` is the 1-based position of the sample in its run.
    Sampled { reading: Reading, count: u8 },
}
