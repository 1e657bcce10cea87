// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)] // no_std outside of tests and the std feature

pub mod common;
pub mod recorder;
pub mod sensor;

// Re-export key types for convenience
pub use common::{Command, Line, Reading, SamplerConfig, SamplerError};
pub use recorder::SyncRecorder;
pub use sensor::SamplingController;
