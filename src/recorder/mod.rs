// src/recorder/mod.rs

// The host side of the link: drives the probe with `S`/`X` and records what it streams back.
pub mod run_log;
pub mod sync_recorder;

// Re-export the public types
pub use run_log::{RunEnd, RunLog};
pub use sync_recorder::SyncRecorder;
