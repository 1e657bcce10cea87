// src/common/timing.rs

use core::time::Duration;

// === Sampling Run ===

/// Number of samples in one bounded sampling run.
pub const MAX_SAMPLES: u8 = 5;
/// Blocking pause after each emitted sample, before the next loop iteration.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(2000);

/// Moisture value reported in every reading. No moisture sensor is wired up yet.
pub const PLACEHOLDER_MOISTURE: f32 = 50.15;

// === Serial Link ===

/// Baud rate of the probe's serial console (8N1).
pub const BAUD_RATE: u32 = 115_200;
/// Nominal duration of one 10-bit frame at `BAUD_RATE`, rounded up.
pub const BYTE_DURATION: Duration = Duration::from_micros(87);

// === Recorder Timing ===

/// How long the recorder waits for `Started`/`Stopped` after sending a command.
/// The controller only sees a command once its current pause is over.
pub const ACK_TIMEOUT: Duration = Duration::from_millis(SAMPLE_INTERVAL.as_millis() as u64 + 500);
/// How long the recorder waits for the first byte of the next line during a run.
pub const LINE_TIMEOUT: Duration = Duration::from_millis(SAMPLE_INTERVAL.as_millis() as u64 + 1000);
/// Maximum gap between two bytes of the same line.
pub const INTER_CHARACTER_TIMEOUT: Duration = Duration::from_millis(20);
/// Poll period while waiting on a serial operation that would block.
pub const POLL_INTERVAL_US: u32 = 100;
