// src/recorder/sync_recorder/mod.rs

mod io_helpers;

use super::run_log::{RunEnd, RunLog, RunReadings};
use crate::common::{
    command::Command,
    error::SamplerError,
    hal_traits::{ProbeClock, ProbeSerial},
    line::{Line, LINE_CAPACITY},
    timing,
};
use core::fmt::Debug;
use core::time::Duration;

/// Host-side peer of the probe, for SYNCHRONOUS operations.
///
/// Sends the single-byte commands and turns the probe's line output back into
/// typed [`Line`] values.
#[derive(Debug)]
pub struct SyncRecorder<IF>
where
    IF: ProbeSerial + ProbeClock,
    IF::Error: Debug,
{
    interface: IF,
}

impl<IF> SyncRecorder<IF>
where
    IF: ProbeSerial + ProbeClock,
    IF::Error: Debug,
{
    pub fn new(interface: IF) -> Self {
        SyncRecorder { interface }
    }

    /// Gives back the interface.
    pub fn release(self) -> IF {
        self.interface
    }

    // --- Public Blocking Methods ---

    /// Sends `S` and waits for `Started`.
    ///
    /// Lines still in flight from an earlier run are skipped.
    pub fn start(&mut self) -> Result<(), SamplerError<IF::Error>> {
        self.command_and_await(Command::Start, Line::Started)
    }

    /// Sends `X` and waits for `Stopped`.
    pub fn stop(&mut self) -> Result<(), SamplerError<IF::Error>> {
        self.command_and_await(Command::Stop, Line::Stopped)
    }

    /// Reads and parses the next line, waiting up to one sample interval (plus margin) for it.
    pub fn read_line(&mut self) -> Result<Line, SamplerError<IF::Error>> {
        self.read_line_within(timing::LINE_TIMEOUT)
    }

    /// Starts a run and records it until the probe completes or is stopped.
    ///
    /// Malformed lines are logged and skipped. A `Loop: <n>` with no intact
    /// sample line before it counts as a dropped sample. A counter that does
    /// not follow the previous one, or that trails the samples received, is
    /// [`SamplerError::UnexpectedLine`]. A `Started` in the middle of the run
    /// means somebody restarted it; everything collected so far is dropped.
    pub fn collect_run(&mut self) -> Result<RunLog, SamplerError<IF::Error>> {
        self.start()?;

        let mut readings = RunReadings::new();
        let mut last_loop: u8 = 0;
        let mut dropped: usize = 0;
        loop {
            let line = match self.read_line() {
                Ok(line) => line,
                Err(SamplerError::InvalidLine(e)) => {
                    log::warn!("Skipping malformed line: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            match line {
                Line::Sample(reading) => {
                    readings.push(reading).map_err(|_| SamplerError::BufferOverflow {
                        needed: readings.len() + 1,
                        got: readings.capacity(),
                    })?;
                }
                Line::Loop(count) => {
                    let loops = usize::from(count);
                    if last_loop.checked_add(1) != Some(count) || loops < readings.len() {
                        log::warn!(
                            "Loop counter {} after loop {} with {} samples received",
                            count,
                            last_loop,
                            readings.len()
                        );
                        return Err(SamplerError::UnexpectedLine);
                    }
                    if loops > readings.len() + dropped {
                        log::warn!("Sample for loop {} was lost", count);
                    }
                    dropped = loops - readings.len();
                    last_loop = count;
                }
                Line::Complete(count) => {
                    log::debug!(
                        "Run complete: {} samples recorded, {} dropped",
                        readings.len(),
                        dropped
                    );
                    return Ok(RunLog::new(readings, RunEnd::Completed(count), dropped));
                }
                Line::Stopped => {
                    log::debug!("Run stopped: {} samples recorded", readings.len());
                    return Ok(RunLog::new(readings, RunEnd::Stopped, dropped));
                }
                Line::Started => {
                    log::debug!("Run restarted, dropping {} samples", readings.len());
                    readings.clear();
                    last_loop = 0;
                    dropped = 0;
                }
            }
        }
    }

    // --- Private Helpers ---

    fn command_and_await(
        &mut self,
        command: Command,
        expected: Line,
    ) -> Result<(), SamplerError<IF::Error>> {
        self.send_command_byte(command)?;
        log::debug!("Sent {}, awaiting {}", command, expected);

        let deadline = self.interface.now() + timing::ACK_TIMEOUT;
        loop {
            let now = self.interface.now();
            if now >= deadline {
                return Err(SamplerError::Timeout);
            }

            match self.read_line_within(deadline - now) {
                Ok(line) if line == expected => return Ok(()),
                Ok(line) => log::trace!("Skipping '{}' while awaiting '{}'", line, expected),
                Err(SamplerError::InvalidLine(e)) => log::warn!("Skipping malformed line: {}", e),
                Err(e) => return Err(e),
            }
        }
    }

    fn read_line_within(&mut self, timeout: Duration) -> Result<Line, SamplerError<IF::Error>> {
        let mut buffer = [0u8; LINE_CAPACITY];
        let raw = self.read_raw_line(&mut buffer, timeout)?;
        let line = Line::parse(raw)?;
        log::trace!("<- {}", line);
        Ok(line)
    }
}
