// src/sensor/sync_sensor.rs

use super::formatter::write_line;
use super::state::{PollOutcome, RunState};
use crate::common::{
    command::Command,
    config::SamplerConfig,
    error::SamplerError,
    hal_traits::{ProbeSerial, ProbeTimer, TemperatureHumiditySensor},
    line::Line,
    types::Reading,
};

/// The probe's sampling loop, for SYNCHRONOUS (blocking) operation.
///
/// Owns the serial link, the timer and the sensor driver. One call to
/// [`poll`](Self::poll) is one iteration of the firmware loop:
///
/// 1. take at most one pending command byte (`S` starts, `X` stops, anything else is ignored);
/// 2. if a run is active and below its cap, read the sensor, emit the reading
///    and `Loop: <n>`, emit `Complete: ...` when the cap is hit, then pause for
///    the sample interval.
///
/// A stop command is only seen at the start of the next iteration, so it takes
/// effect at most one sample interval late.
#[derive(Debug)]
pub struct SamplingController<IF, S>
where
    IF: ProbeSerial + ProbeTimer,
    S: TemperatureHumiditySensor,
{
    interface: IF,
    sensor: S,
    config: SamplerConfig,
    state: RunState,
}

impl<IF, S> SamplingController<IF, S>
where
    IF: ProbeSerial + ProbeTimer,
    S: TemperatureHumiditySensor,
{
    pub fn new(interface: IF, sensor: S) -> Self {
        Self::with_config(interface, sensor, SamplerConfig::default())
    }

    /// A `max_samples` of 0 is treated as 1.
    pub fn with_config(interface: IF, sensor: S, mut config: SamplerConfig) -> Self {
        config.max_samples = config.max_samples.max(1);
        SamplingController {
            interface,
            sensor,
            config,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn samples_taken(&self) -> Option<u8> {
        self.state.samples_taken()
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Gives back the interface and the sensor driver.
    pub fn release(self) -> (IF, S) {
        (self.interface, self.sensor)
    }

    /// Runs the loop forever. I/O errors are logged and the loop carries on.
    pub fn run(&mut self) -> ! {
        log::debug!("Sampling loop running, {} samples per run", self.config.max_samples);
        loop {
            if let Err(e) = self.poll() {
                log::warn!("Sampling loop error: {:?}", e);
            }
        }
    }

    /// Executes one loop iteration.
    ///
    /// A failed serial read counts as "no command" and a failed acknowledgment
    /// write does not hold back the sampling step. The first write error of the
    /// iteration is returned once the iteration has run to the end.
    pub fn poll(&mut self) -> Result<PollOutcome, SamplerError<IF::Error>> {
        let acknowledged = match self.read_pending_byte() {
            Some(byte) => match Command::from_byte(byte) {
                Some(command) => self.handle_command(command),
                None => {
                    log::trace!("Ignoring byte {:#04x}", byte);
                    Ok(())
                }
            },
            None => Ok(()),
        };

        let outcome = match self.state {
            RunState::Sampling { completed } if completed < self.config.max_samples => {
                self.sample_once(completed)
            }
            _ => Ok(PollOutcome::NoSample),
        };

        acknowledged.and(outcome)
    }

    /// Applies a command and writes its acknowledgment line.
    ///
    /// `Start` always restarts the run from zero, even mid-run. `Stop` is
    /// acknowledged even when already idle.
    pub fn handle_command(&mut self, command: Command) -> Result<(), SamplerError<IF::Error>> {
        match command {
            Command::Start => {
                log::debug!("Run started");
                self.state = RunState::Sampling { completed: 0 };
                write_line(&mut self.interface, &Line::Started)
            }
            Command::Stop => {
                log::debug!("Run stopped after {:?} samples", self.state.samples_taken());
                self.state = RunState::Idle;
                write_line(&mut self.interface, &Line::Stopped)
            }
        }
    }

    // --- Sampling step (Private Helpers) ---

    fn read_pending_byte(&mut self) -> Option<u8> {
        match self.interface.read_byte() {
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(e)) => {
                log::warn!("Serial read failed: {:?}", e);
                None
            }
        }
    }

    fn acquire_reading(&mut self) -> Reading {
        let temperature = self.sensor.read_temperature();
        let humidity = self.sensor.read_humidity();
        // No validity check: an invalid driver value goes out as-is.
        Reading::new(self.config.moisture_placeholder, temperature, humidity)
    }

    /// Once the sensor has been read, the run advances and the pause happens
    /// no matter what the serial link does.
    fn sample_once(&mut self, completed: u8) -> Result<PollOutcome, SamplerError<IF::Error>> {
        let reading = self.acquire_reading();

        let count = completed + 1;
        let finished = count >= self.config.max_samples;
        self.state = if finished {
            RunState::Idle
        } else {
            RunState::Sampling { completed: count }
        };

        // Every line is attempted; the first error is kept.
        let mut written = write_line(&mut self.interface, &Line::Sample(reading));
        written = written.and(write_line(&mut self.interface, &Line::Loop(count)));
        if finished {
            log::debug!("Run complete after {} samples", count);
            written = written.and(write_line(
                &mut self.interface,
                &Line::Complete(self.config.max_samples),
            ));
        }

        self.interface.delay_ms(self.config.sample_interval_ms());

        written.map(|()| PollOutcome::Sampled { reading, count })
    }
}
