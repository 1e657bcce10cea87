// src/common/mock.rs
//
// Shared test doubles for the serial link, the timer and the sensor driver.

use super::hal_traits::{ProbeClock, ProbeSerial, ProbeTimer, TemperatureHumiditySensor};
use core::time::Duration;
use std::collections::VecDeque;
use std::vec::Vec;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

// --- Mock Serial ---
#[derive(Debug, Clone, Default)]
pub(crate) struct MockSerial {
    read_queue: VecDeque<u8>,
    write_log: Vec<u8>,
    pub flush_count: u32,
    /// When set, the next `read_byte` fails with `MockCommError`.
    pub fail_next_read: bool,
    /// When set, every `read_byte` fails with `MockCommError`.
    pub fail_reads: bool,
    /// When set, every `write_byte` fails with `MockCommError` and nothing is logged.
    pub fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_read_data(&mut self, data: &[u8]) {
        self.read_queue.extend(data.iter().copied());
    }

    pub fn pending_reads(&self) -> usize {
        self.read_queue.len()
    }

    pub fn written(&self) -> &[u8] {
        &self.write_log
    }

    pub fn written_str(&self) -> &str {
        core::str::from_utf8(&self.write_log).unwrap()
    }

    pub fn clear_written(&mut self) {
        self.write_log.clear();
    }
}

impl ProbeSerial for MockSerial {
    type Error = MockCommError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        if self.fail_reads || self.fail_next_read {
            self.fail_next_read = false;
            return Err(nb::Error::Other(MockCommError));
        }
        self.read_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        self.write_log.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flush_count += 1;
        Ok(())
    }
}

// --- Mock Timer ---
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTimer {
    pub current_time_us: u64,
    /// Every `delay_ms` call, in order.
    pub delays_ms: Vec<u32>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    fn advance_time(&mut self, us: u64) {
        self.current_time_us = self.current_time_us.saturating_add(us);
    }
}

impl ProbeTimer for MockTimer {
    fn delay_us(&mut self, us: u32) {
        self.advance_time(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        self.advance_time((ms as u64) * 1000);
    }
}

impl ProbeClock for MockTimer {
    type Instant = MockInstant;

    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
}

// --- Mock Sensor ---
#[derive(Debug, Clone)]
pub(crate) struct MockSensor {
    pub temperature: f32,
    pub humidity: f32,
    pub reads: u32,
}

impl MockSensor {
    pub fn new(temperature: f32, humidity: f32) -> Self {
        MockSensor {
            temperature,
            humidity,
            reads: 0,
        }
    }
}

impl TemperatureHumiditySensor for MockSensor {
    fn read_temperature(&mut self) -> f32 {
        self.reads += 1;
        self.temperature
    }

    fn read_humidity(&mut self) -> f32 {
        self.humidity
    }
}
