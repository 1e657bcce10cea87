// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Abstraction for the blocking delays the sampling loop and the recorder need.
///
/// The sampling controller's only suspension point goes through this trait,
/// so a mock implementation can observe (and skip) every wait.
pub trait ProbeTimer {
    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// A point in time as reported by a [`ProbeClock`].
pub trait ProbeInstant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> ProbeInstant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// A timer that can also tell the time, used to enforce read deadlines.
pub trait ProbeClock: ProbeTimer {
    type Instant: ProbeInstant;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for synchronous (non-blocking) byte-oriented serial communication.
pub trait ProbeSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or `Err(nb::Error::WouldBlock)`
    /// if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}

/// The temperature/humidity driver the controller samples.
///
/// Drivers report an invalid reading with `f32::NAN`; callers pass it through untouched.
pub trait TemperatureHumiditySensor {
    /// Temperature in degrees Celsius.
    fn read_temperature(&mut self) -> f32;

    /// Relative humidity in percent.
    fn read_humidity(&mut self) -> f32;
}

/// Bundles a serial peripheral and a timer into a single interface value.
///
/// HALs usually hand these out as separate peripherals; the controller and the
/// recorder want one `IF` implementing both sides.
#[derive(Debug)]
pub struct ProbePort<S, T> {
    pub serial: S,
    pub timer: T,
}

impl<S, T> ProbePort<S, T> {
    pub fn new(serial: S, timer: T) -> Self {
        ProbePort { serial, timer }
    }

    pub fn release(self) -> (S, T) {
        (self.serial, self.timer)
    }
}

impl<S: ProbeSerial, T> ProbeSerial for ProbePort<S, T> {
    type Error = S::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.serial.read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.serial.write_byte(byte)
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.serial.flush()
    }
}

impl<S, T: ProbeTimer> ProbeTimer for ProbePort<S, T> {
    fn delay_us(&mut self, us: u32) {
        self.timer.delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay_ms(ms)
    }
}

impl<S, T: ProbeClock> ProbeClock for ProbePort<S, T> {
    type Instant = T::Instant;

    fn now(&self) -> Self::Instant {
        self.timer.now()
    }
}

/// Adapts an `embedded-hal` 1.0 delay provider into a [`ProbeTimer`].
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct HalDelay<D>(pub D);

#[cfg(feature = "impl-native")]
impl<D: embedded_hal::delay::DelayNs> ProbeTimer for HalDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms)
    }
}
