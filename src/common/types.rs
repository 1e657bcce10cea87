// src/common/types.rs

use core::fmt;

/// One sample as emitted by the controller: `(moisture, temperature, humidity)`.
///
/// Values are kept exactly as the driver produced them, `NaN` included.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Reading {
    /// Soil moisture in percent.
    pub moisture: f32,
    /// Air temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

impl Reading {
    pub const fn new(moisture: f32, temperature: f32, humidity: f32) -> Self {
        Reading {
            moisture,
            temperature,
            humidity,
        }
    }

    /// True when any field carries the driver's invalid-reading sentinel.
    pub fn has_invalid_value(&self) -> bool {
        self.moisture.is_nan() || self.temperature.is_nan() || self.humidity.is_nan()
    }
}

/// Formats as `<moisture>,<temperature>,<humidity>`, two decimals per field.
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2},{:.2},{:.2}",
            self.moisture, self.temperature, self.humidity
        )
    }
}
