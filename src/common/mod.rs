// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod line;
pub mod timing;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::Command;

// From config.rs
pub use config::SamplerConfig;

// From error.rs
pub use error::SamplerError;

// From hal_traits.rs
pub use hal_traits::{
    ProbeClock, ProbeInstant, ProbePort, ProbeSerial, ProbeTimer, TemperatureHumiditySensor,
};

// From line.rs
pub use line::{Line, LineBuffer, LineFormatError, LineParseError, LINE_CAPACITY};

// From types.rs
pub use types::Reading;

// Native HAL integration (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::HalDelay;
