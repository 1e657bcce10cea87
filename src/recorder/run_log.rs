// src/recorder/run_log.rs

use crate::common::{timing, types::Reading};

/// Readings kept for one run. Sized for the probe's fixed sample cap.
pub type RunReadings = heapless::Vec<Reading, { timing::MAX_SAMPLES as usize }>;

/// How a recorded run ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunEnd {
    /// The probe reported `Complete: Finished <n> loops`.
    Completed(u8),
    /// The probe acknowledged a stop before reaching its cap.
    Stopped,
}

/// The readings of one sampling run, in the order they were received.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLog {
    readings: RunReadings,
    end: RunEnd,
    dropped: usize,
}

impl RunLog {
    /// `dropped` counts loops whose sample line never arrived intact.
    pub fn new(readings: RunReadings, end: RunEnd, dropped: usize) -> Self {
        RunLog {
            readings,
            end,
            dropped,
        }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn end(&self) -> RunEnd {
        self.end
    }

    /// True when the probe finished the run on its own.
    pub fn is_complete(&self) -> bool {
        matches!(self.end, RunEnd::Completed(_))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Readings without any invalid (`NaN`) field.
    pub fn valid_readings(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter().filter(|r| !r.has_invalid_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_log_accessors() {
        let mut readings = RunReadings::new();
        readings.push(Reading::new(50.15, 20.0, 40.0)).unwrap();
        readings.push(Reading::new(50.15, f32::NAN, 41.0)).unwrap();

        let log = RunLog::new(readings, RunEnd::Stopped, 1);
        assert_eq!(log.len(), 2);
        assert_eq!(log.dropped(), 1);
        assert!(!log.is_empty());
        assert!(!log.is_complete());
        assert_eq!(log.end(), RunEnd::Stopped);
        assert_eq!(log.readings()[0].temperature, 20.0);
        assert_eq!(log.valid_readings().count(), 1);
    }

    #[test]
    fn test_run_log_capacity_matches_sample_cap() {
        let mut readings = RunReadings::new();
        for _ in 0..timing::MAX_SAMPLES {
            readings.push(Reading::default()).unwrap();
        }
        assert!(readings.push(Reading::default()).is_err());

        let log = RunLog::new(readings, RunEnd::Completed(5), 0);
        assert!(log.is_complete());
    }
}
