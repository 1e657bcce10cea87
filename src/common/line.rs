//! Line protocol spoken by the probe on its serial output.
//!
//! Every line is ASCII text terminated by `<CR><LF>`:
//!
//! | Line                           | Meaning                              |
//! |--------------------------------|--------------------------------------|
//! | `Started`                      | acknowledgment of `S`                |
//! | `Stopped`                      | acknowledgment of `X`                |
//! | `<m>,<t>,<h>`                  | one reading, two decimals per field  |
//! | `Loop: <n>`                    | 1-based sample count after a reading |
//! | `Complete: Finished <n> loops` | the run hit its sample cap           |

use super::types::Reading;
use arrayvec::ArrayString;
use core::fmt::{self, Write};
use core::str::{self, FromStr};

/// Capacity of a formatted line, including the trailing `<CR><LF>`.
///
/// Large enough for three `f32::MIN` values at two decimals (43 chars each).
pub const LINE_CAPACITY: usize = 144;

/// Fixed buffer holding one formatted, terminated line.
pub type LineBuffer = ArrayString<LINE_CAPACITY>;

const STARTED: &str = "Started";
const STOPPED: &str = "Stopped";
const LOOP_TAG: &str = "Loop:";
const LOOP_PREFIX: &str = "Loop: ";
const COMPLETE_PREFIX: &str = "Complete: Finished ";
const COMPLETE_SUFFIX: &str = " loops";

/// One line of controller output.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Line {
    /// `Started`
    Started,
    /// `Stopped`
    Stopped,
    /// `<moisture>,<temperature>,<humidity>`
    Sample(Reading),
    /// `Loop: <n>`
    Loop(u8),
    /// `Complete: Finished <n> loops`
    Complete(u8),
}

/// Error formatting a [`Line`] into a [`LineBuffer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineFormatError {
    /// The formatted text did not fit into `LINE_CAPACITY` bytes.
    #[error("line does not fit into the line buffer")]
    BufferOverflow,
}

/// Error parsing a received line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineParseError {
    /// Nothing but whitespace/terminator.
    #[error("empty line")]
    Empty,
    /// Bytes were not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
    /// A data line did not have exactly three comma-separated fields.
    #[error("expected 3 fields, got {0}")]
    FieldCount(usize),
    /// A data field did not parse as a number.
    #[error("invalid numeric field")]
    InvalidNumber,
    /// The counter of a `Loop:` or `Complete:` line is missing or out of range.
    #[error("invalid loop counter")]
    InvalidCounter,
    /// The sender went quiet in the middle of a line.
    #[error("line not terminated before timeout")]
    Unterminated,
}

impl Line {
    /// Formats the line followed by `<CR><LF>` into a fixed buffer.
    pub fn format_into(&self) -> Result<LineBuffer, LineFormatError> {
        let mut buffer = LineBuffer::new();
        write!(buffer, "{}\r\n", self).map_err(|_| LineFormatError::BufferOverflow)?;
        Ok(buffer)
    }

    /// Parses one received line.
    ///
    /// Surrounding whitespace and the `<CR><LF>` terminator are optional.
    pub fn parse(bytes: &[u8]) -> Result<Line, LineParseError> {
        let text = str::from_utf8(bytes)
            .map_err(|_| LineParseError::InvalidUtf8)?
            .trim();

        if text.is_empty() {
            return Err(LineParseError::Empty);
        }

        match text {
            STARTED => return Ok(Line::Started),
            STOPPED => return Ok(Line::Stopped),
            _ => {}
        }

        if let Some(count) = text.strip_prefix(LOOP_TAG) {
            return parse_counter(count.trim_start()).map(Line::Loop);
        }

        if let Some(rest) = text.strip_prefix(COMPLETE_PREFIX) {
            let count = rest
                .strip_suffix(COMPLETE_SUFFIX)
                .ok_or(LineParseError::InvalidCounter)?;
            return parse_counter(count).map(Line::Complete);
        }

        parse_reading(text).map(Line::Sample)
    }

    /// True for the acknowledgment lines (`Started`/`Stopped`).
    pub fn is_status(&self) -> bool {
        matches!(self, Line::Started | Line::Stopped)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Started => f.write_str(STARTED),
            Line::Stopped => f.write_str(STOPPED),
            Line::Sample(reading) => write!(f, "{}", reading),
            Line::Loop(count) => write!(f, "{}{}", LOOP_PREFIX, count),
            Line::Complete(count) => write!(f, "{}{}{}", COMPLETE_PREFIX, count, COMPLETE_SUFFIX),
        }
    }
}

impl FromStr for Line {
    type Err = LineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Line::parse(s.as_bytes())
    }
}

// --- Helpers ---

fn parse_counter(s: &str) -> Result<u8, LineParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineParseError::InvalidCounter);
    }
    s.parse::<u8>().map_err(|_| LineParseError::InvalidCounter)
}

fn parse_reading(text: &str) -> Result<Reading, LineParseError> {
    let mut fields = [0.0f32; 3];
    let mut count = 0;

    for field in text.split(',') {
        if count < fields.len() {
            fields[count] = f32::from_str(field.trim()).map_err(|_| LineParseError::InvalidNumber)?;
        }
        count += 1;
    }

    if count != fields.len() {
        return Err(LineParseError::FieldCount(count));
    }

    Ok(Reading::new(fields[0], fields[1], fields[2]))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_literal_lines() {
        assert_eq!(Line::Started.format_into().unwrap().as_str(), "Started\r\n");
        assert_eq!(Line::Stopped.format_into().unwrap().as_str(), "Stopped\r\n");
        assert_eq!(Line::Loop(3).format_into().unwrap().as_str(), "Loop: 3\r\n");
        assert_eq!(
            Line::Complete(5).format_into().unwrap().as_str(),
            "Complete: Finished 5 loops\r\n"
        );
    }

    #[test]
    fn test_format_sample_line() {
        let line = Line::Sample(Reading::new(50.15, 7.0, 41.3));
        assert_eq!(line.format_into().unwrap().as_str(), "50.15,7.00,41.30\r\n");
    }

    #[test]
    fn test_format_extreme_values_fit() {
        let line = Line::Sample(Reading::new(f32::MIN, f32::MIN, f32::MIN));
        let formatted = line.format_into().unwrap();
        assert!(formatted.ends_with("\r\n"));
        assert!(formatted.len() <= LINE_CAPACITY);
    }

    #[test]
    fn test_parse_status_lines() {
        assert_eq!(Line::parse(b"Started\r\n"), Ok(Line::Started));
        assert_eq!(Line::parse(b"Stopped"), Ok(Line::Stopped));
        assert!(Line::parse(b"Started").unwrap().is_status());
        assert!(!Line::Loop(1).is_status());
    }

    #[test]
    fn test_parse_counters() {
        assert_eq!(Line::parse(b"Loop: 1\r\n"), Ok(Line::Loop(1)));
        assert_eq!(Line::parse(b"Loop: 5"), Ok(Line::Loop(5)));
        assert_eq!(
            Line::parse(b"Complete: Finished 5 loops\r\n"),
            Ok(Line::Complete(5))
        );
        assert_eq!(Line::parse(b"Loop: "), Err(LineParseError::InvalidCounter));
        assert_eq!(Line::parse(b"Loop: -1"), Err(LineParseError::InvalidCounter));
        assert_eq!(Line::parse(b"Loop: 300"), Err(LineParseError::InvalidCounter));
        assert_eq!(
            Line::parse(b"Complete: Finished 5"),
            Err(LineParseError::InvalidCounter)
        );
    }

    #[test]
    fn test_parse_sample_line() {
        assert_eq!(
            Line::parse(b"50.15,21.50,40.00\r\n"),
            Ok(Line::Sample(Reading::new(50.15, 21.5, 40.0)))
        );
        assert_eq!(
            Line::parse(b" 1.00 , -2.50 , 3 "),
            Ok(Line::Sample(Reading::new(1.0, -2.5, 3.0)))
        );
    }

    #[test]
    fn test_parse_sample_line_with_nan() {
        match Line::parse(b"50.15,NaN,NaN\r\n") {
            Ok(Line::Sample(reading)) => {
                assert_eq!(reading.moisture, 50.15);
                assert!(reading.temperature.is_nan());
                assert!(reading.humidity.is_nan());
            }
            other => panic!("unexpected parse result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Line::parse(b""), Err(LineParseError::Empty));
        assert_eq!(Line::parse(b"\r\n"), Err(LineParseError::Empty));
        assert_eq!(Line::parse(&[0xFF, 0xFE]), Err(LineParseError::InvalidUtf8));
        assert_eq!(Line::parse(b"1.0,2.0"), Err(LineParseError::FieldCount(2)));
        assert_eq!(Line::parse(b"1.0,2.0,3.0,4.0"), Err(LineParseError::FieldCount(4)));
        assert_eq!(Line::parse(b"1.0,abc,3.0"), Err(LineParseError::InvalidNumber));
        assert_eq!(Line::parse(b"Hello"), Err(LineParseError::InvalidNumber));
    }

    #[test]
    fn test_display_matches_parse() {
        for line in [Line::Started, Line::Loop(2), Line::Complete(5)] {
            let text = line.to_string();
            assert_eq!(text.parse::<Line>(), Ok(line));
        }
    }
}
