// src/common/error.rs

use super::line::{LineFormatError, LineParseError};

#[derive(Debug, thiserror::Error)]
pub enum SamplerError<E = ()>
where
    E: core::fmt::Debug, // Need Debug for the generic Io error
{
    /// Underlying I/O error from the serial implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// Operation timed out.
    #[error("Operation timed out")]
    Timeout,

    /// Buffer provided was too small for an incoming line.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },

    /// An outgoing line did not fit the fixed line buffer.
    #[error("Line formatting failed: {0}")]
    LineFormat(#[from] LineFormatError),

    /// An incoming line could not be parsed.
    #[error("Invalid line: {0}")]
    InvalidLine(#[from] LineParseError),

    /// Got a validly formatted line, but not the one expected in the current state.
    #[error("Unexpected line received")]
    UnexpectedLine,
}
