// src/recorder/sync_recorder/io_helpers.rs

use super::SyncRecorder; // Access SyncRecorder definition
use crate::common::{
    command::Command,
    error::SamplerError,
    hal_traits::{ProbeClock, ProbeSerial},
    line::LineParseError,
    timing,
};
use core::fmt::Debug;
use core::time::Duration;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> SyncRecorder<IF>
where
    IF: ProbeSerial + ProbeClock,
    IF::Error: Debug,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, SamplerError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let start_time = self.interface.now();
        let deadline = start_time + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(SamplerError::Timeout);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(SamplerError::Io(e)),
            }
        }
    }

    /// Writes one command byte and flushes it out.
    pub(super) fn send_command_byte(&mut self, command: Command) -> Result<(), SamplerError<IF::Error>> {
        let byte = command.as_byte();
        let write_timeout = timing::BYTE_DURATION + Duration::from_millis(20);
        self.execute_blocking_io_with_timeout(write_timeout, |iface| iface.write_byte(byte))?;

        let flush_timeout = Duration::from_millis(10);
        self.execute_blocking_io_with_timeout(flush_timeout, |iface| iface.flush())?;

        Ok(())
    }

    /// Reads one `\n`-terminated line into the buffer, terminator included.
    ///
    /// `timeout` bounds the wait for the first byte; after that each byte must
    /// follow within `INTER_CHARACTER_TIMEOUT`.
    pub(super) fn read_raw_line<'buf>(
        &mut self,
        buffer: &'buf mut [u8],
        timeout: Duration,
    ) -> Result<&'buf [u8], SamplerError<IF::Error>> {
        let mut bytes_read = 0;
        loop {
            let current_timeout = if bytes_read == 0 {
                timeout
            } else {
                timing::INTER_CHARACTER_TIMEOUT
            };

            match self.execute_blocking_io_with_timeout(current_timeout, |iface| iface.read_byte()) {
                Ok(byte) => {
                    if bytes_read >= buffer.len() {
                        return Err(SamplerError::BufferOverflow {
                            needed: bytes_read + 1,
                            got: buffer.len(),
                        });
                    }
                    buffer[bytes_read] = byte;
                    bytes_read += 1;

                    if byte == b'\n' {
                        return Ok(&buffer[..bytes_read]);
                    }
                }
                Err(SamplerError::Timeout) if bytes_read > 0 => {
                    // Received some bytes but no terminator in time
                    return Err(SamplerError::InvalidLine(LineParseError::Unterminated));
                }
                Err(e) => return Err(e),
            }
        }
    }
}
