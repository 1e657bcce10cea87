// src/sensor/formatter.rs

use crate::common::{error::SamplerError, hal_traits::ProbeSerial, line::Line};

/// Formats `line`, writes it with its `<CR><LF>` terminator and flushes.
///
/// Blocks until the serial peripheral has accepted every byte.
pub(super) fn write_line<IF: ProbeSerial>(
    interface: &mut IF,
    line: &Line,
) -> Result<(), SamplerError<IF::Error>> {
    let buffer = line.format_into()?;

    for byte in buffer.as_bytes() {
        nb::block!(interface.write_byte(*byte)).map_err(SamplerError::Io)?;
    }
    nb::block!(interface.flush()).map_err(SamplerError::Io)?;

    log::trace!("-> {}", line);
    Ok(())
}
