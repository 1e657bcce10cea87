//! Probe control commands.
//!
//! A command is a single ASCII byte on the serial link. There is no framing,
//! no address and no terminator: `S` starts a sampling run, `X` stops it, and
//! every other byte is ignored by the controller.

use core::fmt;

/// A decoded control command.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Start (or restart) a bounded sampling run (`S`).
    Start,
    /// Stop sampling (`X`).
    Stop,
}

impl Command {
    pub const START_BYTE: u8 = b'S';
    pub const STOP_BYTE: u8 = b'X';

    /// Decodes one received byte. Returns `None` for anything that is not a command.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            Self::START_BYTE => Some(Command::Start),
            Self::STOP_BYTE => Some(Command::Stop),
            _ => None,
        }
    }

    /// The byte sent on the wire for this command.
    pub const fn as_byte(&self) -> u8 {
        match self {
            Command::Start => Self::START_BYTE,
            Command::Stop => Self::STOP_BYTE,
        }
    }
}

impl TryFrom<u8> for Command {
    type Error = u8;

    /// Attempts to decode a byte, handing the byte back if it is not a command.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value).ok_or(value)
    }
}

impl From<Command> for u8 {
    fn from(value: Command) -> Self {
        value.as_byte()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}
