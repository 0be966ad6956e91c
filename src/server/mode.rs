use std::fmt;

/// The mode a file is in, or is being requested in.
///
/// Only `Readable` and `ReadWrite` can be asked for when opening. `Unknown` is
/// never the real state of a file, it is what the server reports for a name it
/// has never heard of.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    Readable,
    ReadWrite,
    Closed,
    Unknown,
}

impl Mode {
    pub fn is_openable(&self) -> bool {
        matches!(self, Mode::Readable | Mode::ReadWrite)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Readable => {
                write!(f, "Readable")
            }
            Mode::ReadWrite => {
                write!(f, "ReadWrite")
            }
            Mode::Closed => {
                write!(f, "Closed")
            }
            Mode::Unknown => {
                write!(f, "Unknown")
            }
        }
    }
}
