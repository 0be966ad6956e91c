//! The capability handed out by a successful open.
//!
//! A handle carries its own copy of the file contents taken at open time, so
//! reading never touches shared state. Writes are buffered on the handle and
//! only land in the file when the handle is closed by its owner.
use super::{AccessToken, Mode};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct AccessHandle {
    name: String,
    mode: Mode,
    token: AccessToken,
    snapshot: String,
    pending: Option<String>,
}

impl AccessHandle {
    pub(crate) fn new(name: String, mode: Mode, snapshot: String) -> AccessHandle {
        AccessHandle {
            name,
            mode,
            token: AccessToken::new(),
            snapshot,
            pending: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn token(&self) -> AccessToken {
        self.token
    }

    /// Returns this session's own pending write if there is one, otherwise the
    /// contents as they were when the file was opened.
    pub fn read(&self) -> &str {
        match &self.pending {
            Some(p) => p,
            None => &self.snapshot,
        }
    }

    /// Buffers `text` as the new contents, replacing any earlier write.
    pub fn write(&mut self, text: impl Into<String>) -> Result<(), AccessHandleError> {
        if self.mode != Mode::ReadWrite {
            return Err(AccessHandleError::NotWritable(self.name.clone(), self.mode));
        }

        self.pending = Some(text.into());
        Ok(())
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }
}

#[derive(Debug, Error)]
pub enum AccessHandleError {
    #[error("File {0} is open as {1}, it cannot be written")]
    NotWritable(String, Mode),
}
