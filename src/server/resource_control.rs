//! Admission control for a single file.
//!
//! Readers take one permit from a fair semaphore holding `reader_capacity`
//! permits. Writers first take the fair writer gate, then ask for every permit
//! in a single request. Both primitives queue in arrival order, so once a
//! writer is waiting for permits, readers that arrive after it queue behind it
//! and nobody waits on a stream of later arrivals.
//!
//! Sessions are only registered after every primitive they need is held, and
//! the mode is derived from the registry, so a writer that holds the gate but
//! is still collecting permits is never visible. Dropping a pending open hands
//! back whatever it had collected.
use super::{AccessHandle, AccessToken, Mode, ServerConfig};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{AcquireError, Mutex, OwnedMutexGuard, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct ResourceControl {
    name: String,
    capacity: u32,
    slots: Arc<Semaphore>,
    gate: Arc<Mutex<()>>,
    state: Mutex<ControlState>,
}

#[derive(Debug)]
struct ControlState {
    content: String,
    readers: HashMap<AccessToken, OwnedSemaphorePermit>,
    writer: Option<WriterLease>,
}

/// Everything an admitted writer holds. Dropping it frees the gate and all permits.
#[derive(Debug)]
struct WriterLease {
    token: AccessToken,
    _slots: OwnedSemaphorePermit,
    _gate: OwnedMutexGuard<()>,
}

/// Point in time view of who holds a file.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Occupancy {
    pub readers: usize,
    pub writer: bool,
    pub free_slots: usize,
}

impl ResourceControl {
    pub fn new(name: String, content: String, config: &ServerConfig) -> ResourceControl {
        let capacity = config.reader_capacity();
        ResourceControl {
            name,
            capacity,
            slots: Arc::new(Semaphore::new(capacity as usize)),
            gate: Arc::new(Mutex::new(())),
            state: Mutex::new(ControlState {
                content,
                readers: HashMap::new(),
                writer: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Waits until the file can be held in `mode`, then returns a handle with
    /// a copy of the current contents.
    pub async fn open(&self, mode: Mode) -> Result<AccessHandle, ResourceControlError> {
        match mode {
            Mode::Readable => self.open_read().await,
            Mode::ReadWrite => self.open_write().await,
            _ => Err(ResourceControlError::InvalidMode(self.name.clone(), mode)),
        }
    }

    /// Same as `open` but gives up once `limit` has passed.
    pub async fn open_timeout(
        &self,
        mode: Mode,
        limit: Duration,
    ) -> Result<AccessHandle, ResourceControlError> {
        match tokio::time::timeout(limit, self.open(mode)).await {
            Ok(res) => res,
            Err(_) => {
                debug!("Open of {0} as {1} timed out after {2:?}", self.name, mode, limit);
                Err(ResourceControlError::Cancelled(self.name.clone(), mode))
            }
        }
    }

    /// Same as `open` but gives up as soon as `cancel` fires.
    pub async fn open_cancellable(
        &self,
        mode: Mode,
        cancel: &CancellationToken,
    ) -> Result<AccessHandle, ResourceControlError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Open of {0} as {1} was cancelled", self.name, mode);
                Err(ResourceControlError::Cancelled(self.name.clone(), mode))
            }
            res = self.open(mode) => res,
        }
    }

    async fn open_read(&self) -> Result<AccessHandle, ResourceControlError> {
        let permit = self.slots.clone().acquire_owned().await?;

        let mut state = self.state.lock().await;
        let handle = AccessHandle::new(self.name.clone(), Mode::Readable, state.content.clone());
        state.readers.insert(handle.token(), permit);

        debug!(
            "Admitted reader {0} on {1}, {2} readers",
            handle.token(),
            self.name,
            state.readers.len()
        );
        Ok(handle)
    }

    async fn open_write(&self) -> Result<AccessHandle, ResourceControlError> {
        let gate = self.gate.clone().lock_owned().await;
        let slots = self
            .slots
            .clone()
            .acquire_many_owned(self.capacity)
            .await?;

        let mut state = self.state.lock().await;
        let handle = AccessHandle::new(self.name.clone(), Mode::ReadWrite, state.content.clone());
        state.writer = Some(WriterLease {
            token: handle.token(),
            _slots: slots,
            _gate: gate,
        });

        debug!("Admitted writer {0} on {1}", handle.token(), self.name);
        Ok(handle)
    }

    /// Ends the session behind `handle`. A writer's buffered contents become the
    /// file contents. Closing a session this file does not have registered is
    /// rejected without touching any state.
    pub async fn close(&self, handle: &AccessHandle) -> Result<(), ResourceControlError> {
        if handle.name() != self.name {
            return Err(self.violation(handle));
        }

        let mut state = self.state.lock().await;
        match handle.mode() {
            Mode::Readable => match state.readers.remove(&handle.token()) {
                Some(permit) => {
                    drop(permit);
                    debug!(
                        "Released reader {0} on {1}, {2} readers",
                        handle.token(),
                        self.name,
                        state.readers.len()
                    );
                    Ok(())
                }
                None => Err(self.violation(handle)),
            },
            Mode::ReadWrite => {
                let owns_file = matches!(&state.writer, Some(w) if w.token == handle.token());
                if !owns_file {
                    return Err(self.violation(handle));
                }

                if let Some(p) = handle.pending() {
                    state.content = p.to_string();
                }
                state.writer = None;

                debug!("Released writer {0} on {1}", handle.token(), self.name);
                Ok(())
            }
            _ => Err(self.violation(handle)),
        }
    }

    fn violation(&self, handle: &AccessHandle) -> ResourceControlError {
        warn!(
            "Rejected close of {0} session {1} on {2}, it is not registered",
            handle.mode(),
            handle.token(),
            self.name
        );
        ResourceControlError::ProtocolViolation(self.name.clone(), handle.mode(), handle.token())
    }

    pub async fn status(&self) -> Mode {
        let state = self.state.lock().await;
        if state.writer.is_some() {
            Mode::ReadWrite
        } else if !state.readers.is_empty() {
            Mode::Readable
        } else {
            Mode::Closed
        }
    }

    pub async fn occupancy(&self) -> Occupancy {
        let state = self.state.lock().await;
        let capacity = self.capacity as usize;
        let writer = state.writer.is_some();
        let held = if writer {
            capacity
        } else {
            state.readers.len()
        };

        Occupancy {
            readers: state.readers.len(),
            writer,
            free_slots: capacity - held,
        }
    }
}

#[derive(Debug, Error)]
pub enum ResourceControlError {
    #[error(transparent)]
    AcquireError(#[from] AcquireError),
    #[error("Open of {0} as {1} was cancelled before it was admitted")]
    Cancelled(String, Mode),
    #[error("Cannot open {0} as {1}, only Readable or ReadWrite are allowed")]
    InvalidMode(String, Mode),
    #[error("Protocol violation on {0}, {1} session {2} is not registered")]
    ProtocolViolation(String, Mode, AccessToken),
}
