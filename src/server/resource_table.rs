//! The set of files known to the server.
//!
//! The table only holds the name to controller mapping. Its lock is released
//! before any admission wait starts, so a file that is busy never holds up
//! work on another file.
use super::{AccessHandle, Mode, Occupancy, ResourceControl, ResourceControlError, ServerConfig};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug)]
pub struct ResourceTable {
    config: ServerConfig,
    resources: Arc<RwLock<HashMap<String, Arc<ResourceControl>>>>,
}

impl ResourceTable {
    pub fn new(config: ServerConfig) -> ResourceTable {
        ResourceTable {
            config,
            resources: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Adds a new closed file. An existing name is never replaced.
    pub async fn create(&self, name: &str, content: &str) -> Result<(), ResourceTableError> {
        let mut resources = self.resources.write().await;
        if resources.contains_key(name) {
            return Err(ResourceTableError::AlreadyExists(name.to_string()));
        }

        resources.insert(
            name.to_string(),
            Arc::new(ResourceControl::new(
                name.to_string(),
                content.to_string(),
                &self.config,
            )),
        );

        info!("Created file {0}", name);
        Ok(())
    }

    async fn get_control(&self, name: &str) -> Option<Arc<ResourceControl>> {
        let resources = self.resources.read().await;
        resources.get(name).cloned()
    }

    async fn get_openable(
        &self,
        name: &str,
        mode: Mode,
    ) -> Result<Arc<ResourceControl>, ResourceTableError> {
        let control = self
            .get_control(name)
            .await
            .ok_or_else(|| ResourceTableError::NotFound(name.to_string()))?;

        if !mode.is_openable() {
            return Err(ResourceTableError::InvalidMode(name.to_string(), mode));
        }

        Ok(control)
    }

    /// Waits until `name` can be held in `mode`. Unknown names and modes other
    /// than `Readable` / `ReadWrite` fail straight away.
    pub async fn open(&self, name: &str, mode: Mode) -> Result<AccessHandle, ResourceTableError> {
        let control = self.get_openable(name, mode).await?;
        Ok(control.open(mode).await?)
    }

    pub async fn open_timeout(
        &self,
        name: &str,
        mode: Mode,
        limit: Duration,
    ) -> Result<AccessHandle, ResourceTableError> {
        let control = self.get_openable(name, mode).await?;
        Ok(control.open_timeout(mode, limit).await?)
    }

    pub async fn open_cancellable(
        &self,
        name: &str,
        mode: Mode,
        cancel: &CancellationToken,
    ) -> Result<AccessHandle, ResourceTableError> {
        let control = self.get_openable(name, mode).await?;
        Ok(control.open_cancellable(mode, cancel).await?)
    }

    pub async fn close(&self, handle: &AccessHandle) -> Result<(), ResourceTableError> {
        match self.get_control(handle.name()).await {
            Some(control) => Ok(control.close(handle).await?),
            None => {
                warn!(
                    "Rejected close of session {0}, no file named {1}",
                    handle.token(),
                    handle.name()
                );
                Err(ResourceTableError::UnknownHandle(handle.name().to_string()))
            }
        }
    }

    pub async fn status(&self, name: &str) -> Mode {
        match self.get_control(name).await {
            Some(control) => control.status().await,
            None => Mode::Unknown,
        }
    }

    pub async fn occupancy(&self, name: &str) -> Option<Occupancy> {
        match self.get_control(name).await {
            Some(control) => Some(control.occupancy().await),
            None => None,
        }
    }

    pub async fn names(&self) -> HashSet<String> {
        let resources = self.resources.read().await;
        resources.keys().cloned().collect()
    }
}

impl Default for ResourceTable {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

#[derive(Debug, Error)]
pub enum ResourceTableError {
    #[error("File {0} already exists")]
    AlreadyExists(String),
    #[error("Cannot open {0} as {1}, only Readable or ReadWrite are allowed")]
    InvalidMode(String, Mode),
    #[error("No file named {0}")]
    NotFound(String),
    #[error(transparent)]
    ResourceControlError(#[from] ResourceControlError),
    #[error("Handle refers to {0} which this server does not have")]
    UnknownHandle(String),
}

impl ResourceTableError {
    /// True for misuse of a handle: double close, wrong owner or a foreign handle.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            ResourceTableError::UnknownHandle(_)
                | ResourceTableError::ResourceControlError(
                    ResourceControlError::ProtocolViolation(..)
                )
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ResourceTableError::ResourceControlError(ResourceControlError::Cancelled(..))
        )
    }
}
