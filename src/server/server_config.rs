use crate::constants::DEFAULT_READER_CAPACITY;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Settings shared by every file in a `ResourceTable`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    reader_capacity: u32,
}

impl ServerConfig {
    pub fn new(reader_capacity: u32) -> Result<ServerConfig, ServerConfigError> {
        if reader_capacity == 0 || reader_capacity as usize > Semaphore::MAX_PERMITS {
            return Err(ServerConfigError::InvalidCapacity(reader_capacity));
        }

        Ok(ServerConfig { reader_capacity })
    }

    pub fn reader_capacity(&self) -> u32 {
        self.reader_capacity
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            reader_capacity: DEFAULT_READER_CAPACITY,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Reader capacity {0} must be at least 1 and fit in a semaphore")]
    InvalidCapacity(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_bounds() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(ServerConfig::default().reader_capacity(), 4);
        assert_eq!(ServerConfig::new(1)?.reader_capacity(), 1);
        assert!(ServerConfig::new(0).is_err());

        Ok(())
    }
}
