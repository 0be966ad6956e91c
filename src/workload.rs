//! Randomised clients that hammer a `ResourceTable`.
//!
//! Each client repeatedly picks a known file and a mode at random, opens it,
//! reads, writes fresh text when it holds the file for writing, and closes.
use crate::constants::{
    ASCII_LOWER_BOUND, ASCII_UPPER_BOUND, DEFAULT_ACTIONS, DEFAULT_CLIENTS, DEFAULT_TEXT_LEN,
};
use crate::server::{AccessHandleError, Mode, ResourceTable, ResourceTableError};
use futures::future::try_join_all;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::ops::Add;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorkloadConfig {
    pub clients: usize,
    pub actions: usize,
    pub text_len: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            clients: DEFAULT_CLIENTS,
            actions: DEFAULT_ACTIONS,
            text_len: DEFAULT_TEXT_LEN,
        }
    }
}

/// How many sessions of each kind completed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WorkloadReport {
    pub reads: usize,
    pub writes: usize,
}

impl Add for WorkloadReport {
    type Output = WorkloadReport;

    fn add(self, other: WorkloadReport) -> WorkloadReport {
        WorkloadReport {
            reads: self.reads + other.reads,
            writes: self.writes + other.writes,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Workload {
    config: WorkloadConfig,
}

impl Workload {
    pub fn new(config: WorkloadConfig) -> Workload {
        Workload { config }
    }

    /// Runs every client to completion, one task each.
    pub async fn run(&self, table: ResourceTable) -> Result<WorkloadReport, WorkloadError> {
        let mut tasks = vec![];
        for id in 0..self.config.clients {
            let client = Client::new(id, table.clone(), self.config);
            tasks.push(tokio::spawn(client.run()));
        }

        let mut report = WorkloadReport::default();
        for res in try_join_all(tasks).await? {
            report = report + res?;
        }

        info!(
            "Workload finished, {0} reads and {1} writes",
            report.reads, report.writes
        );
        Ok(report)
    }
}

struct Client {
    id: usize,
    table: ResourceTable,
    config: WorkloadConfig,
    rng: StdRng,
}

impl Client {
    fn new(id: usize, table: ResourceTable, config: WorkloadConfig) -> Client {
        debug!("Client {0} created", id);
        Client {
            id,
            table,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    async fn run(mut self) -> Result<WorkloadReport, WorkloadError> {
        let mut report = WorkloadReport::default();

        for action in 0..self.config.actions {
            let names = self.table.names().await;
            let name = names
                .into_iter()
                .choose(&mut self.rng)
                .ok_or(WorkloadError::NoFiles())?;
            let mode = if self.rng.gen::<bool>() {
                Mode::ReadWrite
            } else {
                Mode::Readable
            };

            debug!(
                "Client {0} action {1}, opening {2} as {3}",
                self.id, action, name, mode
            );

            let mut handle = self.table.open(&name, mode).await?;
            let seen = handle.read().len();
            if mode == Mode::ReadWrite {
                handle.write(self.random_text())?;
                report.writes += 1;
            } else {
                report.reads += 1;
            }
            self.table.close(&handle).await?;

            trace!("Client {0} saw {1} bytes of {2}", self.id, seen, name);
        }

        Ok(report)
    }

    fn random_text(&mut self) -> String {
        let rng = &mut self.rng;
        (0..self.config.text_len)
            .map(|_| rng.gen_range(ASCII_LOWER_BOUND..ASCII_UPPER_BOUND) as char)
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error(transparent)]
    AccessHandleError(#[from] AccessHandleError),
    #[error(transparent)]
    ClientPanicked(#[from] JoinError),
    #[error("No files to pick from")]
    NoFiles(),
    #[error(transparent)]
    ResourceTableError(#[from] ResourceTableError),
}
