//! Background snapshot persistence
//!
//! A [`Persister`] owns a [`StorageAdapter`] on a dedicated thread. The thread
//! first reads the existing snapshot and reports a [`RehydrateOutcome`], then
//! serves write commands from the UI thread. Writes are fire-and-forget; when
//! several are queued only the newest one reaches the adapter.
//!
//! Storage failures are logged and swallowed here. The in-memory store stays
//! authoritative either way.

use super::snapshot::{self, SNAPSHOT_NAME};
use super::state::SessionState;
use crate::error::{DataChartsError, Result};
use crate::storage::StorageAdapter;
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

/// How long [`Persister::flush`] waits for the worker
pub const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of the startup snapshot read
#[derive(Debug, Clone, PartialEq)]
pub enum RehydrateOutcome {
    /// A snapshot was found and parsed
    Restored(Box<SessionState>),
    /// Nothing stored (or an incompatible snapshot that was discarded)
    Empty,
    /// Reading or parsing failed; the app continues with defaults
    Failed(String),
}

/// Commands sent to the persistence worker
#[derive(Debug)]
pub enum PersistCommand {
    /// Store these snapshot bytes
    Write(Vec<u8>),
    /// Remove the stored snapshot
    Discard,
    /// Acknowledge once every earlier command has been handled
    Flush(Sender<()>),
    Shutdown,
}

/// Worker loop run on the persistence thread
pub struct PersistWorker<A: StorageAdapter> {
    adapter: A,
    command_rx: Receiver<PersistCommand>,
    outcome_tx: Sender<RehydrateOutcome>,
    writes: u64,
}

impl<A: StorageAdapter> PersistWorker<A> {
    pub fn new(
        adapter: A,
        command_rx: Receiver<PersistCommand>,
        outcome_tx: Sender<RehydrateOutcome>,
    ) -> Self {
        Self {
            adapter,
            command_rx,
            outcome_tx,
            writes: 0,
        }
    }

    /// Rehydrate, then serve commands until shutdown or disconnect
    pub fn run(&mut self) {
        tracing::debug!("Snapshot writer started");

        let outcome = self.rehydrate();
        let _ = self.outcome_tx.send(outcome);

        let mut next = self.command_rx.recv().ok();
        while let Some(cmd) = next.take() {
            match cmd {
                PersistCommand::Write(bytes) => {
                    let (latest, after) = self.coalesce(bytes);
                    self.write(&latest);
                    next = after;
                }
                PersistCommand::Discard => {
                    if let Err(e) = self.adapter.remove(SNAPSHOT_NAME) {
                        tracing::warn!("Failed to discard snapshot: {}", e);
                    }
                }
                PersistCommand::Flush(ack) => {
                    let _ = ack.send(());
                }
                PersistCommand::Shutdown => break,
            }

            if next.is_none() {
                next = self.command_rx.recv().ok();
            }
        }

        tracing::debug!("Snapshot writer stopped after {} writes", self.writes);
    }

    /// Read the stored snapshot, if any
    pub fn rehydrate(&mut self) -> RehydrateOutcome {
        let bytes = match self.adapter.get(SNAPSHOT_NAME) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::info!("No stored session, starting fresh");
                return RehydrateOutcome::Empty;
            }
            Err(e) => return RehydrateOutcome::Failed(e.to_string()),
        };

        match snapshot::decode(&bytes) {
            Ok(state) => {
                tracing::info!(
                    "Restored session: {} rows, {} series",
                    state.rows.len(),
                    state.series_config.as_ref().map_or(0, |c| c.len())
                );
                RehydrateOutcome::Restored(Box::new(state))
            }
            Err(e @ DataChartsError::UnsupportedVersion { .. }) => {
                tracing::warn!("Discarding stored session: {}", e);
                if let Err(e) = self.adapter.remove(SNAPSHOT_NAME) {
                    tracing::warn!("Failed to discard snapshot: {}", e);
                }
                RehydrateOutcome::Empty
            }
            Err(e) => RehydrateOutcome::Failed(e.to_string()),
        }
    }

    /// Drain queued writes, keeping the newest bytes
    ///
    /// Returns the bytes to write and the first non-write command found, which
    /// must be handled after the write.
    fn coalesce(&mut self, mut latest: Vec<u8>) -> (Vec<u8>, Option<PersistCommand>) {
        let mut skipped = 0usize;
        loop {
            match self.command_rx.try_recv() {
                Ok(PersistCommand::Write(bytes)) => {
                    latest = bytes;
                    skipped += 1;
                }
                Ok(other) => {
                    if skipped > 0 {
                        tracing::trace!("Coalesced {} snapshot writes", skipped);
                    }
                    return (latest, Some(other));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                    if skipped > 0 {
                        tracing::trace!("Coalesced {} snapshot writes", skipped);
                    }
                    return (latest, None);
                }
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        match self.adapter.set(SNAPSHOT_NAME, bytes) {
            Ok(()) => self.writes += 1,
            Err(e) => tracing::warn!("Failed to persist session: {}", e),
        }
    }
}

/// UI-side handle to the persistence thread
pub struct Persister {
    command_tx: Sender<PersistCommand>,
    outcome_rx: Receiver<RehydrateOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl Persister {
    /// Start the worker thread; it begins reading the stored snapshot at once
    pub fn spawn<A: StorageAdapter + 'static>(adapter: A) -> Result<Self> {
        let (command_tx, command_rx) = unbounded();
        let (outcome_tx, outcome_rx) = bounded(1);

        let handle = std::thread::Builder::new()
            .name("snapshot-writer".to_string())
            .spawn(move || {
                let mut worker = PersistWorker::new(adapter, command_rx, outcome_tx);
                worker.run();
            })
            .map_err(|e| DataChartsError::Worker(format!("Failed to spawn persister: {}", e)))?;

        Ok(Self {
            command_tx,
            outcome_rx,
            handle: Some(handle),
        })
    }

    /// Queue a snapshot write
    pub fn save(&self, bytes: Vec<u8>) {
        if self.command_tx.send(PersistCommand::Write(bytes)).is_err() {
            tracing::warn!("Snapshot writer is gone, dropping write");
        }
    }

    /// Queue removal of the stored snapshot
    pub fn discard(&self) {
        if self.command_tx.send(PersistCommand::Discard).is_err() {
            tracing::warn!("Snapshot writer is gone, dropping discard");
        }
    }

    /// Rehydration outcome, if the worker has reported it yet
    ///
    /// Yields the outcome at most once.
    pub fn try_outcome(&self) -> Option<RehydrateOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// Block up to `timeout` for the rehydration outcome
    pub fn wait_outcome(&self, timeout: Duration) -> Option<RehydrateOutcome> {
        self.outcome_rx.recv_timeout(timeout).ok()
    }

    /// Wait until every queued command has been handled
    pub fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = bounded(1);
        self.command_tx
            .send(PersistCommand::Flush(ack_tx))
            .map_err(|_| DataChartsError::Worker("snapshot writer is gone".to_string()))?;

        match ack_rx.recv_timeout(FLUSH_TIMEOUT) {
            Ok(()) => Ok(()),
            Err(RecvTimeoutError::Timeout) => Err(DataChartsError::Worker(
                "timed out waiting for snapshot writer".to_string(),
            )),
            Err(RecvTimeoutError::Disconnected) => Err(DataChartsError::Worker(
                "snapshot writer stopped before flushing".to_string(),
            )),
        }
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        let _ = self.command_tx.send(PersistCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Snapshot writer panicked");
            }
        }
    }
}
