//! Session store
//!
//! The store is the single owner of [`SessionState`]. Every mutation is a
//! [`StoreAction`] applied by the pure [`SessionState::apply`]; the
//! [`ConfigStore`] trait layers the getter/setter vocabulary used by the UI
//! and the editor on top of `state()` and `dispatch()`.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - plain in-memory store with no side effects
//! - [`PersistentStore`] - snapshots the state to a [`StorageAdapter`] after
//!   every persisted action and restores it at startup
//!
//! # Example
//!
//! ```ignore
//! use data_charts::store::{ConfigStore, MemoryStore};
//! use data_charts::types::ChartType;
//!
//! let mut store = MemoryStore::new();
//! store.set_chart_type(ChartType::Line);
//! assert_eq!(store.chart_type(), ChartType::Line);
//! ```

mod persister;
pub mod snapshot;
mod state;

pub use persister::{PersistCommand, PersistWorker, Persister, RehydrateOutcome, FLUSH_TIMEOUT};
pub use snapshot::{SNAPSHOT_NAME, SNAPSHOT_VERSION};
pub use state::{SessionState, StoreAction};

use crate::error::Result;
use crate::storage::StorageAdapter;
use crate::types::{ChartType, DisplayToggles, Row, SeriesConfig};
use std::time::Duration;

/// State container shared by the shell, the chart views and the editor
///
/// Implementors supply [`state`](ConfigStore::state) and
/// [`dispatch`](ConfigStore::dispatch); the rest are provided.
pub trait ConfigStore {
    /// Borrow the current state
    fn state(&self) -> &SessionState;

    /// Apply one mutation
    fn dispatch(&mut self, action: StoreAction);

    fn loading(&self) -> bool {
        self.state().loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.dispatch(StoreAction::SetLoading(loading));
    }

    fn chart_type(&self) -> ChartType {
        self.state().chart_type
    }

    fn set_chart_type(&mut self, chart_type: ChartType) {
        self.dispatch(StoreAction::SetChartType(chart_type));
    }

    fn series_config(&self) -> Option<&SeriesConfig> {
        self.state().series_config.as_ref()
    }

    /// Merge `partial` into the series config; existing keys keep their slot
    fn append_series_config(&mut self, partial: SeriesConfig) {
        self.dispatch(StoreAction::AppendSeriesConfig(partial));
    }

    /// Remove one series entry; rows are left alone
    fn remove_series_config(&mut self, key: &str) {
        self.dispatch(StoreAction::RemoveSeriesConfig(key.to_string()));
    }

    fn rows(&self) -> &[Row] {
        &self.state().rows
    }

    fn append_row(&mut self, row: Row) {
        self.dispatch(StoreAction::AppendRow(row));
    }

    fn remove_row(&mut self, index: usize) {
        self.dispatch(StoreAction::RemoveRow(index));
    }

    fn set_rows(&mut self, rows: Vec<Row>) {
        self.dispatch(StoreAction::SetRows(rows));
    }

    fn axis_key(&self) -> Option<&str> {
        self.state().axis_key.as_deref()
    }

    fn set_axis_key(&mut self, key: &str) {
        self.dispatch(StoreAction::SetAxisKey(key.to_string()));
    }

    fn tooltip(&self) -> bool {
        self.state().tooltip_enabled
    }

    fn set_tooltip(&mut self, on: bool) {
        self.dispatch(StoreAction::SetTooltip(on));
    }

    fn labels(&self) -> bool {
        self.state().labels_enabled
    }

    fn set_labels(&mut self, on: bool) {
        self.dispatch(StoreAction::SetLabels(on));
    }

    fn x_hidden(&self) -> bool {
        self.state().x_axis_hidden
    }

    fn set_x_hidden(&mut self, hidden: bool) {
        self.dispatch(StoreAction::SetXHidden(hidden));
    }

    fn y_hidden(&self) -> bool {
        self.state().y_axis_hidden
    }

    fn set_y_hidden(&mut self, hidden: bool) {
        self.dispatch(StoreAction::SetYHidden(hidden));
    }

    fn toggles(&self) -> DisplayToggles {
        self.state().toggles()
    }

    /// Clear series config, rows and axis key
    fn reset_data(&mut self) {
        self.dispatch(StoreAction::ResetData);
    }
}

/// Store without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: SessionState,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn state(&self) -> &SessionState {
        &self.state
    }

    fn dispatch(&mut self, action: StoreAction) {
        self.state.apply(action);
    }
}

/// Store that mirrors every persisted mutation to storage
pub struct PersistentStore {
    state: SessionState,
    persister: Persister,
}

impl PersistentStore {
    /// Start with defaults and begin restoring from `adapter` in the background
    ///
    /// The store reports `loading() == true` until
    /// [`poll_rehydration`](Self::poll_rehydration) sees the outcome.
    pub fn open<A: StorageAdapter + 'static>(adapter: A) -> Result<Self> {
        let persister = Persister::spawn(adapter)?;
        Ok(Self {
            state: SessionState::default(),
            persister,
        })
    }

    /// Apply the rehydration outcome if it has arrived
    ///
    /// Returns `true` on the call that finished loading.
    pub fn poll_rehydration(&mut self) -> bool {
        if !self.state.loading {
            return false;
        }
        match self.persister.try_outcome() {
            Some(outcome) => {
                self.finish_rehydration(outcome);
                true
            }
            None => false,
        }
    }

    /// Block up to `timeout` for rehydration to finish
    pub fn wait_for_rehydration(&mut self, timeout: Duration) -> bool {
        if !self.state.loading {
            return true;
        }
        match self.persister.wait_outcome(timeout) {
            Some(outcome) => {
                self.finish_rehydration(outcome);
                true
            }
            None => false,
        }
    }

    fn finish_rehydration(&mut self, outcome: RehydrateOutcome) {
        match outcome {
            RehydrateOutcome::Restored(state) => self.dispatch(StoreAction::Rehydrate(state)),
            RehydrateOutcome::Empty => {}
            RehydrateOutcome::Failed(reason) => {
                tracing::warn!("Could not restore session, continuing in memory: {}", reason)
            }
        }
        self.set_loading(false);
    }

    /// Remove the stored snapshot; the in-memory state is untouched
    pub fn discard_snapshot(&self) {
        self.persister.discard();
    }

    /// Wait for queued snapshot writes to reach storage
    pub fn flush(&self) -> Result<()> {
        self.persister.flush()
    }
}

impl ConfigStore for PersistentStore {
    fn state(&self) -> &SessionState {
        &self.state
    }

    fn dispatch(&mut self, action: StoreAction) {
        let persisted = action.is_persisted();
        tracing::trace!("Dispatch {}", action.name());
        self.state.apply(action);

        if persisted {
            match snapshot::encode(&self.state) {
                Ok(bytes) => self.persister.save(bytes),
                Err(e) => tracing::warn!("Failed to encode session snapshot: {}", e),
            }
        }
    }
}
