//! # Data Charts: a small chart builder
//!
//! Add named series, type values into a sidebar, pick bar/area/line and see
//! the chart update live. The session is mirrored to disk after every change
//! and restored on the next start.
//!
//! ## Architecture
//!
//! - **Store**: [`store::SessionState`] mutated only through
//!   [`store::StoreAction`]s; the [`store::ConfigStore`] trait is what the
//!   rest of the app talks to
//! - **Persistence**: a background thread writes snapshots through a
//!   [`storage::StorageAdapter`] and restores the last one at startup
//! - **Editor**: form operations that validate input before it reaches the store
//! - **Frontend**: eframe/egui shell with `egui_plot` chart views
//!
//! ## Configuration
//!
//! Preferences and the session snapshot live in the platform data directory
//! under `dev.data-charts`:
//!
//! - **Linux**: `~/.local/share/dev.data-charts/`
//! - **macOS**: `~/Library/Application Support/dev.data-charts/`
//! - **Windows**: `%APPDATA%\dev.data-charts\`
//!
//! ## Example
//!
//! ```ignore
//! use data_charts::{config::Preferences, storage::FileStorage, store::PersistentStore};
//!
//! let store = PersistentStore::open(FileStorage::in_app_data_dir()?)?;
//! let preferences = Preferences::load_or_default();
//!
//! eframe::run_native(
//!     "Data Charts",
//!     eframe::NativeOptions::default(),
//!     Box::new(|cc| Ok(Box::new(DataChartsApp::new(cc, store, preferences)))),
//! )?;
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod frontend;
pub mod palette;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Preferences;
pub use error::{DataChartsError, Result};
pub use frontend::DataChartsApp;
pub use store::{ConfigStore, MemoryStore, PersistentStore};
pub use types::{ChartType, Row, SeriesConfig, SeriesStyle};
