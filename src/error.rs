//! Error handling for the Data Charts application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application. User-input errors raised by the sidebar form
//! live in [`crate::editor::FormError`]; everything here is infrastructure.

use thiserror::Error;

/// Main error type for Data Charts operations
#[derive(Error, Debug)]
pub enum DataChartsError {
    /// Errors raised by a storage adapter
    #[error("Storage error: {0}")]
    Storage(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to snapshot (de)serialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot written by an incompatible version
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Errors related to chart image export
    #[error("Export error: {0}")]
    Export(String),

    /// Errors related to the background persistence worker
    #[error("Persistence worker error: {0}")]
    Worker(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DataChartsError>,
    },
}

impl DataChartsError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DataChartsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for DataChartsError {
    fn from(err: serde_json::Error) -> Self {
        DataChartsError::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for DataChartsError {
    fn from(err: image::ImageError) -> Self {
        DataChartsError::Export(err.to_string())
    }
}

/// Result type alias for Data Charts operations
pub type Result<T> = std::result::Result<T, DataChartsError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DataChartsError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DataChartsError::Io(e).with_context(f()))
    }
}
