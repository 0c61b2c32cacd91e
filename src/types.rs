//! Core data types for Data Charts
//!
//! This module contains the data structures shared by the store, the chart
//! views and the sidebar form.
//!
//! # Main Types
//!
//! - [`ChartType`] - Which chart view is active (bar, area, line)
//! - [`SeriesStyle`] - Display label and color of one series
//! - [`SeriesConfig`] - Ordered mapping from series key to [`SeriesStyle`]
//! - [`Row`] - One data point: an axis label plus one value per series key
//! - [`DisplayToggles`] - The four per-chart display switches
//!
//! # Row Shape
//!
//! A row keeps its axis label apart from its numeric fields. The name of the
//! axis field is session state ([`crate::store::SessionState::axis_key`]), so
//! renaming it never touches the rows. Numeric fields are an open mapping;
//! nothing forces them to match the current [`SeriesConfig`], and a row may
//! keep values for a series that has since been removed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name used for the axis label when the session has none
pub const DEFAULT_AXIS_KEY: &str = "x-axis";

/// Chart kind rendered by the central panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Grouped vertical bars
    #[default]
    Bar,
    /// Filled area under a linear outline
    Area,
    /// Linear polyline without markers
    Line,
}

impl ChartType {
    /// Get all chart types in toolbar order
    pub fn all() -> &'static [ChartType] {
        &[ChartType::Bar, ChartType::Area, ChartType::Line]
    }

    /// Get display name for this chart type
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Area => "Area",
            ChartType::Line => "Line",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartType::Bar => write!(f, "bar"),
            ChartType::Area => write!(f, "area"),
            ChartType::Line => write!(f, "line"),
        }
    }
}

/// Label and color of one series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Text shown in the sidebar and the legend
    pub label: String,
    /// CSS-style hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`)
    pub color: String,
}

impl SeriesStyle {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Series key → style, in insertion order
pub type SeriesConfig = IndexMap<String, SeriesStyle>;

/// Build a [`SeriesConfig`] with a single entry
pub fn single_series(key: impl Into<String>, style: SeriesStyle) -> SeriesConfig {
    let mut config = SeriesConfig::new();
    config.insert(key.into(), style);
    config
}

/// One data point of the chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Category shown on the X axis
    #[serde(default)]
    pub label: String,
    /// Series key → numeric value
    #[serde(default)]
    pub values: IndexMap<String, f64>,
}

impl Row {
    /// Create a row with the given axis label and no values
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: IndexMap::new(),
        }
    }

    /// Builder-style value setter
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Get the value stored for `key`
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Set (or add) the value for `key`
    pub fn set_value(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Remove `key`, keeping the order of the remaining fields
    pub fn remove_value(&mut self, key: &str) -> Option<f64> {
        self.values.shift_remove(key)
    }

    /// Largest value in this row, if any
    pub fn max_value(&self) -> Option<f64> {
        self.values.values().copied().reduce(f64::max)
    }
}

/// Per-chart display switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    /// Show the hover readout
    pub tooltip: bool,
    /// Draw value labels above each point/bar
    pub labels: bool,
    /// Hide the X axis
    pub x_hidden: bool,
    /// Hide the Y axis
    pub y_hidden: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            tooltip: true,
            labels: false,
            x_hidden: false,
            y_hidden: false,
        }
    }
}
