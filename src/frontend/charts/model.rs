//! View model shared by the chart views

use crate::store::ConfigStore;
use crate::types::{DisplayToggles, Row, SeriesConfig, SeriesStyle};

/// Headroom added above the largest value
pub const Y_HEADROOM: f64 = 10.0;

/// Everything a chart view needs for one frame, borrowed from the store
///
/// Rows are placed on the X axis by position (`x = row index`) and labelled
/// with their axis label.
#[derive(Debug, Clone, Copy)]
pub struct ChartModel<'a> {
    rows: &'a [Row],
    series: Option<&'a SeriesConfig>,
    toggles: DisplayToggles,
}

impl<'a> ChartModel<'a> {
    pub fn new(
        rows: &'a [Row],
        series: Option<&'a SeriesConfig>,
        toggles: DisplayToggles,
    ) -> Self {
        Self {
            rows,
            series,
            toggles,
        }
    }

    pub fn from_store<S: ConfigStore + ?Sized>(store: &'a S) -> Self {
        Self::new(
            store.rows(),
            store.series_config(),
            store.toggles(),
        )
    }

    pub fn rows(&self) -> &'a [Row] {
        self.rows
    }

    pub fn toggles(&self) -> DisplayToggles {
        self.toggles
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plotted series in insertion order
    pub fn series(&self) -> impl Iterator<Item = (&'a str, &'a SeriesStyle)> + 'a {
        self.series
            .into_iter()
            .flat_map(|config| config.iter().map(|(key, style)| (key.as_str(), style)))
    }

    pub fn series_count(&self) -> usize {
        self.series.map_or(0, |config| config.len())
    }

    /// Axis labels in row order
    pub fn categories(&self) -> Vec<&'a str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }

    /// `[x, y]` points for one series; rows without a value are skipped
    pub fn points(&self, key: &str) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.value(key).map(|v| [i as f64, v]))
            .collect()
    }

    /// Largest value among plotted series, 0 when there is none
    pub fn data_max(&self) -> f64 {
        self.series()
            .flat_map(|(key, _)| self.rows.iter().filter_map(move |row| row.value(key)))
            .fold(0.0, f64::max)
    }

    /// Y range `[0, max + headroom]`
    pub fn y_domain(&self) -> (f64, f64) {
        (0.0, self.data_max() + Y_HEADROOM)
    }

    /// X range with half a category of padding on each side
    pub fn x_bounds(&self) -> (f64, f64) {
        (-0.5, self.rows.len().max(1) as f64 - 0.5)
    }

    /// Row index nearest to plot coordinate `x`
    pub fn category_at(&self, x: f64) -> Option<usize> {
        let index = x.round();
        if index < 0.0 || !index.is_finite() {
            return None;
        }
        let index = index as usize;
        (index < self.rows.len()).then_some(index)
    }
}
