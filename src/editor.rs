//! Sidebar form operations
//!
//! These functions turn user gestures into store calls. They validate input
//! at the form boundary and report problems as [`FormError`]; the store
//! itself never sees invalid data. New cells get a random integer in
//! `[0, MAX_RANDOM_VALUE)` so a freshly added series or row is visible at once.

use crate::palette::series_color;
use crate::store::ConfigStore;
use crate::types::{single_series, Row, SeriesStyle, DEFAULT_AXIS_KEY};
use rand::Rng;
use thiserror::Error;

/// Longest series name the input widget accepts
pub const MAX_SERIES_NAME_CHARS: usize = 10;

/// Upper bound (exclusive) for generated cell values
pub const MAX_RANDOM_VALUE: u32 = 100;

/// Input problems shown to the user as an alert
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Please enter a series name.")]
    EmptySeriesName,

    #[error("A series named \"{0}\" already exists.")]
    DuplicateLabel(String),

    #[error("\"{0}\" is the axis field and cannot name a series.")]
    AxisFieldName(String),

    #[error("Add at least one series before adding data.")]
    NoSeries,

    #[error("\"{input}\" is not a valid number for {field}.")]
    InvalidNumber { field: String, input: String },
}

pub type FormResult<T> = std::result::Result<T, FormError>;

/// Parsed value for one cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// New axis label
    Label(String),
    /// New numeric value
    Number(f64),
}

/// A validated edit to one cell, ready to be committed
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    pub row: usize,
    pub field: String,
    pub value: CellValue,
}

impl CellEdit {
    /// Whether both edits target the same cell
    pub fn same_cell(&self, other: &CellEdit) -> bool {
        self.row == other.row && self.field == other.field
    }
}

/// Name of the axis field, falling back to the default after a reset
pub fn axis_field(store: &impl ConfigStore) -> &str {
    store.axis_key().unwrap_or(DEFAULT_AXIS_KEY)
}

fn random_value(rng: &mut impl Rng) -> f64 {
    f64::from(rng.gen_range(0..MAX_RANDOM_VALUE))
}

/// Add a series named `name`; returns its key
///
/// Existing rows get a random value for the new series.
pub fn add_series(
    store: &mut impl ConfigStore,
    name: &str,
    rng: &mut impl Rng,
) -> FormResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::EmptySeriesName);
    }

    if name == axis_field(store) {
        return Err(FormError::AxisFieldName(name.to_string()));
    }

    let existing = store.series_config().map_or(0, |c| c.len());
    if store
        .series_config()
        .is_some_and(|c| c.values().any(|s| s.label == name))
    {
        return Err(FormError::DuplicateLabel(name.to_string()));
    }

    let key = name.to_string();
    let color = series_color(existing);
    tracing::debug!("Adding series {:?} with color {}", key, color);
    store.append_series_config(single_series(key.clone(), SeriesStyle::new(name, color)));

    if !store.rows().is_empty() {
        let rows = store
            .rows()
            .iter()
            .cloned()
            .map(|row| row.with_value(key.clone(), random_value(rng)))
            .collect();
        store.set_rows(rows);
    }

    Ok(key)
}

/// Remove a series and strip its values from every row
pub fn remove_series(store: &mut impl ConfigStore, key: &str) {
    tracing::debug!("Removing series {:?}", key);
    store.remove_series_config(key);

    if !store.rows().is_empty() {
        let rows = store
            .rows()
            .iter()
            .cloned()
            .map(|mut row| {
                row.remove_value(key);
                row
            })
            .collect();
        store.set_rows(rows);
    }
}

/// Append a row with an empty label and a random value per series
pub fn add_row(store: &mut impl ConfigStore, rng: &mut impl Rng) -> FormResult<()> {
    let keys: Vec<String> = match store.series_config() {
        Some(config) if !config.is_empty() => config.keys().cloned().collect(),
        _ => return Err(FormError::NoSeries),
    };

    let row = keys
        .into_iter()
        .fold(Row::new(""), |row, key| row.with_value(key, random_value(rng)));
    store.append_row(row);
    Ok(())
}

/// Remove the row at `index`; out of range is ignored
pub fn remove_row(store: &mut impl ConfigStore, index: usize) {
    store.remove_row(index);
}

/// Parse a numeric cell: digits with at most one dot, or empty for zero
pub fn parse_number(field: &str, input: &str) -> FormResult<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let invalid = || FormError::InvalidNumber {
        field: field.to_string(),
        input: input.to_string(),
    };

    let mut dots = 0;
    let mut digits = 0;
    for c in input.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return Err(invalid()),
        }
    }
    if dots > 1 || digits == 0 {
        return Err(invalid());
    }

    // "5." and ".5" are accepted; f64's parser handles both.
    let value = input.parse::<f64>().map_err(|_| invalid())?;
    // Overlong digit strings overflow to infinity, which JSON cannot hold.
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

/// Validate raw input for `field`
pub fn parse_cell(axis_key: &str, field: &str, input: &str) -> FormResult<CellValue> {
    if field == axis_key {
        Ok(CellValue::Label(input.trim().to_string()))
    } else {
        parse_number(field, input).map(CellValue::Number)
    }
}

/// Commit a validated edit; a row that no longer exists is ignored
pub fn apply_cell_edit(store: &mut impl ConfigStore, edit: CellEdit) {
    if edit.row >= store.rows().len() {
        tracing::debug!("Dropping edit for missing row {}", edit.row);
        return;
    }

    let mut rows = store.rows().to_vec();
    let row = &mut rows[edit.row];
    match edit.value {
        CellValue::Label(label) => row.label = label,
        CellValue::Number(value) => row.set_value(edit.field, value),
    }
    store.set_rows(rows);
}

/// Parse and commit an edit in one step
pub fn edit_cell(
    store: &mut impl ConfigStore,
    row: usize,
    field: &str,
    input: &str,
) -> FormResult<()> {
    let value = parse_cell(axis_field(store), field, input)?;
    apply_cell_edit(
        store,
        CellEdit {
            row,
            field: field.to_string(),
            value,
        },
    );
    Ok(())
}

/// Clear all series and rows
pub fn reset(store: &mut impl ConfigStore) {
    tracing::info!("Resetting chart data");
    store.reset_data();
}
