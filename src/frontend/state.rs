//! Action types for the frontend
//!
//! Panels never mutate the store directly. They return `AppAction`s, and the
//! app applies them in one place after the frame's UI has been laid out.

use crate::editor::{CellEdit, FormError};
use crate::types::ChartType;

/// Actions that any panel can emit
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Chart display
    SetChartType(ChartType),
    SetTooltip(bool),
    SetLabels(bool),
    SetXHidden(bool),
    SetYHidden(bool),

    // Shell
    ToggleDarkMode,
    ToggleSidebar,
    /// Capture the chart area and save it as PNG
    ExportImage,

    // Sidebar form
    AddSeries(String),
    RemoveSeries(String),
    AddRow,
    RemoveRow(usize),
    /// Commit an already validated cell edit
    CommitCell(CellEdit),
    ResetData,

    /// Show a blocking alert
    Alert(FormError),
}

impl AppAction {
    /// Whether this action changes which rows or fields exist
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AppAction::AddSeries(_)
                | AppAction::RemoveSeries(_)
                | AppAction::AddRow
                | AppAction::RemoveRow(_)
                | AppAction::ResetData
        )
    }
}
