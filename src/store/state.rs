//! Session state and its pure transition function

use crate::types::{ChartType, DisplayToggles, Row, SeriesConfig, DEFAULT_AXIS_KEY};
use serde::{Deserialize, Serialize};

fn default_loading() -> bool {
    true
}

fn default_tooltip() -> bool {
    true
}

fn default_axis_key() -> Option<String> {
    Some(DEFAULT_AXIS_KEY.to_string())
}

/// Everything the chart builder remembers between runs
///
/// `loading` is runtime-only and never serialized; it starts `true` and is
/// cleared once the startup rehydration has finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(skip, default = "default_loading")]
    pub loading: bool,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub series_config: Option<SeriesConfig>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default = "default_axis_key")]
    pub axis_key: Option<String>,
    #[serde(default = "default_tooltip")]
    pub tooltip_enabled: bool,
    #[serde(default)]
    pub labels_enabled: bool,
    #[serde(default)]
    pub x_axis_hidden: bool,
    #[serde(default)]
    pub y_axis_hidden: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            loading: true,
            chart_type: ChartType::default(),
            series_config: None,
            rows: Vec::new(),
            axis_key: default_axis_key(),
            tooltip_enabled: true,
            labels_enabled: false,
            x_axis_hidden: false,
            y_axis_hidden: false,
        }
    }
}

/// Every mutation the store accepts
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    SetLoading(bool),
    SetChartType(ChartType),
    /// Shallow-merge entries into the series config
    AppendSeriesConfig(SeriesConfig),
    RemoveSeriesConfig(String),
    AppendRow(Row),
    /// Remove the row at this position; out of range is ignored
    RemoveRow(usize),
    SetRows(Vec<Row>),
    SetAxisKey(String),
    SetTooltip(bool),
    SetLabels(bool),
    SetXHidden(bool),
    SetYHidden(bool),
    /// Clear series config, rows and axis key
    ResetData,
    /// Replace the persisted fields with a restored snapshot
    Rehydrate(Box<SessionState>),
}

impl StoreAction {
    /// Whether applying this action should be followed by a snapshot write
    pub fn is_persisted(&self) -> bool {
        !matches!(self, StoreAction::SetLoading(_) | StoreAction::Rehydrate(_))
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::SetLoading(_) => "set_loading",
            StoreAction::SetChartType(_) => "set_chart_type",
            StoreAction::AppendSeriesConfig(_) => "append_series_config",
            StoreAction::RemoveSeriesConfig(_) => "remove_series_config",
            StoreAction::AppendRow(_) => "append_row",
            StoreAction::RemoveRow(_) => "remove_row",
            StoreAction::SetRows(_) => "set_rows",
            StoreAction::SetAxisKey(_) => "set_axis_key",
            StoreAction::SetTooltip(_) => "set_tooltip",
            StoreAction::SetLabels(_) => "set_labels",
            StoreAction::SetXHidden(_) => "set_x_hidden",
            StoreAction::SetYHidden(_) => "set_y_hidden",
            StoreAction::ResetData => "reset_data",
            StoreAction::Rehydrate(_) => "rehydrate",
        }
    }
}

impl SessionState {
    /// Apply one action in place
    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::SetLoading(loading) => self.loading = loading,
            StoreAction::SetChartType(chart_type) => self.chart_type = chart_type,
            StoreAction::AppendSeriesConfig(partial) => {
                self.series_config
                    .get_or_insert_with(SeriesConfig::new)
                    .extend(partial);
            }
            StoreAction::RemoveSeriesConfig(key) => {
                self.series_config
                    .get_or_insert_with(SeriesConfig::new)
                    .shift_remove(&key);
            }
            StoreAction::AppendRow(row) => self.rows.push(row),
            StoreAction::RemoveRow(index) => {
                if index < self.rows.len() {
                    self.rows.remove(index);
                }
            }
            StoreAction::SetRows(rows) => self.rows = rows,
            StoreAction::SetAxisKey(key) => self.axis_key = Some(key),
            StoreAction::SetTooltip(on) => self.tooltip_enabled = on,
            StoreAction::SetLabels(on) => self.labels_enabled = on,
            StoreAction::SetXHidden(hidden) => self.x_axis_hidden = hidden,
            StoreAction::SetYHidden(hidden) => self.y_axis_hidden = hidden,
            StoreAction::ResetData => {
                self.series_config = None;
                self.rows.clear();
                self.axis_key = None;
            }
            StoreAction::Rehydrate(restored) => {
                let loading = self.loading;
                *self = *restored;
                self.loading = loading;
            }
        }
    }

    /// Current display switches
    pub fn toggles(&self) -> DisplayToggles {
        DisplayToggles {
            tooltip: self.tooltip_enabled,
            labels: self.labels_enabled,
            x_hidden: self.x_axis_hidden,
            y_hidden: self.y_axis_hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{single_series, SeriesStyle};

    #[test]
    fn test_defaults() {
        let state = SessionState::default();
        assert!(state.loading);
        assert_eq!(state.chart_type, ChartType::Bar);
        assert!(state.series_config.is_none());
        assert!(state.rows.is_empty());
        assert_eq!(state.axis_key.as_deref(), Some(DEFAULT_AXIS_KEY));
        assert_eq!(state.toggles(), DisplayToggles::default());
    }

    #[test]
    fn test_append_series_config_overwrites_in_place() {
        let mut state = SessionState::default();
        state.apply(StoreAction::AppendSeriesConfig(single_series(
            "a",
            SeriesStyle::new("a", "#111111"),
        )));
        state.apply(StoreAction::AppendSeriesConfig(single_series(
            "b",
            SeriesStyle::new("b", "#222222"),
        )));
        state.apply(StoreAction::AppendSeriesConfig(single_series(
            "a",
            SeriesStyle::new("a2", "#333333"),
        )));

        let config = state.series_config.unwrap();
        let keys: Vec<_> = config.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(config["a"].label, "a2");
    }

    #[test]
    fn test_remove_from_null_config_yields_empty() {
        let mut state = SessionState::default();
        state.apply(StoreAction::RemoveSeriesConfig("ghost".into()));
        assert_eq!(state.series_config, Some(SeriesConfig::new()));
    }

    #[test]
    fn test_remove_row_out_of_bounds_is_noop() {
        let mut state = SessionState::default();
        state.apply(StoreAction::AppendRow(Row::new("a")));
        state.apply(StoreAction::RemoveRow(5));
        assert_eq!(state.rows.len(), 1);
        state.apply(StoreAction::RemoveRow(0));
        assert!(state.rows.is_empty());
    }

    #[test]
    fn test_reset_keeps_toggles_and_chart_type() {
        let mut state = SessionState::default();
        state.apply(StoreAction::SetChartType(ChartType::Area));
        state.apply(StoreAction::SetLabels(true));
        state.apply(StoreAction::SetYHidden(true));
        state.apply(StoreAction::AppendRow(Row::new("a")));
        state.apply(StoreAction::ResetData);

        assert!(state.series_config.is_none());
        assert!(state.rows.is_empty());
        assert!(state.axis_key.is_none());
        assert_eq!(state.chart_type, ChartType::Area);
        assert!(state.labels_enabled);
        assert!(state.y_axis_hidden);
    }

    #[test]
    fn test_rehydrate_keeps_loading_flag() {
        let mut state = SessionState::default();
        let mut restored = SessionState::default();
        restored.loading = false;
        restored.chart_type = ChartType::Line;

        state.apply(StoreAction::Rehydrate(Box::new(restored)));
        assert!(state.loading);
        assert_eq!(state.chart_type, ChartType::Line);
    }

    #[test]
    fn test_persisted_actions() {
        assert!(!StoreAction::SetLoading(false).is_persisted());
        assert!(!StoreAction::Rehydrate(Box::default()).is_persisted());
        assert!(StoreAction::SetTooltip(false).is_persisted());
        assert!(StoreAction::ResetData.is_persisted());
    }

    #[test]
    fn test_serialized_field_names() {
        let state = SessionState::default();
        let value = serde_json::to_value(&state).unwrap();
        assert!(value.get("loading").is_none());
        assert_eq!(value["chartType"], "bar");
        assert_eq!(value["axisKey"], "x-axis");
        assert_eq!(value["tooltipEnabled"], true);
        assert!(value["seriesConfig"].is_null());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let state: SessionState = serde_json::from_str("{}").unwrap();
        assert!(state.loading);
        assert!(state.tooltip_enabled);
        assert_eq!(state.chart_type, ChartType::Bar);
        assert_eq!(state.axis_key.as_deref(), Some(DEFAULT_AXIS_KEY));
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_cleared_axis_key_survives_roundtrip() {
        let mut state = SessionState::default();
        state.apply(StoreAction::ResetData);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"axisKey\":null"));

        let restored: SessionState = serde_json::from_str(&json).unwrap();
        assert!(restored.axis_key.is_none());
    }
}
