//! Test data builders for creating test objects

use data_charts::store::SessionState;
use data_charts::types::{ChartType, Row, SeriesConfig, SeriesStyle};

/// Builder for rows
pub struct RowBuilder {
    row: Row,
}

impl RowBuilder {
    pub fn new(label: &str) -> Self {
        Self {
            row: Row::new(label),
        }
    }

    pub fn value(mut self, key: &str, value: f64) -> Self {
        self.row.set_value(key, value);
        self
    }

    pub fn build(self) -> Row {
        self.row
    }
}

/// Builder for series configs
#[derive(Default)]
pub struct SeriesBuilder {
    config: SeriesConfig,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series whose key and label are both `name`
    pub fn series(mut self, name: &str, color: &str) -> Self {
        self.config
            .insert(name.to_string(), SeriesStyle::new(name, color));
        self
    }

    pub fn build(self) -> SeriesConfig {
        self.config
    }
}

/// Builder for whole sessions
pub struct SessionBuilder {
    state: SessionState,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
        }
    }

    pub fn chart_type(mut self, chart_type: ChartType) -> Self {
        self.state.chart_type = chart_type;
        self
    }

    pub fn series(mut self, config: SeriesConfig) -> Self {
        self.state.series_config = Some(config);
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.state.rows.push(row);
        self
    }

    pub fn labels(mut self, on: bool) -> Self {
        self.state.labels_enabled = on;
        self
    }

    pub fn build(self) -> SessionState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_builder() {
        let row = RowBuilder::new("Jan").value("a", 1.0).value("b", 2.0).build();
        assert_eq!(row.label, "Jan");
        assert_eq!(row.value("b"), Some(2.0));
    }
}
