//! Store invariants checked against arbitrary inputs

mod common;

use common::builders::{RowBuilder, SeriesBuilder};
use data_charts::store::{snapshot, ConfigStore, MemoryStore, SessionState};
use data_charts::types::{single_series, ChartType, Row, SeriesStyle};
use proptest::prelude::*;

fn arb_row() -> impl Strategy<Value = Row> {
    (
        "[a-z]{0,6}",
        prop::collection::vec(("[a-c]", 0u32..1000), 0..4),
    )
        .prop_map(|(label, values)| {
            values
                .into_iter()
                .fold(Row::new(label), |row, (k, v)| row.with_value(k, f64::from(v)))
        })
}

fn arb_chart_type() -> impl Strategy<Value = ChartType> {
    prop_oneof![
        Just(ChartType::Bar),
        Just(ChartType::Area),
        Just(ChartType::Line)
    ]
}

proptest! {
    #[test]
    fn append_series_yields_union(names in prop::collection::vec("[a-z]{1,5}", 0..12)) {
        let mut store = MemoryStore::new();
        for (i, name) in names.iter().enumerate() {
            store.append_series_config(single_series(
                name.clone(),
                SeriesStyle::new(name.clone(), format!("#{:06x}", i)),
            ));
        }

        let mut unique: Vec<&String> = Vec::new();
        for name in &names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }

        match store.series_config() {
            None => prop_assert!(names.is_empty()),
            Some(config) => {
                let keys: Vec<&String> = config.keys().collect();
                prop_assert_eq!(keys, unique);
                // later value wins on collision
                for name in &names {
                    let last = names.iter().rposition(|n| n == name).unwrap();
                    prop_assert_eq!(&config[name.as_str()].color, &format!("#{:06x}", last));
                }
            }
        }
    }

    #[test]
    fn append_row_is_order_preserving(rows in prop::collection::vec(arb_row(), 0..20)) {
        let mut store = MemoryStore::new();
        for row in &rows {
            store.append_row(row.clone());
        }
        prop_assert_eq!(store.rows(), rows.as_slice());
    }

    #[test]
    fn remove_row_removes_exactly_one(
        rows in prop::collection::vec(arb_row(), 0..10),
        index in 0usize..15,
    ) {
        let mut store = MemoryStore::new();
        store.set_rows(rows.clone());
        store.remove_row(index);

        if index < rows.len() {
            let mut expected = rows.clone();
            expected.remove(index);
            prop_assert_eq!(store.rows(), expected.as_slice());
        } else {
            prop_assert_eq!(store.rows(), rows.as_slice());
        }
    }

    #[test]
    fn reset_keeps_toggles(
        tooltip: bool,
        labels: bool,
        x_hidden: bool,
        y_hidden: bool,
        chart_type in arb_chart_type(),
        rows in prop::collection::vec(arb_row(), 0..5),
    ) {
        let mut store = MemoryStore::new();
        store.set_tooltip(tooltip);
        store.set_labels(labels);
        store.set_x_hidden(x_hidden);
        store.set_y_hidden(y_hidden);
        store.set_chart_type(chart_type);
        store.set_rows(rows);
        store.append_series_config(SeriesBuilder::new().series("s", "#fff").build());

        let toggles = store.toggles();
        store.reset_data();

        prop_assert!(store.series_config().is_none());
        prop_assert!(store.rows().is_empty());
        prop_assert!(store.axis_key().is_none());
        prop_assert_eq!(store.toggles(), toggles);
        prop_assert_eq!(store.chart_type(), chart_type);
    }

    #[test]
    fn snapshot_roundtrip(
        chart_type in arb_chart_type(),
        rows in prop::collection::vec(arb_row(), 0..8),
        labels: bool,
        axis in proptest::option::of("[a-z-]{1,8}"),
    ) {
        let mut state = SessionState::default();
        state.loading = false;
        state.chart_type = chart_type;
        state.rows = rows;
        state.labels_enabled = labels;
        state.axis_key = axis;
        state.series_config = Some(SeriesBuilder::new().series("a", "#123456").build());

        let decoded = snapshot::decode(&snapshot::encode(&state).unwrap()).unwrap();
        prop_assert!(decoded.loading);
        prop_assert_eq!(SessionState { loading: false, ..decoded }, state);
    }
}

#[test]
fn remove_series_config_leaves_rows() {
    let mut store = MemoryStore::new();
    store.append_series_config(SeriesBuilder::new().series("a", "#111").series("b", "#222").build());
    store.append_row(RowBuilder::new("r").value("a", 1.0).value("b", 2.0).build());

    store.remove_series_config("a");

    let keys: Vec<_> = store.series_config().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["b"]);
    assert_eq!(store.rows()[0].value("a"), Some(1.0));
}

#[test]
fn chart_type_change_leaves_rows() {
    let mut store = MemoryStore::new();
    store.append_series_config(single_series("sales", SeriesStyle::new("sales", "#fff")));
    store.append_row(RowBuilder::new("").value("sales", 42.0).build());
    let rows_before = store.rows().to_vec();

    store.set_chart_type(ChartType::Line);

    assert_eq!(store.chart_type(), ChartType::Line);
    assert_eq!(store.rows(), rows_before.as_slice());
    common::assert_float_eq(store.rows()[0].value("sales").unwrap(), 42.0, 1e-9);
}
