//! Benchmarks for session snapshot encoding
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use data_charts::store::{snapshot, SessionState};
use data_charts::types::{Row, SeriesStyle};

fn session(rows: usize, series: usize) -> SessionState {
    let mut state = SessionState::default();
    let config = state.series_config.get_or_insert_with(Default::default);
    for s in 0..series {
        config.insert(format!("s{}", s), SeriesStyle::new(format!("s{}", s), "#336699"));
    }
    for r in 0..rows {
        let row = (0..series).fold(Row::new(format!("row {}", r)), |row, s| {
            row.with_value(format!("s{}", s), (r * s) as f64)
        });
        state.rows.push(row);
    }
    state
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_encode");

    for rows in [10, 100, 1000] {
        let state = session(rows, 5);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &state, |b, state| {
            b.iter(|| snapshot::encode(black_box(state)))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_decode");

    for rows in [10, 100, 1000] {
        let bytes = snapshot::encode(&session(rows, 5)).unwrap_or_default();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &bytes, |b, bytes| {
            b.iter(|| snapshot::decode(black_box(bytes)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
