use chartcore::api::{CartesianChart, ChartConfig};
use chartcore::core::{
    AxisRange, AxisTickPlanner, DataSet, Entry, SeriesKind, ValueTransformer, ViewportState,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn candle_set(len: usize) -> DataSet {
    let entries = (0..len)
        .map(|i| {
            let x = i as f64;
            let base = 100.0 + x * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            Entry::candle(x, open, high, low, close).expect("valid generated candle")
        })
        .collect();
    DataSet::new("candles", SeriesKind::Candle, entries).expect("sorted entries")
}

fn bench_point_round_trip(c: &mut Criterion) {
    let mut viewport = ViewportState::new(1920.0, 1080.0);
    viewport.restrain_viewport(40.0, 10.0, 10.0, 30.0);
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 0.0, 10_000.0, 2_500.0, 0.0);

    c.bench_function("point_round_trip", |b| {
        b.iter(|| {
            let px = transformer.pixel_for_values(&viewport, black_box(4_321.123), black_box(1_234.5));
            let _ = transformer.values_by_touch_point(&viewport, px.x, px.y);
        })
    });
}

fn bench_candle_buffer_10k(c: &mut Criterion) {
    let mut viewport = ViewportState::new(1920.0, 1080.0);
    viewport.restrain_viewport(40.0, 10.0, 10.0, 30.0);
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 0.0, 10_001.0, 2_500.0, 0.0);
    let set = candle_set(10_000);

    c.bench_function("candle_buffer_10k", |b| {
        b.iter(|| {
            let _ = transformer.generate_transformed_values_candle(
                &viewport,
                black_box(&set),
                1.0,
                1.0,
                0,
                9_999,
            );
        })
    });
}

fn bench_tick_planning(c: &mut Criterion) {
    c.bench_function("tick_planning", |b| {
        b.iter(|| {
            let mut axis = AxisRange::new(black_box(-3.7), black_box(1_088.2)).with_label_count(8, false);
            let _ = AxisTickPlanner::plan(&mut axis);
        })
    });
}

fn bench_highlight_2k(c: &mut Criterion) {
    let mut chart = CartesianChart::new(ChartConfig::new(1600.0, 900.0)).expect("valid config");
    chart.set_data(vec![candle_set(2_000)]);
    let center = chart.viewport().content_center();

    c.bench_function("highlight_2k", |b| {
        b.iter(|| {
            let _ = chart.highlight_by_touch_point(black_box(center.x), black_box(center.y));
        })
    });
}

criterion_group!(
    benches,
    bench_point_round_trip,
    bench_candle_buffer_10k,
    bench_tick_planning,
    bench_highlight_2k
);
criterion_main!(benches);
