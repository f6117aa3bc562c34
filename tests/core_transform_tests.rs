use approx::assert_relative_eq;
use chartcore::core::{
    ContentRect, DataSet, Entry, Matrix, Orientation, Point, SeriesKind, ValueTransformer,
    ViewportState,
};

fn viewport() -> ViewportState {
    let mut viewport = ViewportState::new(1000.0, 500.0);
    viewport.restrain_viewport(50.0, 20.0, 30.0, 40.0);
    viewport
}

fn flat_viewport() -> ViewportState {
    let mut viewport = ViewportState::new(1000.0, 500.0).with_min_offset(0.0);
    viewport.restrain_viewport(0.0, 0.0, 0.0, 0.0);
    viewport
}

fn vertical(viewport: &ViewportState, inverted: bool) -> ValueTransformer {
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(viewport, inverted);
    transformer.prepare_matrix_value_px(viewport, 0.0, 100.0, 200.0, -100.0);
    transformer
}

fn assert_point(actual: Point, x: f64, y: f64) {
    assert!((actual.x - x).abs() <= 1e-9, "x: {} != {x}", actual.x);
    assert!((actual.y - y).abs() <= 1e-9, "y: {} != {y}", actual.y);
}

#[test]
fn data_corners_map_to_content_corners() {
    let viewport = viewport();
    let transformer = vertical(&viewport, false);

    assert_point(transformer.pixel_for_values(&viewport, 0.0, -100.0), 50.0, 460.0);
    assert_point(transformer.pixel_for_values(&viewport, 100.0, 100.0), 970.0, 20.0);
    assert_point(transformer.values_by_touch_point(&viewport, 510.0, 240.0), 50.0, 0.0);
}

#[test]
fn inverted_value_axis_grows_downward() {
    let viewport = viewport();
    let transformer = vertical(&viewport, true);

    assert_point(transformer.pixel_for_values(&viewport, 0.0, -100.0), 50.0, 20.0);
    assert_point(transformer.pixel_for_values(&viewport, 100.0, 100.0), 970.0, 460.0);
}

#[test]
fn horizontal_transformer_runs_x_upward_and_y_rightward() {
    let viewport = viewport();
    let mut transformer = ValueTransformer::horizontal();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 0.0, 100.0, 200.0, -100.0);

    assert_eq!(transformer.orientation(), Orientation::Horizontal);
    assert_point(transformer.pixel_for_values(&viewport, 0.0, -100.0), 50.0, 460.0);
    assert_point(transformer.pixel_for_values(&viewport, 100.0, 100.0), 970.0, 20.0);
    assert_point(transformer.pixel_for_values(&viewport, 50.0, 0.0), 510.0, 240.0);
    assert_point(transformer.values_by_touch_point(&viewport, 510.0, 240.0), 50.0, 0.0);
}

#[test]
fn batched_mapping_matches_single_point_mapping() {
    let viewport = viewport();
    let transformer = vertical(&viewport, false);

    let mut buffer = vec![10.0, 20.0, 35.5, -42.0, 99.0, 100.0];
    transformer.point_values_to_pixel(&viewport, &mut buffer);
    for (pair, (x, y)) in buffer
        .chunks_exact(2)
        .zip([(10.0, 20.0), (35.5, -42.0), (99.0, 100.0)])
    {
        let single = transformer.pixel_for_values(&viewport, x, y);
        assert_eq!(pair, &[single.x, single.y]);
    }

    transformer.pixels_to_value(&viewport, &mut buffer);
    assert_relative_eq!(buffer[2], 35.5, epsilon = 1e-9);
    assert_relative_eq!(buffer[3], -42.0, epsilon = 1e-9);
}

#[test]
fn zero_range_degrades_to_unit_scale() {
    let viewport = flat_viewport();
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 5.0, 0.0, 0.0, 3.0);

    let matrix = transformer.matrix_value_to_px();
    assert_eq!(matrix.scale_x, 1.0);
    assert_eq!(matrix.scale_y, -1.0);
    assert_point(transformer.pixel_for_values(&viewport, 6.0, 4.0), 1.0, 499.0);
}

#[test]
fn bar_rect_maps_to_sorted_pixel_rect() {
    let viewport = flat_viewport();
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 0.0, 100.0, 100.0, 0.0);

    let rect = transformer.rect_value_to_pixel(&viewport, ContentRect::from_edges(9.5, 40.0, 10.5, 0.0));
    assert_relative_eq!(rect.left, 95.0);
    assert_relative_eq!(rect.right, 105.0);
    assert_relative_eq!(rect.top, 300.0);
    assert_relative_eq!(rect.bottom, 500.0);
}

#[test]
fn zoom_keeps_pivot_fixed_and_narrows_visible_range() {
    let mut viewport = viewport();
    let transformer = vertical(&viewport, false);
    let center = viewport.content_center();
    let pivot = viewport.touch_pivot(center, false);

    viewport.zoom(2.0, 2.0, pivot.x, pivot.y);
    assert_eq!(viewport.scale_x(), 2.0);
    assert_eq!(viewport.trans_x(), -460.0);
    assert_eq!(viewport.trans_y(), 220.0);

    assert_point(transformer.pixel_for_values(&viewport, 50.0, 0.0), 510.0, 240.0);
    let left = transformer.values_by_touch_point(&viewport, viewport.content_left(), 240.0);
    let right = transformer.values_by_touch_point(&viewport, viewport.content_right(), 240.0);
    assert_relative_eq!(left.x, 25.0, epsilon = 1e-9);
    assert_relative_eq!(right.x, 75.0, epsilon = 1e-9);
}

#[test]
fn line_buffer_reveals_phase_scaled_count() {
    let viewport = flat_viewport();
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 0.0, 100.0, 100.0, 0.0);

    let entries = (0..10).map(|x| Entry::new(f64::from(x), f64::from(x) * 10.0)).collect();
    let set = DataSet::new("line", SeriesKind::Line, entries).expect("sorted");

    let buffer = transformer.generate_transformed_values_line(&viewport, &set, 0.5, 1.0, 0, 9);
    assert_eq!(buffer.len(), 10);
    assert_eq!(&buffer[..4], &[0.0, 500.0, 10.0, 450.0]);

    let buffer = transformer.generate_transformed_values_scatter(&viewport, &set, 1.0, 0.5, 0, 9);
    assert_eq!(buffer.len(), 20);
    assert_eq!(&buffer[2..4], &[10.0, 475.0]);
}

#[test]
fn missing_indices_map_the_origin() {
    let viewport = flat_viewport();
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 0.0, 100.0, 100.0, 0.0);

    let entries = (0..10).map(|x| Entry::new(f64::from(x), 10.0)).collect();
    let set = DataSet::new("short", SeriesKind::Line, entries).expect("sorted");

    let buffer = transformer.generate_transformed_values_line(&viewport, &set, 1.0, 1.0, 8, 12);
    assert_eq!(buffer.len(), 10);
    assert_eq!(&buffer[..2], &[80.0, 450.0]);
    assert_eq!(&buffer[4..], &[0.0, 500.0, 0.0, 500.0, 0.0, 500.0]);
}

#[test]
fn candle_buffer_uses_high_and_bubble_ignores_phase_x() {
    let viewport = flat_viewport();
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(&viewport, false);
    transformer.prepare_matrix_value_px(&viewport, 0.0, 100.0, 100.0, 0.0);

    let candles = vec![
        Entry::candle(1.0, 10.0, 40.0, 5.0, 30.0).expect("valid"),
        Entry::candle(2.0, 30.0, 60.0, 20.0, 50.0).expect("valid"),
    ];
    let set = DataSet::new("ohlc", SeriesKind::Candle, candles).expect("sorted");
    let buffer = transformer.generate_transformed_values_candle(&viewport, &set, 1.0, 1.0, 0, 1);
    assert_eq!(buffer, vec![10.0, 300.0, 20.0, 200.0]);

    let bubbles = vec![Entry::bubble(1.0, 10.0, 3.0), Entry::bubble(2.0, 20.0, 4.0)];
    let set = DataSet::new("bubbles", SeriesKind::Bubble, bubbles).expect("sorted");
    let buffer = transformer.generate_transformed_values_bubble(&viewport, &set, 1.0, 0, 1);
    assert_eq!(buffer.len(), 4);
}

#[test]
fn unprepared_transformer_maps_identity() {
    let viewport = flat_viewport();
    assert!(Matrix::scaling(0.0, 1.0).invert().is_none());

    let transformer = ValueTransformer::vertical();
    assert_eq!(transformer.pixel_to_value_matrix(&viewport), Matrix::IDENTITY);
    assert_point(transformer.pixel_for_values(&viewport, 3.0, 4.0), 3.0, 4.0);
}
