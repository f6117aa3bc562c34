use chartcore::core::{Point, ValueTransformer, ViewportState};
use proptest::prelude::*;

fn viewport(offsets: (f64, f64, f64, f64), zoom: f64, pivot: (f64, f64)) -> ViewportState {
    let mut viewport = ViewportState::new(1200.0, 800.0);
    viewport.restrain_viewport(offsets.0, offsets.1, offsets.2, offsets.3);
    let center = Point::new(
        viewport.content_left() + viewport.content_width() * pivot.0,
        viewport.content_top() + viewport.content_height() * pivot.1,
    );
    let touch = viewport.touch_pivot(center, false);
    viewport.zoom(zoom, zoom, touch.x, touch.y);
    viewport
}

proptest! {
    #[test]
    fn pixel_round_trip_recovers_values(
        x_min in -10_000.0f64..10_000.0,
        x_span in 0.01f64..10_000.0,
        y_min in -10_000.0f64..10_000.0,
        y_span in 0.01f64..10_000.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        offsets in (0.0f64..100.0, 0.0f64..100.0, 0.0f64..100.0, 0.0f64..100.0),
        zoom in 1.0f64..8.0,
        pivot in (0.0f64..1.0, 0.0f64..1.0),
        inverted in any::<bool>(),
        horizontal in any::<bool>()
    ) {
        let viewport = viewport(offsets, zoom, pivot);
        let mut transformer = if horizontal {
            ValueTransformer::horizontal()
        } else {
            ValueTransformer::vertical()
        };
        transformer.prepare_matrix_offset(&viewport, inverted);
        transformer.prepare_matrix_value_px(&viewport, x_min, x_span, y_span, y_min);

        let x = x_min + fx * x_span;
        let y = y_min + fy * y_span;
        let pixel = transformer.pixel_for_values(&viewport, x, y);
        let recovered = transformer.values_by_touch_point(&viewport, pixel.x, pixel.y);

        prop_assert!((recovered.x - x).abs() <= 1e-6 * (1.0 + x.abs()));
        prop_assert!((recovered.y - y).abs() <= 1e-6 * (1.0 + y.abs()));
    }

    #[test]
    fn horizontal_mapping_is_vertical_mapping_with_swapped_axes(
        x_min in -1_000.0f64..1_000.0,
        x_span in 0.1f64..1_000.0,
        y_min in -1_000.0f64..1_000.0,
        y_span in 0.1f64..1_000.0,
        x in -2_000.0f64..2_000.0,
        y in -2_000.0f64..2_000.0,
        zoom in 1.0f64..4.0
    ) {
        let viewport = viewport((40.0, 20.0, 30.0, 50.0), zoom, (0.5, 0.5));

        let mut horizontal = ValueTransformer::horizontal();
        horizontal.prepare_matrix_offset(&viewport, false);
        horizontal.prepare_matrix_value_px(&viewport, x_min, x_span, y_span, y_min);

        let mut vertical = ValueTransformer::vertical();
        vertical.prepare_matrix_offset(&viewport, false);
        vertical.prepare_matrix_value_px(&viewport, y_min, y_span, x_span, x_min);

        prop_assert_eq!(
            horizontal.pixel_for_values(&viewport, x, y),
            vertical.pixel_for_values(&viewport, y, x)
        );
    }

    #[test]
    fn batched_buffer_matches_single_points(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 0..64),
        zoom in 1.0f64..4.0
    ) {
        let viewport = viewport((10.0, 10.0, 10.0, 10.0), zoom, (0.25, 0.75));
        let mut transformer = ValueTransformer::vertical();
        transformer.prepare_matrix_offset(&viewport, false);
        transformer.prepare_matrix_value_px(&viewport, -1_000.0, 2_000.0, 2_000.0, -1_000.0);

        let mut buffer = values.clone();
        if buffer.len() % 2 == 1 {
            buffer.pop();
        }
        let inputs = buffer.clone();
        transformer.point_values_to_pixel(&viewport, &mut buffer);

        for (pixel, value) in buffer.chunks_exact(2).zip(inputs.chunks_exact(2)) {
            let single = transformer.pixel_for_values(&viewport, value[0], value[1]);
            prop_assert_eq!(pixel, &[single.x, single.y][..]);
        }
    }
}
