use serde::{Deserialize, Serialize};

use crate::core::data_set::DataSet;
use crate::core::entry::EntryPayload;
use crate::core::matrix::Matrix;
use crate::core::types::{ContentRect, Orientation, Point};
use crate::core::viewport::ViewportState;

/// Maps data-space values to pixel-space coordinates and back.
///
/// The full forward mapping is `offset ∘ touch ∘ value_to_px`, where the touch
/// matrix is read from the [`ViewportState`] passed to each call. One
/// transformer exists per value axis (left/right), built for a fixed
/// [`Orientation`]: horizontal transformers exchange the x/y roles inside
/// the matrices, so every public method takes and returns data points as
/// `(x, y)` regardless of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueTransformer {
    orientation: Orientation,
    matrix_value_to_px: Matrix,
    matrix_offset: Matrix,
}

impl Default for ValueTransformer {
    fn default() -> Self {
        Self::new(Orientation::Vertical)
    }
}

impl ValueTransformer {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            matrix_value_to_px: Matrix::IDENTITY,
            matrix_offset: Matrix::IDENTITY,
        }
    }

    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn matrix_value_to_px(&self) -> Matrix {
        self.matrix_value_to_px
    }

    #[must_use]
    pub fn matrix_offset(&self) -> Matrix {
        self.matrix_offset
    }

    /// Builds the value-to-pixel matrix from the x-axis and value-axis ranges.
    ///
    /// The value axis grows upward on screen. A zero or non-finite range
    /// falls back to a scale of 1 instead of dividing by zero.
    pub fn prepare_matrix_value_px(
        &mut self,
        viewport: &ViewportState,
        x_axis_min: f64,
        x_axis_range: f64,
        y_axis_range: f64,
        y_axis_min: f64,
    ) {
        // Horizontal charts plot data x along the vertical pixel axis.
        let (h_min, h_range, v_range, v_min) = match self.orientation {
            Orientation::Vertical => (x_axis_min, x_axis_range, y_axis_range, y_axis_min),
            Orientation::Horizontal => (y_axis_min, y_axis_range, x_axis_range, x_axis_min),
        };

        let scale_x = safe_scale(viewport.content_width(), h_range);
        let scale_y = safe_scale(viewport.content_height(), v_range);

        let mut matrix = Matrix::IDENTITY;
        matrix.post_translate(-finite_or_zero(h_min), -finite_or_zero(v_min));
        matrix.post_scale(scale_x, -scale_y);
        self.matrix_value_to_px = matrix;
    }

    /// Builds the matrix that moves the origin onto the content rect.
    ///
    /// `inverted` flips the value axis (top-to-bottom for vertical charts,
    /// right-to-left for horizontal ones).
    pub fn prepare_matrix_offset(&mut self, viewport: &ViewportState, inverted: bool) {
        let mut matrix = Matrix::IDENTITY;
        match (self.orientation, inverted) {
            (_, false) => {
                matrix.post_translate(
                    viewport.offset_left(),
                    viewport.chart_height() - viewport.offset_bottom(),
                );
            }
            (Orientation::Vertical, true) => {
                matrix = Matrix::translation(viewport.offset_left(), -viewport.offset_top());
                matrix.post_scale(1.0, -1.0);
            }
            (Orientation::Horizontal, true) => {
                matrix = Matrix::translation(
                    -(viewport.chart_width() - viewport.offset_right()),
                    viewport.chart_height() - viewport.offset_bottom(),
                );
                matrix.post_scale(-1.0, 1.0);
            }
        }
        self.matrix_offset = matrix;
    }

    /// Full data-to-pixel matrix for the current viewport, in matrix space
    /// (x/y already exchanged for horizontal charts).
    #[must_use]
    pub fn value_to_pixel_matrix(&self, viewport: &ViewportState) -> Matrix {
        self.matrix_offset
            .concat(&viewport.matrix_touch())
            .concat(&self.matrix_value_to_px)
    }

    /// Full pixel-to-data matrix. A singular forward mapping degrades to the
    /// identity.
    #[must_use]
    pub fn pixel_to_value_matrix(&self, viewport: &ViewportState) -> Matrix {
        self.value_to_pixel_matrix(viewport)
            .invert()
            .unwrap_or(Matrix::IDENTITY)
    }

    /// Maps interleaved data `(x, y)` pairs to pixels in place.
    pub fn point_values_to_pixel(&self, viewport: &ViewportState, points: &mut [f64]) {
        let matrix = self.value_to_pixel_matrix(viewport);
        self.map_data_buffer(&matrix, points);
    }

    /// Maps interleaved pixel pairs back to data `(x, y)` pairs in place.
    pub fn pixels_to_value(&self, viewport: &ViewportState, pixels: &mut [f64]) {
        let matrix = self.pixel_to_value_matrix(viewport);
        matrix.map_points(pixels);
        if self.orientation == Orientation::Horizontal {
            swap_pairs(pixels);
        }
    }

    /// Data point under the given pixel.
    #[must_use]
    pub fn values_by_touch_point(&self, viewport: &ViewportState, x: f64, y: f64) -> Point {
        let mapped = self.pixel_to_value_matrix(viewport).map_point(Point::new(x, y));
        self.from_matrix_space(mapped)
    }

    /// Pixel position of a single data point.
    #[must_use]
    pub fn pixel_for_values(&self, viewport: &ViewportState, x: f64, y: f64) -> Point {
        let matrix = self.value_to_pixel_matrix(viewport);
        matrix.map_point(self.to_matrix_space(Point::new(x, y)))
    }

    /// Maps a data-space rectangle (e.g. a bar body) to pixels. The result
    /// is sorted so `left <= right` and `top <= bottom`.
    #[must_use]
    pub fn rect_value_to_pixel(&self, viewport: &ViewportState, rect: ContentRect) -> ContentRect {
        let rect = match self.orientation {
            Orientation::Vertical => rect,
            Orientation::Horizontal => {
                ContentRect::from_edges(rect.top, rect.left, rect.bottom, rect.right)
            }
        };
        self.value_to_pixel_matrix(viewport).map_rect(rect)
    }

    /// Pixel buffer for a line data set between `from` and `to` (inclusive),
    /// revealing `trunc((to - from) * phase_x) + 1` entries.
    #[must_use]
    pub fn generate_transformed_values_line(
        &self,
        viewport: &ViewportState,
        data_set: &DataSet,
        phase_x: f64,
        phase_y: f64,
        from: usize,
        to: usize,
    ) -> Vec<f64> {
        let count = phased_count(from, to, phase_x);
        self.generate_with(viewport, data_set, from, count, |entry| {
            (entry.x, entry.y * phase_y)
        })
    }

    /// Pixel buffer for a scatter data set; same layout as the line buffer.
    #[must_use]
    pub fn generate_transformed_values_scatter(
        &self,
        viewport: &ViewportState,
        data_set: &DataSet,
        phase_x: f64,
        phase_y: f64,
        from: usize,
        to: usize,
    ) -> Vec<f64> {
        let count = phased_count(from, to, phase_x);
        self.generate_with(viewport, data_set, from, count, |entry| {
            (entry.x, entry.y * phase_y)
        })
    }

    /// Pixel buffer for a candle data set, keyed to each candle's high.
    #[must_use]
    pub fn generate_transformed_values_candle(
        &self,
        viewport: &ViewportState,
        data_set: &DataSet,
        phase_x: f64,
        phase_y: f64,
        from: usize,
        to: usize,
    ) -> Vec<f64> {
        let count = phased_count(from, to, phase_x);
        self.generate_with(viewport, data_set, from, count, |entry| {
            let high = match entry.payload {
                EntryPayload::Candle(ohlc) => ohlc.high,
                _ => entry.y,
            };
            (entry.x, high * phase_y)
        })
    }

    /// Pixel buffer for a bubble data set. Bubbles ignore the x phase.
    #[must_use]
    pub fn generate_transformed_values_bubble(
        &self,
        viewport: &ViewportState,
        data_set: &DataSet,
        phase_y: f64,
        from: usize,
        to: usize,
    ) -> Vec<f64> {
        let count = to.saturating_sub(from) + 1;
        self.generate_with(viewport, data_set, from, count, |entry| {
            (entry.x, entry.y * phase_y)
        })
    }

    fn generate_with<F>(
        &self,
        viewport: &ViewportState,
        data_set: &DataSet,
        from: usize,
        count: usize,
        value_of: F,
    ) -> Vec<f64>
    where
        F: Fn(&crate::core::entry::Entry) -> (f64, f64),
    {
        let entries = data_set.entries();
        let mut buffer = Vec::with_capacity(count * 2);
        for offset in 0..count {
            let (x, y) = entries
                .get(from + offset)
                .map_or((0.0, 0.0), |entry| value_of(entry));
            buffer.push(x);
            buffer.push(y);
        }
        self.point_values_to_pixel(viewport, &mut buffer);
        buffer
    }

    fn map_data_buffer(&self, matrix: &Matrix, points: &mut [f64]) {
        if self.orientation == Orientation::Horizontal {
            swap_pairs(points);
        }
        matrix.map_points(points);
    }

    fn to_matrix_space(&self, point: Point) -> Point {
        match self.orientation {
            Orientation::Vertical => point,
            Orientation::Horizontal => point.swapped(),
        }
    }

    fn from_matrix_space(&self, point: Point) -> Point {
        self.to_matrix_space(point)
    }
}

fn phased_count(from: usize, to: usize, phase_x: f64) -> usize {
    let span = to.saturating_sub(from) as f64;
    let phase = if phase_x.is_finite() { phase_x.max(0.0) } else { 0.0 };
    (span * phase) as usize + 1
}

fn safe_scale(extent: f64, range: f64) -> f64 {
    let scale = extent / range;
    if range == 0.0 || !scale.is_finite() || scale == 0.0 {
        1.0
    } else {
        scale
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn swap_pairs(points: &mut [f64]) {
    for pair in points.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
}
