use serde::{Deserialize, Serialize};

use crate::core::matrix::Matrix;
use crate::core::types::{ContentRect, Point};

/// Smallest offset `restrain_viewport` accepts on any side, in pixels.
pub const DEFAULT_MIN_OFFSET_PX: f64 = 10.0;

const ZOOM_IN_FACTOR: f64 = 1.4;
const ZOOM_OUT_FACTOR: f64 = 0.7;

/// Content rectangle plus the zoom/pan ("touch") matrix of one chart.
///
/// This is the single owner of scale and translation. Transformers and
/// renderers read it; gesture and animation drivers mutate it through the
/// methods below, which always re-apply the scale and translation limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    matrix_touch: Matrix,
    content_rect: ContentRect,
    chart_width: f64,
    chart_height: f64,
    min_scale_x: f64,
    max_scale_x: f64,
    min_scale_y: f64,
    max_scale_y: f64,
    scale_x: f64,
    scale_y: f64,
    trans_x: f64,
    trans_y: f64,
    drag_offset_x: f64,
    drag_offset_y: f64,
    min_offset: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            matrix_touch: Matrix::IDENTITY,
            content_rect: ContentRect::default(),
            chart_width: 0.0,
            chart_height: 0.0,
            min_scale_x: 1.0,
            max_scale_x: f64::MAX,
            min_scale_y: 1.0,
            max_scale_y: f64::MAX,
            scale_x: 1.0,
            scale_y: 1.0,
            trans_x: 0.0,
            trans_y: 0.0,
            drag_offset_x: 0.0,
            drag_offset_y: 0.0,
            min_offset: DEFAULT_MIN_OFFSET_PX,
        }
    }
}

impl ViewportState {
    #[must_use]
    pub fn new(chart_width: f64, chart_height: f64) -> Self {
        let mut state = Self::default();
        state.set_chart_dimens(chart_width, chart_height);
        state
    }

    #[must_use]
    pub fn with_min_offset(mut self, min_offset: f64) -> Self {
        self.min_offset = if min_offset.is_finite() {
            min_offset.max(0.0)
        } else {
            DEFAULT_MIN_OFFSET_PX
        };
        self
    }

    /// Sets the full chart size while keeping the current offsets.
    pub fn set_chart_dimens(&mut self, width: f64, height: f64) {
        let offset_left = self.offset_left();
        let offset_top = self.offset_top();
        let offset_right = self.offset_right();
        let offset_bottom = self.offset_bottom();

        self.chart_width = width;
        self.chart_height = height;
        self.restrain_viewport(offset_left, offset_top, offset_right, offset_bottom);
    }

    #[must_use]
    pub fn has_chart_dimens(&self) -> bool {
        self.chart_width > 0.0 && self.chart_height > 0.0
    }

    /// Replaces the content rect as-is.
    ///
    /// `left <= right` and `top <= bottom` are the caller's responsibility.
    pub fn set_content_rect(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.content_rect = ContentRect::from_edges(left, top, right, bottom);
    }

    /// Positions the content rect inside the chart from the space reserved
    /// for axes and legend. Every offset is raised to at least `min_offset`.
    pub fn restrain_viewport(
        &mut self,
        offset_left: f64,
        offset_top: f64,
        offset_right: f64,
        offset_bottom: f64,
    ) {
        let left = self.clamp_offset(offset_left);
        let top = self.clamp_offset(offset_top);
        let right = self.clamp_offset(offset_right);
        let bottom = self.clamp_offset(offset_bottom);
        self.content_rect = ContentRect::from_edges(
            left,
            top,
            self.chart_width - right,
            self.chart_height - bottom,
        );
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.max(self.min_offset)
        } else {
            self.min_offset
        }
    }

    #[must_use]
    pub fn min_offset(&self) -> f64 {
        self.min_offset
    }

    #[must_use]
    pub fn offset_left(&self) -> f64 {
        self.content_rect.left
    }

    #[must_use]
    pub fn offset_right(&self) -> f64 {
        self.chart_width - self.content_rect.right
    }

    #[must_use]
    pub fn offset_top(&self) -> f64 {
        self.content_rect.top
    }

    #[must_use]
    pub fn offset_bottom(&self) -> f64 {
        self.chart_height - self.content_rect.bottom
    }

    #[must_use]
    pub fn content_rect(&self) -> ContentRect {
        self.content_rect
    }

    #[must_use]
    pub fn content_left(&self) -> f64 {
        self.content_rect.left
    }

    #[must_use]
    pub fn content_right(&self) -> f64 {
        self.content_rect.right
    }

    #[must_use]
    pub fn content_top(&self) -> f64 {
        self.content_rect.top
    }

    #[must_use]
    pub fn content_bottom(&self) -> f64 {
        self.content_rect.bottom
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.content_rect.width()
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_rect.height()
    }

    #[must_use]
    pub fn content_center(&self) -> Point {
        self.content_rect.center()
    }

    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.chart_width
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.chart_height
    }

    #[must_use]
    pub fn matrix_touch(&self) -> Matrix {
        self.matrix_touch
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    #[must_use]
    pub fn trans_x(&self) -> f64 {
        self.trans_x
    }

    #[must_use]
    pub fn trans_y(&self) -> f64 {
        self.trans_y
    }

    #[must_use]
    pub fn min_scale_x(&self) -> f64 {
        self.min_scale_x
    }

    #[must_use]
    pub fn max_scale_x(&self) -> f64 {
        self.max_scale_x
    }

    #[must_use]
    pub fn min_scale_y(&self) -> f64 {
        self.min_scale_y
    }

    #[must_use]
    pub fn max_scale_y(&self) -> f64 {
        self.max_scale_y
    }

    /// Installs `matrix` as the touch matrix after clamping its scale and
    /// translation, and returns the matrix actually installed.
    pub fn refresh(&mut self, matrix: Matrix) -> Matrix {
        self.matrix_touch = matrix;
        self.limit_trans_and_scale();
        self.matrix_touch
    }

    fn limit_trans_and_scale(&mut self) {
        let cur_scale_x = self.matrix_touch.scale_x;
        let cur_scale_y = self.matrix_touch.scale_y;
        let cur_trans_x = self.matrix_touch.trans_x;
        let cur_trans_y = self.matrix_touch.trans_y;

        self.scale_x = clamp_scale(cur_scale_x, self.min_scale_x, self.max_scale_x);
        self.scale_y = clamp_scale(cur_scale_y, self.min_scale_y, self.max_scale_y);

        let width = self.content_rect.width();
        let height = self.content_rect.height();

        let max_trans_x = -width * (self.scale_x - 1.0);
        self.trans_x = finite_or(cur_trans_x, 0.0)
            .max(max_trans_x - self.drag_offset_x)
            .min(self.drag_offset_x);

        let max_trans_y = height * (self.scale_y - 1.0);
        self.trans_y = finite_or(cur_trans_y, 0.0)
            .min(max_trans_y + self.drag_offset_y)
            .max(-self.drag_offset_y);

        self.matrix_touch.scale_x = self.scale_x;
        self.matrix_touch.scale_y = self.scale_y;
        self.matrix_touch.trans_x = self.trans_x;
        self.matrix_touch.trans_y = self.trans_y;
    }

    /// Converts a pixel position into the space the touch matrix operates in:
    /// origin at the content rect's bottom-left corner (top-left when the
    /// value axis is inverted), y growing upward.
    #[must_use]
    pub fn touch_pivot(&self, pixel: Point, inverted: bool) -> Point {
        let x = pixel.x - self.offset_left();
        let y = if inverted {
            -(pixel.y - self.offset_top())
        } else {
            -(self.chart_height - pixel.y - self.offset_bottom())
        };
        Point::new(x, y)
    }

    /// Zooms by the given factors about the pivot `(x, y)`, expressed in
    /// touch space (see [`ViewportState::touch_pivot`]).
    pub fn zoom(&mut self, scale_x: f64, scale_y: f64, x: f64, y: f64) -> Matrix {
        let mut matrix = self.matrix_touch;
        matrix.post_scale_about(scale_x, scale_y, x, y);
        self.refresh(matrix)
    }

    pub fn zoom_in(&mut self, x: f64, y: f64) -> Matrix {
        self.zoom(ZOOM_IN_FACTOR, ZOOM_IN_FACTOR, x, y)
    }

    pub fn zoom_out(&mut self, x: f64, y: f64) -> Matrix {
        self.zoom(ZOOM_OUT_FACTOR, ZOOM_OUT_FACTOR, x, y)
    }

    /// Sets absolute zoom factors, keeping the current translation where the
    /// limits allow it.
    pub fn set_zoom(&mut self, scale_x: f64, scale_y: f64) -> Matrix {
        let mut matrix = self.matrix_touch;
        matrix.scale_x = scale_x;
        matrix.scale_y = scale_y;
        self.refresh(matrix)
    }

    pub fn reset_zoom(&mut self) -> Matrix {
        self.refresh(Matrix::IDENTITY)
    }

    /// Resets zoom and translation and lowers the minimum scales back to 1.
    pub fn fit_screen(&mut self) -> Matrix {
        self.min_scale_x = 1.0;
        self.min_scale_y = 1.0;
        let mut matrix = self.matrix_touch;
        matrix.scale_x = 1.0;
        matrix.trans_x = 0.0;
        matrix.scale_y = 1.0;
        matrix.trans_y = 0.0;
        self.refresh(matrix)
    }

    /// Translates so the given pixel point ends up on the content rect's
    /// top-left corner.
    pub fn translate_to(&mut self, pixel: Point) -> Matrix {
        let dx = pixel.x - self.offset_left();
        let dy = pixel.y - self.offset_top();
        let mut matrix = self.matrix_touch;
        matrix.post_translate(-dx, -dy);
        self.refresh(matrix)
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Matrix {
        let mut matrix = self.matrix_touch;
        matrix.post_translate(dx, dy);
        self.refresh(matrix)
    }

    /// Translates so the given pixel point becomes the center of the content
    /// rect, then asks the owner to redraw.
    pub fn center_view_port<F>(&mut self, pixel: Point, request_redraw: F) -> Matrix
    where
        F: FnOnce(),
    {
        let center = self.content_center();
        let mut matrix = self.matrix_touch;
        matrix.post_translate(center.x - pixel.x, center.y - pixel.y);
        let installed = self.refresh(matrix);
        request_redraw();
        installed
    }

    pub fn set_min_max_scale_x(&mut self, min_scale: f64, max_scale: f64) {
        self.min_scale_x = normalize_min_scale(min_scale);
        self.max_scale_x = normalize_max_scale(max_scale);
        self.limit_trans_and_scale();
    }

    pub fn set_min_max_scale_y(&mut self, min_scale: f64, max_scale: f64) {
        self.min_scale_y = normalize_min_scale(min_scale);
        self.max_scale_y = normalize_max_scale(max_scale);
        self.limit_trans_and_scale();
    }

    pub fn set_minimum_scale_x(&mut self, min_scale: f64) {
        self.min_scale_x = normalize_min_scale(min_scale);
        self.limit_trans_and_scale();
    }

    pub fn set_maximum_scale_x(&mut self, max_scale: f64) {
        self.max_scale_x = normalize_max_scale(max_scale);
        self.limit_trans_and_scale();
    }

    pub fn set_minimum_scale_y(&mut self, min_scale: f64) {
        self.min_scale_y = normalize_min_scale(min_scale);
        self.limit_trans_and_scale();
    }

    pub fn set_maximum_scale_y(&mut self, max_scale: f64) {
        self.max_scale_y = normalize_max_scale(max_scale);
        self.limit_trans_and_scale();
    }

    /// Allowed over-scroll beyond the content edges, in pixels.
    pub fn set_drag_offset_x(&mut self, offset: f64) {
        self.drag_offset_x = finite_or(offset, 0.0).max(0.0);
    }

    pub fn set_drag_offset_y(&mut self, offset: f64) {
        self.drag_offset_y = finite_or(offset, 0.0).max(0.0);
    }

    #[must_use]
    pub fn has_no_drag_offset(&self) -> bool {
        self.drag_offset_x <= 0.0 && self.drag_offset_y <= 0.0
    }

    /// `true` when the whole x range is visible.
    #[must_use]
    pub fn is_fully_zoomed_out_x(&self) -> bool {
        !(self.scale_x > self.min_scale_x || self.min_scale_x > 1.0)
    }

    #[must_use]
    pub fn is_fully_zoomed_out_y(&self) -> bool {
        !(self.scale_y > self.min_scale_y || self.min_scale_y > 1.0)
    }

    #[must_use]
    pub fn is_fully_zoomed_out(&self) -> bool {
        self.is_fully_zoomed_out_x() && self.is_fully_zoomed_out_y()
    }

    #[must_use]
    pub fn can_zoom_out_more_x(&self) -> bool {
        self.scale_x > self.min_scale_x
    }

    #[must_use]
    pub fn can_zoom_in_more_x(&self) -> bool {
        self.scale_x < self.max_scale_x
    }

    #[must_use]
    pub fn can_zoom_out_more_y(&self) -> bool {
        self.scale_y > self.min_scale_y
    }

    #[must_use]
    pub fn can_zoom_in_more_y(&self) -> bool {
        self.scale_y < self.max_scale_y
    }

    #[must_use]
    pub fn is_in_bounds_left(&self, x: f64) -> bool {
        self.content_rect.left <= x + 1.0
    }

    #[must_use]
    pub fn is_in_bounds_right(&self, x: f64) -> bool {
        let x = round_to_hundredths(x);
        self.content_rect.right >= x - 1.0
    }

    #[must_use]
    pub fn is_in_bounds_top(&self, y: f64) -> bool {
        self.content_rect.top <= y
    }

    #[must_use]
    pub fn is_in_bounds_bottom(&self, y: f64) -> bool {
        let y = round_to_hundredths(y);
        self.content_rect.bottom >= y
    }

    #[must_use]
    pub fn is_in_bounds_x(&self, x: f64) -> bool {
        self.is_in_bounds_left(x) && self.is_in_bounds_right(x)
    }

    #[must_use]
    pub fn is_in_bounds_y(&self, y: f64) -> bool {
        self.is_in_bounds_top(y) && self.is_in_bounds_bottom(y)
    }

    #[must_use]
    pub fn is_in_bounds(&self, x: f64, y: f64) -> bool {
        self.is_in_bounds_x(x) && self.is_in_bounds_y(y)
    }
}

fn clamp_scale(current: f64, min: f64, max: f64) -> f64 {
    finite_or(current, min).max(min).min(max)
}

fn normalize_min_scale(scale: f64) -> f64 {
    if scale.is_finite() { scale.max(1.0) } else { 1.0 }
}

fn normalize_max_scale(scale: f64) -> f64 {
    if scale == 0.0 || !scale.is_finite() || scale < 0.0 {
        f64::MAX
    } else {
        scale
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}
