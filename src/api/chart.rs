use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::{
    AxisDependency, AxisRange, ContentRect, DataSet, DefaultAxisValueFormatter, Orientation, Point,
    SeriesKind, SharedAxisValueFormatter, TickSet, ValueTransformer, ViewportState, VisibleBounds,
    VisibleRangeResolver,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    BarHighlighter, CartesianView, ChartHighlighter, CombinedHighlighter, Highlight, Highlighter,
    HorizontalBarHighlighter,
};

use super::axis_layout::{
    AxisLabels, AxisOffsets, AxisRole, EstimatingLabelMeasurer, LabelMeasurer, compute_axis,
    compute_offsets, visible_axis_bounds,
};
use super::chart_config::ChartConfig;

/// A Cartesian chart's coordinate state: viewport, one transformer per value
/// axis, the three axis ranges with their ticks, and the data.
///
/// Every mutation that changes what is visible re-runs the parts of the
/// layout pass it affects and raises the redraw flag, which the host polls
/// through [`CartesianChart::take_redraw_request`].
pub struct CartesianChart {
    config: ChartConfig,
    viewport: ViewportState,
    left_transformer: ValueTransformer,
    right_transformer: ValueTransformer,
    x_axis: AxisRange,
    left_axis: AxisRange,
    right_axis: AxisRange,
    x_ticks: TickSet,
    left_ticks: TickSet,
    right_ticks: TickSet,
    x_formatter: SharedAxisValueFormatter,
    left_formatter: SharedAxisValueFormatter,
    right_formatter: SharedAxisValueFormatter,
    measurer: Box<dyn LabelMeasurer + Send + Sync>,
    highlighter: Box<dyn Highlighter + Send + Sync>,
    custom_highlighter: bool,
    data_sets: Vec<DataSet>,
    phase_x: f64,
    phase_y: f64,
    redraw_requested: bool,
}

impl CartesianChart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let mut viewport =
            ViewportState::new(config.width, config.height).with_min_offset(config.min_offset);
        viewport.set_drag_offset_x(config.drag_offset_x);
        viewport.set_drag_offset_y(config.drag_offset_y);
        if let Some(max_scale) = config.max_scale_x {
            viewport.set_maximum_scale_x(max_scale);
        }
        if let Some(max_scale) = config.max_scale_y {
            viewport.set_maximum_scale_y(max_scale);
        }
        viewport.restrain_viewport(0.0, 0.0, 0.0, 0.0);

        let default_formatter: SharedAxisValueFormatter = Arc::new(DefaultAxisValueFormatter::default());
        let mut chart = Self {
            config,
            viewport,
            left_transformer: ValueTransformer::new(config.orientation),
            right_transformer: ValueTransformer::new(config.orientation),
            x_axis: config.x_axis.to_axis_range(),
            left_axis: config.left_axis.to_axis_range(),
            right_axis: config.right_axis.to_axis_range(),
            x_ticks: TickSet::empty(),
            left_ticks: TickSet::empty(),
            right_ticks: TickSet::empty(),
            x_formatter: Arc::clone(&default_formatter),
            left_formatter: Arc::clone(&default_formatter),
            right_formatter: default_formatter,
            measurer: Box::new(EstimatingLabelMeasurer::default()),
            highlighter: Box::new(ChartHighlighter),
            custom_highlighter: false,
            data_sets: Vec::new(),
            phase_x: 1.0,
            phase_y: 1.0,
            redraw_requested: false,
        };
        chart.notify_data_changed();

        debug!(
            width = config.width,
            height = config.height,
            orientation = ?config.orientation,
            "cartesian chart created"
        );
        Ok(chart)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    #[must_use]
    pub fn transformer(&self, axis: AxisDependency) -> &ValueTransformer {
        match axis {
            AxisDependency::Left => &self.left_transformer,
            AxisDependency::Right => &self.right_transformer,
        }
    }

    #[must_use]
    pub fn x_axis(&self) -> &AxisRange {
        &self.x_axis
    }

    #[must_use]
    pub fn axis(&self, axis: AxisDependency) -> &AxisRange {
        match axis {
            AxisDependency::Left => &self.left_axis,
            AxisDependency::Right => &self.right_axis,
        }
    }

    #[must_use]
    pub fn x_ticks(&self) -> &TickSet {
        &self.x_ticks
    }

    #[must_use]
    pub fn ticks(&self, axis: AxisDependency) -> &TickSet {
        match axis {
            AxisDependency::Left => &self.left_ticks,
            AxisDependency::Right => &self.right_ticks,
        }
    }

    /// Formatted labels of the x axis ticks.
    #[must_use]
    pub fn x_labels(&self) -> Vec<String> {
        self.x_ticks.labels(&*self.x_formatter)
    }

    /// Formatted labels of a value axis' ticks.
    #[must_use]
    pub fn labels(&self, axis: AxisDependency) -> Vec<String> {
        match axis {
            AxisDependency::Left => self.left_ticks.labels(&*self.left_formatter),
            AxisDependency::Right => self.right_ticks.labels(&*self.right_formatter),
        }
    }

    #[must_use]
    pub fn data_sets(&self) -> &[DataSet] {
        &self.data_sets
    }

    pub fn data_set(&self, index: usize) -> ChartResult<&DataSet> {
        self.data_sets
            .get(index)
            .ok_or(ChartError::DataSetIndexOutOfRange {
                index,
                len: self.data_sets.len(),
            })
    }

    #[must_use]
    pub fn phase(&self) -> (f64, f64) {
        (self.phase_x, self.phase_y)
    }

    /// Animation progress along x and y, each clamped to `0..=1`.
    pub fn set_phase(&mut self, phase_x: f64, phase_y: f64) {
        self.phase_x = clamp_unit(phase_x);
        self.phase_y = clamp_unit(phase_y);
        self.redraw_requested = true;
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    #[must_use]
    pub fn is_redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub fn set_x_formatter(&mut self, formatter: SharedAxisValueFormatter) {
        self.x_formatter = formatter;
        self.calculate_offsets();
    }

    pub fn set_formatter(&mut self, axis: AxisDependency, formatter: SharedAxisValueFormatter) {
        match axis {
            AxisDependency::Left => self.left_formatter = formatter,
            AxisDependency::Right => self.right_formatter = formatter,
        }
        self.calculate_offsets();
    }

    pub fn set_label_measurer(&mut self, measurer: Box<dyn LabelMeasurer + Send + Sync>) {
        self.measurer = measurer;
        self.calculate_offsets();
    }

    /// Replaces the kind-derived highlighter.
    pub fn set_highlighter(&mut self, highlighter: Box<dyn Highlighter + Send + Sync>) {
        self.highlighter = highlighter;
        self.custom_highlighter = true;
    }

    /// Resizes the chart, keeping offsets, and re-runs the layout pass.
    pub fn set_chart_dimens(&mut self, width: f64, height: f64) {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            warn!(width, height, "ignoring invalid chart dimensions");
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.viewport.set_chart_dimens(width, height);
        self.notify_data_changed();
    }

    /// Replaces all data sets and re-runs the layout pass.
    pub fn set_data(&mut self, data_sets: Vec<DataSet>) {
        debug!(count = data_sets.len(), "replacing chart data");
        self.data_sets = data_sets;
        self.notify_data_changed();
    }

    pub fn add_data_set(&mut self, data_set: DataSet) {
        debug!(label = data_set.label(), len = data_set.len(), "adding data set");
        self.data_sets.push(data_set);
        self.notify_data_changed();
    }

    pub fn remove_data_set(&mut self, index: usize) -> ChartResult<DataSet> {
        if index >= self.data_sets.len() {
            return Err(ChartError::DataSetIndexOutOfRange {
                index,
                len: self.data_sets.len(),
            });
        }
        let removed = self.data_sets.remove(index);
        self.notify_data_changed();
        Ok(removed)
    }

    /// Full layout pass: axis ranges from data, ticks, offsets, matrices.
    pub fn notify_data_changed(&mut self) {
        if !self.custom_highlighter {
            self.highlighter = default_highlighter(self.config.orientation, &self.data_sets);
        }
        self.calc_min_max();
        self.prepare_value_px_matrix();
        self.compute_axes();
        self.calculate_offsets();
        self.redraw_requested = true;

        debug!(
            data_sets = self.data_sets.len(),
            x_min = self.x_axis.minimum,
            x_max = self.x_axis.maximum,
            left_min = self.left_axis.minimum,
            left_max = self.left_axis.maximum,
            "layout pass complete"
        );
    }

    /// Derives the three axis ranges from the data. With auto-scaling on, the
    /// value axes only consider entries inside the visible x window.
    pub fn calc_min_max(&mut self) {
        let (x_min, x_max) = fold_extent(self.data_sets.iter().map(|set| (set.x_min(), set.x_max())));
        self.x_axis.calculate(x_min, x_max);

        let window = (self.config.auto_scale_min_max && !self.category_fully_zoomed_out())
            .then(|| (self.lowest_visible_x(), self.highest_visible_x()));

        let left = self.value_extent(AxisDependency::Left, window);
        let right = self.value_extent(AxisDependency::Right, window);
        let (left, right) = match (left, right) {
            (Some(left), Some(right)) => (left, right),
            (Some(left), None) => (left, left),
            (None, Some(right)) => (right, right),
            (None, None) => ((0.0, 0.0), (0.0, 0.0)),
        };

        self.left_axis.calculate_value_axis(left.0, left.1);
        self.right_axis.calculate_value_axis(right.0, right.1);
    }

    fn value_extent(&self, axis: AxisDependency, window: Option<(f64, f64)>) -> Option<(f64, f64)> {
        let extents = self
            .data_sets
            .iter()
            .filter(|set| set.axis_dependency() == axis && !set.is_empty())
            .filter_map(|set| match window {
                Some((from, to)) => set.y_extent_in_x_range(from, to),
                None => Some((set.y_min(), set.y_max())),
            })
            .collect::<Vec<_>>();
        if extents.is_empty() {
            return None;
        }
        Some(fold_extent(extents.into_iter()))
    }

    /// Plans ticks of all three axes for the current viewport.
    pub fn compute_axes(&mut self) {
        self.x_ticks = compute_axis(
            &mut self.x_axis,
            AxisRole::Category,
            &self.viewport,
            &self.left_transformer,
        );
        self.left_ticks = compute_axis(
            &mut self.left_axis,
            AxisRole::Value,
            &self.viewport,
            &self.left_transformer,
        );
        self.right_ticks = compute_axis(
            &mut self.right_axis,
            AxisRole::Value,
            &self.viewport,
            &self.right_transformer,
        );
        trace!(
            x = self.x_ticks.len(),
            left = self.left_ticks.len(),
            right = self.right_ticks.len(),
            "ticks planned"
        );
    }

    /// Reserves label space around the content rect, then rebuilds both
    /// transformers for the new content rect.
    pub fn calculate_offsets(&mut self) {
        let offsets = self.label_offsets();
        self.viewport
            .restrain_viewport(offsets.left, offsets.top, offsets.right, offsets.bottom);
        self.prepare_offset_matrix();
        self.prepare_value_px_matrix();
    }

    /// Offsets the current axis labels need, before the minimum offset
    /// applies.
    #[must_use]
    pub fn label_offsets(&self) -> AxisOffsets {
        let labels = AxisLabels {
            x: (&self.x_ticks, &*self.x_formatter),
            left: (&self.left_ticks, &*self.left_formatter),
            right: (&self.right_ticks, &*self.right_formatter),
        };
        compute_offsets(&self.config, labels, &*self.measurer)
    }

    pub fn prepare_offset_matrix(&mut self) {
        self.right_transformer
            .prepare_matrix_offset(&self.viewport, self.right_axis.inverted);
        self.left_transformer
            .prepare_matrix_offset(&self.viewport, self.left_axis.inverted);
    }

    pub fn prepare_value_px_matrix(&mut self) {
        self.right_transformer.prepare_matrix_value_px(
            &self.viewport,
            self.x_axis.minimum,
            self.x_axis.range,
            self.right_axis.range,
            self.right_axis.minimum,
        );
        self.left_transformer.prepare_matrix_value_px(
            &self.viewport,
            self.x_axis.minimum,
            self.x_axis.range,
            self.left_axis.range,
            self.left_axis.minimum,
        );
    }

    /// Smallest data x inside the content rect, never below the x axis
    /// minimum.
    #[must_use]
    pub fn lowest_visible_x(&self) -> f64 {
        let (low, _) = visible_axis_bounds(AxisRole::Category, &self.viewport, &self.left_transformer);
        low.max(self.x_axis.minimum)
    }

    /// Largest data x inside the content rect, never above the x axis
    /// maximum.
    #[must_use]
    pub fn highest_visible_x(&self) -> f64 {
        let (_, high) =
            visible_axis_bounds(AxisRole::Category, &self.viewport, &self.left_transformer);
        high.min(self.x_axis.maximum)
    }

    #[must_use]
    pub fn visible_x_range(&self) -> f64 {
        (self.highest_visible_x() - self.lowest_visible_x()).abs()
    }

    /// Index window of a data set inside the visible x range.
    pub fn visible_bounds(&self, data_set_index: usize) -> ChartResult<VisibleBounds> {
        let data_set = self.data_set(data_set_index)?;
        let resolver =
            VisibleRangeResolver::new(self.lowest_visible_x(), self.highest_visible_x(), self.phase_x);
        Ok(resolver.compute_bounds(data_set))
    }

    /// Pixel buffer of the visible part of a data set, laid out for its
    /// series kind.
    pub fn transformed_values(&self, data_set_index: usize) -> ChartResult<Vec<f64>> {
        let bounds = self.visible_bounds(data_set_index)?;
        let data_set = self.data_set(data_set_index)?;
        let transformer = self.transformer(data_set.axis_dependency());
        let viewport = &self.viewport;

        let values = match data_set.kind() {
            SeriesKind::Line | SeriesKind::Bar => transformer.generate_transformed_values_line(
                viewport,
                data_set,
                self.phase_x,
                self.phase_y,
                bounds.min,
                bounds.max,
            ),
            SeriesKind::Scatter => transformer.generate_transformed_values_scatter(
                viewport,
                data_set,
                self.phase_x,
                self.phase_y,
                bounds.min,
                bounds.max,
            ),
            SeriesKind::Candle => transformer.generate_transformed_values_candle(
                viewport,
                data_set,
                self.phase_x,
                self.phase_y,
                bounds.min,
                bounds.max,
            ),
            SeriesKind::Bubble => transformer.generate_transformed_values_bubble(
                viewport,
                data_set,
                self.phase_y,
                bounds.min,
                bounds.max,
            ),
        };
        Ok(values)
    }

    /// Pixel rectangles of the visible bars of a data set, each `bar_width`
    /// wide in data x units and rising from zero.
    pub fn bar_rects(&self, data_set_index: usize, bar_width: f64) -> ChartResult<Vec<ContentRect>> {
        let bounds = self.visible_bounds(data_set_index)?;
        let data_set = self.data_set(data_set_index)?;
        let transformer = self.transformer(data_set.axis_dependency());
        let half = bar_width / 2.0;

        Ok(data_set
            .entries()
            .iter()
            .skip(bounds.min)
            .take(bounds.range + 1)
            .map(|entry| {
                let value = entry.y * self.phase_y;
                let rect = ContentRect::from_edges(
                    entry.x - half,
                    value.max(0.0),
                    entry.x + half,
                    value.min(0.0),
                );
                transformer.rect_value_to_pixel(&self.viewport, rect)
            })
            .collect())
    }

    /// Data values under a pixel, read through the given axis.
    #[must_use]
    pub fn values_by_touch_point(&self, x: f64, y: f64, axis: AxisDependency) -> Point {
        self.transformer(axis)
            .values_by_touch_point(&self.viewport, x, y)
    }

    #[must_use]
    pub fn pixel_for_values(&self, x: f64, y: f64, axis: AxisDependency) -> Point {
        self.transformer(axis).pixel_for_values(&self.viewport, x, y)
    }

    /// Entry under a touch point, if any lies within the maximum highlight
    /// distance.
    #[must_use]
    pub fn highlight_by_touch_point(&self, x: f64, y: f64) -> Option<Highlight> {
        if self.data_sets.is_empty() {
            trace!("highlight requested without data");
            return None;
        }
        let view = CartesianView::new(
            &self.data_sets,
            &self.viewport,
            &self.left_transformer,
            &self.right_transformer,
        )
        .with_max_highlight_distance(self.config.max_highlight_distance);
        self.highlighter.highlight(&view, x, y)
    }

    /// Zooms by the given factors about a pixel position.
    pub fn zoom_at_pixel(&mut self, scale_x: f64, scale_y: f64, pixel: Point) {
        let pivot = self.viewport.touch_pivot(pixel, self.left_axis.inverted);
        self.viewport.zoom(scale_x, scale_y, pivot.x, pivot.y);
        self.after_viewport_change();
    }

    /// Zooms in by 1.4 about the content center.
    pub fn zoom_in(&mut self) {
        let pivot = self
            .viewport
            .touch_pivot(self.viewport.content_center(), self.left_axis.inverted);
        self.viewport.zoom_in(pivot.x, pivot.y);
        self.after_viewport_change();
    }

    /// Zooms out by 0.7 about the content center.
    pub fn zoom_out(&mut self) {
        let pivot = self
            .viewport
            .touch_pivot(self.viewport.content_center(), self.left_axis.inverted);
        self.viewport.zoom_out(pivot.x, pivot.y);
        self.after_viewport_change();
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
        self.after_viewport_change();
    }

    pub fn fit_screen(&mut self) {
        self.viewport.fit_screen();
        self.after_viewport_change();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.after_viewport_change();
    }

    /// Scrolls so that data x lands on the content edge where the category
    /// axis starts: the left edge, or the bottom edge of horizontal charts.
    pub fn move_view_to_x(&mut self, x: f64) {
        let pixel = self.pixel_for_values(x, 0.0, AxisDependency::Left);
        match self.config.orientation {
            Orientation::Vertical => {
                self.viewport
                    .translate_to(Point::new(pixel.x, self.viewport.content_top()));
            }
            Orientation::Horizontal => {
                let dy = self.viewport.content_bottom() - pixel.y;
                self.viewport.pan_by(0.0, dy);
            }
        }
        self.after_viewport_change();
    }

    /// Scrolls so that the data point lands on the content center.
    pub fn centre_view_to(&mut self, x: f64, y: f64, axis: AxisDependency) {
        let pixel = self.pixel_for_values(x, y, axis);
        let redraw = &mut self.redraw_requested;
        self.viewport.center_view_port(pixel, || *redraw = true);
        self.after_viewport_change();
    }

    /// Limits zoom-out so at most `max_x_range` data units are visible.
    pub fn set_visible_x_range_maximum(&mut self, max_x_range: f64) {
        let Some(scale) = range_scale(self.x_axis.range, max_x_range) else {
            warn!(max_x_range, "ignoring non-positive visible x range");
            return;
        };
        match self.config.orientation {
            Orientation::Vertical => self.viewport.set_minimum_scale_x(scale),
            Orientation::Horizontal => self.viewport.set_minimum_scale_y(scale),
        }
        self.after_viewport_change();
    }

    /// Limits zoom-in so at least `min_x_range` data units stay visible.
    pub fn set_visible_x_range_minimum(&mut self, min_x_range: f64) {
        let Some(scale) = range_scale(self.x_axis.range, min_x_range) else {
            warn!(min_x_range, "ignoring non-positive visible x range");
            return;
        };
        match self.config.orientation {
            Orientation::Vertical => self.viewport.set_maximum_scale_x(scale),
            Orientation::Horizontal => self.viewport.set_maximum_scale_y(scale),
        }
        self.after_viewport_change();
    }

    pub fn set_visible_x_range(&mut self, min_x_range: f64, max_x_range: f64) {
        let (Some(max_scale), Some(min_scale)) = (
            range_scale(self.x_axis.range, min_x_range),
            range_scale(self.x_axis.range, max_x_range),
        ) else {
            warn!(min_x_range, max_x_range, "ignoring non-positive visible x range");
            return;
        };
        match self.config.orientation {
            Orientation::Vertical => self.viewport.set_min_max_scale_x(min_scale, max_scale),
            Orientation::Horizontal => self.viewport.set_min_max_scale_y(min_scale, max_scale),
        }
        self.after_viewport_change();
    }

    /// Limits zoom-out on the value axis so at most `max_y_range` units of
    /// `axis` are visible.
    pub fn set_visible_y_range_maximum(&mut self, max_y_range: f64, axis: AxisDependency) {
        let Some(scale) = range_scale(self.axis(axis).range, max_y_range) else {
            warn!(max_y_range, "ignoring non-positive visible y range");
            return;
        };
        match self.config.orientation {
            Orientation::Vertical => self.viewport.set_minimum_scale_y(scale),
            Orientation::Horizontal => self.viewport.set_minimum_scale_x(scale),
        }
        self.after_viewport_change();
    }

    pub fn set_visible_y_range_minimum(&mut self, min_y_range: f64, axis: AxisDependency) {
        let Some(scale) = range_scale(self.axis(axis).range, min_y_range) else {
            warn!(min_y_range, "ignoring non-positive visible y range");
            return;
        };
        match self.config.orientation {
            Orientation::Vertical => self.viewport.set_maximum_scale_y(scale),
            Orientation::Horizontal => self.viewport.set_maximum_scale_x(scale),
        }
        self.after_viewport_change();
    }

    /// `true` when the whole category axis is visible.
    fn category_fully_zoomed_out(&self) -> bool {
        match self.config.orientation {
            Orientation::Vertical => self.viewport.is_fully_zoomed_out_x(),
            Orientation::Horizontal => self.viewport.is_fully_zoomed_out_y(),
        }
    }

    fn after_viewport_change(&mut self) {
        if self.config.auto_scale_min_max {
            self.calc_min_max();
            self.prepare_value_px_matrix();
            self.compute_axes();
            self.calculate_offsets();
        } else {
            self.compute_axes();
            self.prepare_value_px_matrix();
        }
        self.redraw_requested = true;
    }
}

fn default_highlighter(
    orientation: Orientation,
    data_sets: &[DataSet],
) -> Box<dyn Highlighter + Send + Sync> {
    let mut kinds = data_sets.iter().map(DataSet::kind);
    let Some(first) = kinds.next() else {
        return Box::new(ChartHighlighter);
    };
    if kinds.any(|kind| kind != first) {
        return Box::new(CombinedHighlighter);
    }
    match (first, orientation) {
        (SeriesKind::Bar, Orientation::Vertical) => Box::new(BarHighlighter),
        (SeriesKind::Bar, Orientation::Horizontal) => Box::new(HorizontalBarHighlighter),
        _ => Box::new(ChartHighlighter),
    }
}

fn fold_extent<I>(extents: I) -> (f64, f64)
where
    I: Iterator<Item = (f64, f64)>,
{
    let (min, max) = extents.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (min, max)| {
        (lo.min(min), hi.max(max))
    });
    if min > max { (0.0, 0.0) } else { (min, max) }
}

fn range_scale(axis_range: f64, visible_range: f64) -> Option<f64> {
    if !visible_range.is_finite() || visible_range <= 0.0 {
        return None;
    }
    Some(axis_range / visible_range)
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
