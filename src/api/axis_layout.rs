use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    AxisRange, AxisTickPlanner, AxisValueFormatter, Orientation, Point, TickSet, ValueTransformer,
    ViewportState,
};

use super::chart_config::{AxisConfig, ChartConfig, XAxisPosition, YAxisLabelPosition};

/// Width/height of a text label in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

/// Text measurement seam; hosts plug in their font backend here.
pub trait LabelMeasurer {
    fn measure(&self, text: &str) -> LabelSize;
}

/// Backend-independent measurer based on per-glyph width estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatingLabelMeasurer {
    pub font_size_px: f64,
}

impl Default for EstimatingLabelMeasurer {
    fn default() -> Self {
        Self { font_size_px: 12.0 }
    }
}

impl LabelMeasurer for EstimatingLabelMeasurer {
    fn measure(&self, text: &str) -> LabelSize {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        LabelSize {
            width: units * self.font_size_px,
            height: self.font_size_px,
        }
    }
}

/// Bounding box of a `size` label rotated by `degrees`.
#[must_use]
pub fn rotated_label_size(size: LabelSize, degrees: f64) -> LabelSize {
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    LabelSize {
        width: (size.width * cos).abs() + (size.height * sin).abs(),
        height: (size.width * sin).abs() + (size.height * cos).abs(),
    }
}

/// Longest formatted tick label by character count.
#[must_use]
pub fn longest_label(ticks: &TickSet, formatter: &dyn AxisValueFormatter) -> String {
    ticks
        .labels(formatter)
        .into_iter()
        .max_by_key(|label| label.chars().count())
        .unwrap_or_default()
}

/// Horizontal space a value axis reserves beside the content rect.
#[must_use]
pub fn required_width_space(
    config: &AxisConfig,
    ticks: &TickSet,
    formatter: &dyn AxisValueFormatter,
    measurer: &dyn LabelMeasurer,
) -> f64 {
    let label = longest_label(ticks, formatter);
    let mut width = measurer.measure(&label).width + config.x_offset * 2.0;
    if config.max_width > 0.0 {
        width = width.min(config.max_width);
    }
    width.max(config.min_width)
}

/// Vertical space a value axis reserves above or below the content rect.
#[must_use]
pub fn required_height_space(
    config: &AxisConfig,
    ticks: &TickSet,
    formatter: &dyn AxisValueFormatter,
    measurer: &dyn LabelMeasurer,
) -> f64 {
    let label = longest_label(ticks, formatter);
    measurer.measure(&label).height + config.y_offset * 2.0
}

/// Rotated size of the category axis' largest label.
#[must_use]
pub fn category_label_size(
    config: &AxisConfig,
    ticks: &TickSet,
    formatter: &dyn AxisValueFormatter,
    measurer: &dyn LabelMeasurer,
) -> LabelSize {
    let label = longest_label(ticks, formatter);
    let size = LabelSize {
        width: measurer.measure(&label).width,
        height: measurer.measure("Q").height,
    };
    let rotated = rotated_label_size(size, config.label_rotation_degrees);
    LabelSize {
        width: rotated.width.round(),
        height: rotated.height.round(),
    }
}

/// Pixel offsets reserved around the content rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisOffsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Tick sets and formatters of the three axes, as read by offset layout.
#[derive(Clone, Copy)]
pub struct AxisLabels<'a> {
    pub x: (&'a TickSet, &'a dyn AxisValueFormatter),
    pub left: (&'a TickSet, &'a dyn AxisValueFormatter),
    pub right: (&'a TickSet, &'a dyn AxisValueFormatter),
}

/// Offsets the axis labels need. The viewport raises each to its minimum
/// offset afterwards.
#[must_use]
pub fn compute_offsets(
    config: &ChartConfig,
    labels: AxisLabels<'_>,
    measurer: &dyn LabelMeasurer,
) -> AxisOffsets {
    let mut offsets = AxisOffsets::default();
    let value_needs_offset = |axis: &AxisConfig| {
        axis.enabled
            && axis.draw_labels
            && config.y_label_position == YAxisLabelPosition::OutsideChart
    };

    match config.orientation {
        Orientation::Vertical => {
            if value_needs_offset(&config.left_axis) {
                offsets.left +=
                    required_width_space(&config.left_axis, labels.left.0, labels.left.1, measurer);
            }
            if value_needs_offset(&config.right_axis) {
                offsets.right += required_width_space(
                    &config.right_axis,
                    labels.right.0,
                    labels.right.1,
                    measurer,
                );
            }
            if config.x_axis.enabled && config.x_axis.draw_labels {
                let size = category_label_size(&config.x_axis, labels.x.0, labels.x.1, measurer);
                let height = size.height + config.x_axis.y_offset;
                match config.x_axis_position {
                    XAxisPosition::Bottom => offsets.bottom += height,
                    XAxisPosition::Top => offsets.top += height,
                    XAxisPosition::BothSided => {
                        offsets.bottom += height;
                        offsets.top += height;
                    }
                    XAxisPosition::TopInside | XAxisPosition::BottomInside => {}
                }
            }
        }
        Orientation::Horizontal => {
            // Value axes run along the top/bottom edges, categories along the sides.
            if value_needs_offset(&config.left_axis) {
                offsets.top +=
                    required_height_space(&config.left_axis, labels.left.0, labels.left.1, measurer);
            }
            if value_needs_offset(&config.right_axis) {
                offsets.bottom += required_height_space(
                    &config.right_axis,
                    labels.right.0,
                    labels.right.1,
                    measurer,
                );
            }
            if config.x_axis.enabled && config.x_axis.draw_labels {
                let size = category_label_size(&config.x_axis, labels.x.0, labels.x.1, measurer);
                let width = size.width + config.x_axis.x_offset;
                match config.x_axis_position {
                    XAxisPosition::Bottom => offsets.left += width,
                    XAxisPosition::Top => offsets.right += width,
                    XAxisPosition::BothSided => {
                        offsets.left += width;
                        offsets.right += width;
                    }
                    XAxisPosition::TopInside | XAxisPosition::BottomInside => {}
                }
            }
        }
    }

    trace!(?offsets, "axis label offsets");
    offsets
}

/// Which data coordinate an axis carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisRole {
    /// Data x.
    Category,
    /// Data y.
    Value,
}

/// Data range currently visible along an axis, read by inverse-transforming
/// the content rect edges the axis runs along.
#[must_use]
pub fn visible_axis_bounds(
    role: AxisRole,
    viewport: &ViewportState,
    transformer: &ValueTransformer,
) -> (f64, f64) {
    let left = viewport.content_left();
    let right = viewport.content_right();
    let top = viewport.content_top();
    let bottom = viewport.content_bottom();

    let runs_horizontally = runs_horizontally(role, transformer.orientation());
    let (first, second) = if runs_horizontally {
        (Point::new(left, top), Point::new(right, top))
    } else {
        (Point::new(left, bottom), Point::new(left, top))
    };

    let first = transformer.values_by_touch_point(viewport, first.x, first.y);
    let second = transformer.values_by_touch_point(viewport, second.x, second.y);
    let (a, b) = match role {
        AxisRole::Category => (first.x, second.x),
        AxisRole::Value => (first.y, second.y),
    };
    (a.min(b), a.max(b))
}

/// Plans the ticks of one axis for the current viewport.
///
/// While the viewport is zoomed in along the axis, ticks cover only the
/// visible window and are planned on a copy so the stored range stays the
/// full data range. Otherwise the stored range is snapped onto the ticks.
pub fn compute_axis(
    axis: &mut AxisRange,
    role: AxisRole,
    viewport: &ViewportState,
    transformer: &ValueTransformer,
) -> TickSet {
    let zoomed_out = if runs_horizontally(role, transformer.orientation()) {
        viewport.is_fully_zoomed_out_x()
    } else {
        viewport.is_fully_zoomed_out_y()
    };

    if viewport.content_width() > 10.0 && !zoomed_out {
        let (min, max) = visible_axis_bounds(role, viewport, transformer);
        let mut window = *axis;
        window.set_bounds(min, max);
        return AxisTickPlanner::plan(&mut window);
    }

    AxisTickPlanner::plan(axis)
}

fn runs_horizontally(role: AxisRole, orientation: Orientation) -> bool {
    matches!(
        (role, orientation),
        (AxisRole::Category, Orientation::Vertical) | (AxisRole::Value, Orientation::Horizontal)
    )
}
