use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{AxisDependency, DataSet, Orientation, Point, Rounding};

use super::{CartesianView, Highlight, Highlighter};

/// Default highlighter for Cartesian charts: nearest x first, then the
/// closest candidate on screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartHighlighter;

impl Highlighter for ChartHighlighter {
    fn highlight(&self, view: &CartesianView<'_>, x: f64, y: f64) -> Option<Highlight> {
        let x_value = touch_x_value(view, x, y);
        let candidates = collect_highlights(view, 0..view.data_sets.len(), x_value, Rounding::Closest);
        select_closest(view, &candidates, x, y, view.orientation())
    }
}

/// Data x under the touch, read through the left axis transformer.
pub(super) fn touch_x_value(view: &CartesianView<'_>, x: f64, y: f64) -> f64 {
    view.left.values_by_touch_point(view.viewport, x, y).x
}

/// Highlights for every entry of `data_set` at `x_value`. Without an exact
/// match, the entries at the x of the entry found by `rounding` are used.
#[must_use]
pub fn build_highlights(
    view: &CartesianView<'_>,
    data_set: &DataSet,
    data_set_index: usize,
    x_value: f64,
    rounding: Rounding,
) -> SmallVec<[Highlight; 4]> {
    let mut indices = data_set.entry_indices_for_x(x_value);
    if indices.is_empty() {
        if let Some(closest) = data_set.entry_for_x(x_value, None, rounding) {
            indices = data_set.entry_indices_for_x(closest.x);
        }
    }

    let transformer = view.transformer(data_set.axis_dependency());
    indices
        .into_iter()
        .filter_map(|entry_index| {
            let entry = data_set.entry(entry_index)?;
            let pixel = transformer.pixel_for_values(view.viewport, entry.x, entry.y);
            Some(Highlight {
                x: entry.x,
                y: entry.y,
                x_px: pixel.x,
                y_px: pixel.y,
                data_set_index,
                entry_index,
                data_index: None,
                stack_index: None,
                axis: data_set.axis_dependency(),
            })
        })
        .collect()
}

/// Candidates from the highlight-enabled data sets among `indices`.
pub(super) fn collect_highlights<I>(
    view: &CartesianView<'_>,
    indices: I,
    x_value: f64,
    rounding: Rounding,
) -> Vec<Highlight>
where
    I: IntoIterator<Item = usize>,
{
    let mut highlights = Vec::new();
    for index in indices {
        let Some(data_set) = view.data_sets.get(index) else {
            continue;
        };
        if !data_set.is_highlight_enabled() {
            continue;
        }
        highlights.extend(build_highlights(view, data_set, index, x_value, rounding));
    }
    highlights
}

/// Picks the axis whose candidates come closest to the touch along the value
/// axis, then the nearest candidate on that axis within the view's maximum
/// highlight distance.
pub(super) fn select_closest(
    view: &CartesianView<'_>,
    candidates: &[Highlight],
    x: f64,
    y: f64,
    orientation: Orientation,
) -> Option<Highlight> {
    if candidates.is_empty() {
        trace!(x, y, "no highlight candidates");
        return None;
    }

    let touch = Point::new(x, y);
    let value_px = orientation.value_axis_px(touch);
    let left = min_value_distance(candidates, value_px, AxisDependency::Left, orientation);
    let right = min_value_distance(candidates, value_px, AxisDependency::Right, orientation);
    let axis = if left < right {
        AxisDependency::Left
    } else {
        AxisDependency::Right
    };

    let closest = candidates
        .iter()
        .filter(|high| high.axis == axis)
        .map(|high| (OrderedFloat(pixel_distance(orientation, touch, high)), *high))
        .filter(|(distance, _)| distance.0 < view.max_highlight_distance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, high)| high);

    if closest.is_none() {
        trace!(x, y, ?axis, "highlight candidates out of reach");
    }
    closest
}

fn min_value_distance(
    candidates: &[Highlight],
    value_px: f64,
    axis: AxisDependency,
    orientation: Orientation,
) -> f64 {
    candidates
        .iter()
        .filter(|high| high.axis == axis)
        .map(|high| (orientation.value_axis_px(Point::new(high.x_px, high.y_px)) - value_px).abs())
        .fold(f64::MAX, f64::min)
}

fn pixel_distance(orientation: Orientation, touch: Point, high: &Highlight) -> f64 {
    match orientation {
        Orientation::Vertical => (touch.x - high.x_px).hypot(touch.y - high.y_px),
        Orientation::Horizontal => {
            let marker = Point::new(high.x_px, high.y_px);
            (orientation.category_axis_px(touch) - orientation.category_axis_px(marker)).abs()
        }
    }
}
