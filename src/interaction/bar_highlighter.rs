use crate::core::{DataSet, Orientation, Rounding, StackRange};

use super::chart_highlighter::{collect_highlights, select_closest, touch_x_value};
use super::{CartesianView, Highlight, Highlighter};

/// Bar chart highlighter; stacked bars resolve down to the touched segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarHighlighter;

impl Highlighter for BarHighlighter {
    fn highlight(&self, view: &CartesianView<'_>, x: f64, y: f64) -> Option<Highlight> {
        bar_highlight(view, 0..view.data_sets.len(), x, y, Orientation::Vertical)
    }
}

/// Bar highlighter for charts whose category axis runs vertically. Only the
/// distance along that axis counts when choosing between candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalBarHighlighter;

impl Highlighter for HorizontalBarHighlighter {
    fn highlight(&self, view: &CartesianView<'_>, x: f64, y: f64) -> Option<Highlight> {
        bar_highlight(view, 0..view.data_sets.len(), x, y, Orientation::Horizontal)
    }
}

pub(super) fn bar_highlight<I>(
    view: &CartesianView<'_>,
    indices: I,
    x: f64,
    y: f64,
    orientation: Orientation,
) -> Option<Highlight>
where
    I: IntoIterator<Item = usize>,
{
    let x_value = touch_x_value(view, x, y);
    let candidates = collect_highlights(view, indices, x_value, Rounding::Closest);
    let high = select_closest(view, &candidates, x, y, orientation)?;

    let Some(data_set) = view.data_sets.get(high.data_set_index) else {
        return Some(high);
    };
    if !data_set.is_stacked() {
        return Some(high);
    }

    let touched = view
        .transformer(data_set.axis_dependency())
        .values_by_touch_point(view.viewport, x, y);
    Some(stacked_highlight(view, high, data_set, touched.x, touched.y))
}

fn stacked_highlight(
    view: &CartesianView<'_>,
    high: Highlight,
    data_set: &DataSet,
    x_value: f64,
    y_value: f64,
) -> Highlight {
    let Some(entry_index) = data_set.entry_index(x_value, Some(y_value), Rounding::Closest) else {
        return high;
    };
    let Some(entry) = data_set.entry(entry_index) else {
        return high;
    };
    if entry.stack_values().is_none() {
        return high;
    }

    let ranges = entry.stack_ranges();
    if ranges.is_empty() {
        return high;
    }

    let stack_index = closest_stack_index(&ranges, y_value);
    let pixel = view
        .transformer(high.axis)
        .pixel_for_values(view.viewport, high.x, ranges[stack_index].to);

    Highlight {
        x: entry.x,
        y: entry.y,
        x_px: pixel.x,
        y_px: pixel.y,
        data_set_index: high.data_set_index,
        entry_index,
        data_index: high.data_index,
        stack_index: Some(stack_index),
        axis: high.axis,
    }
}

/// Index of the stack segment containing `value`. Values outside every
/// segment map to the last segment when above its top, otherwise to 0.
#[must_use]
pub fn closest_stack_index(ranges: &[StackRange], value: f64) -> usize {
    if let Some(index) = ranges.iter().position(|range| range.contains(value)) {
        return index;
    }

    let last = ranges.len().saturating_sub(1);
    match ranges.get(last) {
        Some(range) if range.is_larger(value) => last,
        _ => 0,
    }
}
