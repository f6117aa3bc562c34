use indexmap::IndexMap;

use crate::core::{DataSet, Rounding, SeriesKind};

use super::bar_highlighter::bar_highlight;
use super::chart_highlighter::{collect_highlights, select_closest, touch_x_value};
use super::{CartesianView, Highlight, Highlighter};

/// Highlighter for charts layering several series kinds.
///
/// Data sets are grouped by [`SeriesKind`] in first-appearance order; the
/// group position becomes [`Highlight::data_index`]. Bar groups resolve
/// through the bar highlighter so stacked segments stay selectable.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedHighlighter;

impl Highlighter for CombinedHighlighter {
    fn highlight(&self, view: &CartesianView<'_>, x: f64, y: f64) -> Option<Highlight> {
        let orientation = view.orientation();
        let x_value = touch_x_value(view, x, y);

        let mut candidates = Vec::new();
        for (data_index, (kind, indices)) in group_by_kind(view.data_sets).into_iter().enumerate() {
            if kind == SeriesKind::Bar {
                if let Some(mut high) = bar_highlight(view, indices, x, y, orientation) {
                    high.data_index = Some(data_index);
                    candidates.push(high);
                }
            } else {
                candidates.extend(
                    collect_highlights(view, indices, x_value, Rounding::Closest)
                        .into_iter()
                        .map(|mut high| {
                            high.data_index = Some(data_index);
                            high
                        }),
                );
            }
        }

        select_closest(view, &candidates, x, y, orientation)
    }
}

/// Data set indices grouped by series kind, in first-appearance order.
#[must_use]
pub fn group_by_kind(data_sets: &[DataSet]) -> IndexMap<SeriesKind, Vec<usize>> {
    let mut groups: IndexMap<SeriesKind, Vec<usize>> = IndexMap::new();
    for (index, data_set) in data_sets.iter().enumerate() {
        groups.entry(data_set.kind()).or_default().push(index);
    }
    groups
}
