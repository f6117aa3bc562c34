//! Touch-to-entry resolution.
//!
//! A [`Highlighter`] turns a touch position in pixels into the [`Highlight`]
//! of the nearest entry, reading geometry from a [`CartesianView`].

mod bar_highlighter;
mod chart_highlighter;
mod combined_highlighter;

use serde::{Deserialize, Serialize};

use crate::core::{AxisDependency, DataSet, Orientation, ValueTransformer, ViewportState};

pub use bar_highlighter::{BarHighlighter, HorizontalBarHighlighter, closest_stack_index};
pub use chart_highlighter::{ChartHighlighter, build_highlights};
pub use combined_highlighter::{CombinedHighlighter, group_by_kind};

/// Touches farther than this from every entry (in pixels) select nothing.
pub const DEFAULT_MAX_HIGHLIGHT_DISTANCE: f64 = 500.0;

/// A resolved selection: which entry was hit and where to draw its marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Entry x in data space.
    pub x: f64,
    /// Entry y in data space (stack total for stacked entries).
    pub y: f64,
    /// Marker position in pixels, re-projected from the entry values.
    pub x_px: f64,
    pub y_px: f64,
    pub data_set_index: usize,
    pub entry_index: usize,
    /// Series-kind group of the data set in combined charts.
    #[serde(default)]
    pub data_index: Option<usize>,
    /// Hit segment of a stacked bar.
    #[serde(default)]
    pub stack_index: Option<usize>,
    pub axis: AxisDependency,
}

impl Highlight {
    /// `true` when both highlights select the same entry segment, ignoring
    /// pixel positions.
    #[must_use]
    pub fn is_same_selection(&self, other: &Highlight) -> bool {
        self.data_set_index == other.data_set_index
            && self.x == other.x
            && self.stack_index == other.stack_index
            && self.data_index == other.data_index
    }
}

/// Read-only geometry and data a highlighter resolves against.
#[derive(Debug, Clone, Copy)]
pub struct CartesianView<'a> {
    pub data_sets: &'a [DataSet],
    pub viewport: &'a ViewportState,
    pub left: &'a ValueTransformer,
    pub right: &'a ValueTransformer,
    pub max_highlight_distance: f64,
}

impl<'a> CartesianView<'a> {
    #[must_use]
    pub fn new(
        data_sets: &'a [DataSet],
        viewport: &'a ViewportState,
        left: &'a ValueTransformer,
        right: &'a ValueTransformer,
    ) -> Self {
        Self {
            data_sets,
            viewport,
            left,
            right,
            max_highlight_distance: DEFAULT_MAX_HIGHLIGHT_DISTANCE,
        }
    }

    #[must_use]
    pub fn with_max_highlight_distance(mut self, distance: f64) -> Self {
        self.max_highlight_distance = distance;
        self
    }

    #[must_use]
    pub fn transformer(&self, axis: AxisDependency) -> &'a ValueTransformer {
        match axis {
            AxisDependency::Left => self.left,
            AxisDependency::Right => self.right,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.left.orientation()
    }
}

/// Resolves a touch position to the highlighted entry, if any.
pub trait Highlighter {
    fn highlight(&self, view: &CartesianView<'_>, x: f64, y: f64) -> Option<Highlight>;
}
