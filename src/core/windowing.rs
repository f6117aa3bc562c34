use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::data_set::{DataSet, Rounding};

/// Inclusive index window of a data set that renderers iterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibleBounds {
    /// First visible index (DOWN-rounded lowest visible x).
    pub min: usize,
    /// Last visible index (UP-rounded highest visible x).
    pub max: usize,
    /// Number of steps past `min` revealed by the current x phase.
    pub range: usize,
}

impl VisibleBounds {
    /// Indices revealed by the current phase: `min..=min + range`.
    #[must_use]
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.min..=self.min + self.range
    }

    /// Last index revealed by the current phase.
    #[must_use]
    pub fn last_revealed(&self) -> usize {
        self.min + self.range
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        self.range == 0
    }
}

/// Resolves which entries of an x-sorted data set fall inside the visible
/// x window.
///
/// Entries must be sorted by x; [`DataSet::new`] enforces this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRangeResolver {
    pub lowest_visible_x: f64,
    pub highest_visible_x: f64,
    pub phase_x: f64,
}

impl VisibleRangeResolver {
    #[must_use]
    pub fn new(lowest_visible_x: f64, highest_visible_x: f64, phase_x: f64) -> Self {
        Self {
            lowest_visible_x,
            highest_visible_x,
            phase_x,
        }
    }

    /// Last entry with `x <= value`; `0` for empty data sets.
    #[must_use]
    pub fn entry_index_at_or_before(data_set: &DataSet, x: f64) -> usize {
        data_set.entry_index(x, None, Rounding::Down).unwrap_or(0)
    }

    /// First entry with `x >= value`; `0` for empty data sets.
    #[must_use]
    pub fn entry_index_at_or_after(data_set: &DataSet, x: f64) -> usize {
        data_set.entry_index(x, None, Rounding::Up).unwrap_or(0)
    }

    /// Visible index window of `data_set`, with the span scaled by the x
    /// animation phase (clamped to `0..=1`).
    #[must_use]
    pub fn compute_bounds(&self, data_set: &DataSet) -> VisibleBounds {
        if data_set.is_empty() {
            return VisibleBounds::default();
        }

        let min = Self::entry_index_at_or_before(data_set, self.lowest_visible_x);
        let max = Self::entry_index_at_or_after(data_set, self.highest_visible_x);
        let phase = clamp_phase(self.phase_x);
        let range = (max.saturating_sub(min) as f64 * phase).floor() as usize;

        VisibleBounds { min, max, range }
    }
}

/// `true` while `entry_index` is still revealed by an x phase animation
/// over `entry_count` entries.
#[must_use]
pub fn is_in_bounds_x(entry_index: usize, entry_count: usize, phase_x: f64) -> bool {
    (entry_index as f64) < entry_count as f64 * clamp_phase(phase_x)
}

fn clamp_phase(phase: f64) -> f64 {
    if phase.is_nan() { 0.0 } else { phase.clamp(0.0, 1.0) }
}
