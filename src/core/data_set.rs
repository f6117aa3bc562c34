use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::entry::Entry;
use crate::core::types::AxisDependency;
use crate::error::{ChartError, ChartResult};

/// How an x lookup resolves when no entry sits exactly on the requested x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Last entry with `x <= value` (falls back to the first entry).
    Down,
    /// First entry with `x >= value` (falls back to the last entry).
    Up,
    /// Entry nearest by absolute x difference; ties go to the earlier index.
    Closest,
}

/// Drawing family a data set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeriesKind {
    #[default]
    Line,
    Bar,
    Scatter,
    Candle,
    Bubble,
}

/// One x-sorted series of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    label: String,
    kind: SeriesKind,
    entries: Vec<Entry>,
    axis_dependency: AxisDependency,
    highlight_enabled: bool,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl DataSet {
    /// Builds a data set from entries already sorted by x.
    ///
    /// Rejects non-finite x/y values and out-of-order entries: every index
    /// lookup below relies on ascending x.
    pub fn new(label: impl Into<String>, kind: SeriesKind, entries: Vec<Entry>) -> ChartResult<Self> {
        for (index, entry) in entries.iter().enumerate() {
            if !entry.x.is_finite() || !entry.y.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "entry {index} has non-finite coordinates"
                )));
            }
            if index > 0 && entries[index - 1].x > entry.x {
                return Err(ChartError::UnsortedEntries { index });
            }
        }

        let mut set = Self {
            label: label.into(),
            kind,
            entries,
            axis_dependency: AxisDependency::Left,
            highlight_enabled: true,
            x_min: 0.0,
            x_max: 0.0,
            y_min: 0.0,
            y_max: 0.0,
        };
        set.calc_min_max();
        Ok(set)
    }

    /// Sorts entries by x (stable) before building the data set.
    pub fn from_unsorted(
        label: impl Into<String>,
        kind: SeriesKind,
        mut entries: Vec<Entry>,
    ) -> ChartResult<Self> {
        entries.sort_by(|left, right| left.x.total_cmp(&right.x));
        Self::new(label, kind, entries)
    }

    #[must_use]
    pub fn with_axis_dependency(mut self, axis: AxisDependency) -> Self {
        self.axis_dependency = axis;
        self
    }

    #[must_use]
    pub fn with_highlight_enabled(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn axis_dependency(&self) -> AxisDependency {
        self.axis_dependency
    }

    #[must_use]
    pub fn is_highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight_enabled = enabled;
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// `true` when any entry carries more than one stack value.
    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.stack_values().is_some_and(|values| values.len() > 1))
    }

    fn calc_min_max(&mut self) {
        let Some(first) = self.entries.first() else {
            self.x_min = 0.0;
            self.x_max = 0.0;
            self.y_min = 0.0;
            self.y_max = 0.0;
            return;
        };
        self.x_min = first.x;
        self.x_max = self.entries.last().map_or(first.x, |entry| entry.x);

        let (y_min, y_max) = self
            .entries
            .iter()
            .map(Entry::y_extent)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (min, max)| {
                (lo.min(min), hi.max(max))
            });
        self.y_min = y_min;
        self.y_max = y_max;
    }

    /// Y extent of the entries whose x falls between `from_x` and `to_x`,
    /// widened to the neighbours on either side. `None` for empty sets.
    #[must_use]
    pub fn y_extent_in_x_range(&self, from_x: f64, to_x: f64) -> Option<(f64, f64)> {
        let from = self.entry_index(from_x, None, Rounding::Down)?;
        let to = self.entry_index(to_x, None, Rounding::Up)?;
        let (from, to) = if from <= to { (from, to) } else { (to, from) };

        Some(
            self.entries[from..=to]
                .iter()
                .map(Entry::y_extent)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (min, max)| {
                    (lo.min(min), hi.max(max))
                }),
        )
    }

    /// Index of the entry matching `x` under `rounding`.
    ///
    /// When `closest_to_y` is given, the entry with the nearest y among those
    /// sharing the found x is returned instead. `None` only for empty sets.
    #[must_use]
    pub fn entry_index(&self, x: f64, closest_to_y: Option<f64>, rounding: Rounding) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        let mut low = 0;
        let mut high = self.entries.len() - 1;
        while low < high {
            let mid = (low + high) / 2;
            let d1 = self.entries[mid].x - x;
            let d2 = self.entries[mid + 1].x - x;
            let ad1 = d1.abs();
            let ad2 = d2.abs();

            if ad2 < ad1 {
                low = mid + 1;
            } else if ad1 < ad2 {
                high = mid;
            } else if d1 < 0.0 && d2 < 0.0 {
                // Equal x values below the target: keep searching upward.
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        let mut closest = high;
        let closest_x = self.entries[closest].x;
        match rounding {
            Rounding::Up if closest_x < x && closest < self.entries.len() - 1 => closest += 1,
            Rounding::Down if closest_x > x && closest > 0 => closest -= 1,
            _ => {}
        }

        if let Some(target_y) = closest_to_y.filter(|y| !y.is_nan()) {
            closest = self.closest_by_y(closest, target_y);
        }
        Some(closest)
    }

    fn closest_by_y(&self, index: usize, target_y: f64) -> usize {
        let x = self.entries[index].x;
        let mut first = index;
        while first > 0 && self.entries[first - 1].x == x {
            first -= 1;
        }

        let mut best = first;
        let mut best_distance = (self.entries[first].y - target_y).abs();
        for (offset, entry) in self.entries[first + 1..].iter().enumerate() {
            if entry.x != x {
                break;
            }
            let distance = (entry.y - target_y).abs();
            if distance < best_distance {
                best = first + 1 + offset;
                best_distance = distance;
            }
        }
        best
    }

    #[must_use]
    pub fn entry_for_x(&self, x: f64, closest_to_y: Option<f64>, rounding: Rounding) -> Option<&Entry> {
        self.entry_index(x, closest_to_y, rounding)
            .and_then(|index| self.entries.get(index))
    }

    /// Indices of every entry whose x equals `x` exactly, ascending.
    #[must_use]
    pub fn entry_indices_for_x(&self, x: f64) -> SmallVec<[usize; 4]> {
        let start = self.entries.partition_point(|entry| entry.x < x);
        self.entries[start..]
            .iter()
            .take_while(|entry| entry.x == x)
            .enumerate()
            .map(|(offset, _)| start + offset)
            .collect()
    }
}
