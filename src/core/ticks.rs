use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis::AxisRange;
use crate::core::formatter::AxisValueFormatter;

// Relative slack used when deciding whether the outer ticks still cover the
// requested range.
const COVERAGE_EPSILON: f64 = 1e-9;

/// Tick positions of one axis for one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickSet {
    pub ticks: Vec<f64>,
    /// Midpoints between gridlines, present when label centering is enabled.
    #[serde(default)]
    pub centered: Option<Vec<f64>>,
    /// Fractional digits labels need so adjacent ticks read differently.
    pub decimals: usize,
}

impl TickSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Values at which labels are drawn: centered values when present,
    /// otherwise the ticks themselves.
    #[must_use]
    pub fn label_positions(&self) -> &[f64] {
        self.centered.as_deref().unwrap_or(&self.ticks)
    }

    /// Label text of tick `index`.
    #[must_use]
    pub fn format_label(&self, index: usize, formatter: &dyn AxisValueFormatter) -> Option<String> {
        self.ticks
            .get(index)
            .map(|value| formatter.format(*value, self.decimals))
    }

    /// All label texts, in tick order.
    #[must_use]
    pub fn labels(&self, formatter: &dyn AxisValueFormatter) -> Vec<String> {
        self.ticks
            .iter()
            .map(|value| formatter.format(*value, self.decimals))
            .collect()
    }
}

/// Computes evenly spaced ticks at human-friendly intervals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisTickPlanner;

impl AxisTickPlanner {
    /// Plans ticks for `axis.data_minimum..=axis.data_maximum` and snaps the
    /// effective axis range onto the outer ticks. Planning reads only the data
    /// bounds, so repeated passes give the same ticks.
    ///
    /// Zero label count, zero, negative or non-finite ranges, and intervals
    /// too small to advance at the axis magnitude produce an empty tick set
    /// and leave the axis untouched.
    pub fn plan(axis: &mut AxisRange) -> TickSet {
        let min = axis.data_minimum.min(axis.data_maximum);
        let max = axis.data_minimum.max(axis.data_maximum);
        let label_count = axis.label_count;
        let range = max - min;

        if label_count == 0 || !range.is_finite() || range <= 0.0 {
            trace!(label_count, range, "degenerate axis range, no ticks");
            return TickSet::empty();
        }

        let interval = Self::nice_interval(
            range,
            label_count,
            axis.granularity_enabled.then_some(axis.granularity),
        );
        if !interval.is_finite() || interval <= 0.0 {
            trace!(interval, "tick interval collapsed, no ticks");
            return TickSet::empty();
        }

        let ticks = if axis.force_labels {
            forced_ticks(min, range, label_count)
        } else {
            aligned_ticks(min, max, interval, axis.centering_enabled)
        };
        if ticks.windows(2).any(|pair| pair[1] <= pair[0]) {
            trace!(interval, min, max, "tick interval below float spacing, no ticks");
            return TickSet::empty();
        }

        let decimals = decimals_for_interval(interval);
        let centered = axis.centering_enabled.then(|| {
            let offset = match ticks.as_slice() {
                [first, second, ..] => (second - first) / 2.0,
                _ => 0.0,
            };
            ticks.iter().map(|tick| tick + offset).collect()
        });

        if let (Some(&first), Some(&last)) = (ticks.first(), ticks.last()) {
            axis.snap_to(first, last);
        }

        TickSet {
            ticks,
            centered,
            decimals,
        }
    }

    /// Interval for `label_count` labels over `range`: rounded to one
    /// significant digit, floored at `granularity`, and bumped to the next
    /// power of ten when its leading digit exceeds 5.
    #[must_use]
    pub fn nice_interval(range: f64, label_count: usize, granularity: Option<f64>) -> f64 {
        let raw_interval = range / label_count as f64;
        let mut interval = round_to_next_significant(raw_interval);

        if let Some(granularity) = granularity {
            if interval < granularity {
                interval = granularity;
            }
        }

        let magnitude = 10f64.powf(interval.log10().floor());
        let leading_digit = (interval / magnitude).trunc();
        if leading_digit > 5.0 {
            // Keep the unbumped interval when the bump would floor to zero.
            let bumped = (10.0 * magnitude).floor();
            if bumped != 0.0 {
                interval = bumped;
            }
        }

        interval
    }
}

fn forced_ticks(min: f64, range: f64, label_count: usize) -> Vec<f64> {
    if label_count == 1 {
        return vec![min];
    }

    let step = range / (label_count - 1) as f64;
    (0..label_count)
        .map(|index| normalize_zero(min + step * index as f64))
        .collect()
}

fn aligned_ticks(min: f64, max: f64, interval: f64, centering: bool) -> Vec<f64> {
    let slack = interval * COVERAGE_EPSILON;

    let mut first = (min / interval).ceil() * interval;
    if first - min > slack {
        first -= interval;
    }
    if centering {
        first -= interval;
    }

    let last = next_up((max / interval).floor() * interval);

    let mut count = 0usize;
    while first + interval * count as f64 <= last {
        count += 1;
    }

    let mut ticks: Vec<f64> = Vec::with_capacity(count + 1);
    ticks.extend((0..count).map(|index| normalize_zero(first + interval * index as f64)));

    if ticks.is_empty() {
        ticks.push(normalize_zero(first));
    }
    // Accumulated rounding can leave the walk one step short of `max`.
    while let Some(&tail) = ticks.last() {
        if max - tail <= slack {
            break;
        }
        let next = normalize_zero(tail + interval);
        ticks.push(next);
        // A step lost to float spacing is rejected by the caller.
        if next <= tail {
            break;
        }
    }
    ticks
}

/// Fractional digits needed to tell ticks `interval` apart.
#[must_use]
pub fn decimals_for_interval(interval: f64) -> usize {
    if interval < 1.0 {
        let digits = (-interval.log10()).ceil();
        if digits.is_finite() && digits > 0.0 {
            digits as usize
        } else {
            0
        }
    } else {
        0
    }
}

/// Rounds to one significant digit, half away from zero. Zero and
/// non-finite input yield `0.0`.
#[must_use]
pub fn round_to_next_significant(number: f64) -> f64 {
    if !number.is_finite() || number == 0.0 {
        return 0.0;
    }

    let digits = number.abs().log10().ceil();
    let power = 1.0 - digits;
    let magnitude = 10f64.powf(power);
    let shifted = (number * magnitude).round();
    shifted / magnitude
}

/// Smallest representable `f64` strictly greater than `value`.
#[must_use]
pub fn next_up(value: f64) -> f64 {
    if value.is_nan() || value == f64::INFINITY {
        return value;
    }
    if value == 0.0 {
        return f64::from_bits(1);
    }

    let bits = value.to_bits();
    if value > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
