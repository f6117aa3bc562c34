use serde::{Deserialize, Serialize};

pub const MIN_LABEL_COUNT: usize = 2;
pub const MAX_LABEL_COUNT: usize = 25;
pub const DEFAULT_LABEL_COUNT: usize = 6;
pub const DEFAULT_SPACE_PERCENT: f64 = 10.0;

/// Numeric range and tick preferences of one axis.
///
/// `data_minimum`/`data_maximum` hold the range ticks are planned from. They
/// are derived from data by [`AxisRange::calculate`] (category axes) or
/// [`AxisRange::calculate_value_axis`] (value axes). `minimum`/`maximum`/`range`
/// hold the *effective* plotted range, which
/// [`crate::core::AxisTickPlanner::plan`] snaps onto the outer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub minimum: f64,
    pub maximum: f64,
    pub range: f64,
    #[serde(default)]
    pub data_minimum: f64,
    #[serde(default)]
    pub data_maximum: f64,
    pub granularity: f64,
    pub granularity_enabled: bool,
    pub label_count: usize,
    pub force_labels: bool,
    pub centering_enabled: bool,
    #[serde(default)]
    pub custom_minimum: Option<f64>,
    #[serde(default)]
    pub custom_maximum: Option<f64>,
    /// Absolute padding below the data minimum (category axes).
    #[serde(default)]
    pub space_min: f64,
    /// Absolute padding above the data maximum (category axes).
    #[serde(default)]
    pub space_max: f64,
    /// Padding above the data maximum in percent of the range (value axes).
    #[serde(default = "default_space_percent")]
    pub space_top_percent: f64,
    /// Padding below the data minimum in percent of the range (value axes).
    #[serde(default = "default_space_percent")]
    pub space_bottom_percent: f64,
    #[serde(default)]
    pub inverted: bool,
}

fn default_space_percent() -> f64 {
    DEFAULT_SPACE_PERCENT
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 0.0,
            range: 0.0,
            data_minimum: 0.0,
            data_maximum: 0.0,
            granularity: 1.0,
            granularity_enabled: false,
            label_count: DEFAULT_LABEL_COUNT,
            force_labels: false,
            centering_enabled: false,
            custom_minimum: None,
            custom_maximum: None,
            space_min: 0.0,
            space_max: 0.0,
            space_top_percent: DEFAULT_SPACE_PERCENT,
            space_bottom_percent: DEFAULT_SPACE_PERCENT,
            inverted: false,
        }
    }
}

impl AxisRange {
    /// Range with explicit bounds and default tick preferences.
    #[must_use]
    pub fn new(minimum: f64, maximum: f64) -> Self {
        let mut axis = Self::default();
        axis.set_bounds(minimum, maximum);
        axis
    }

    #[must_use]
    pub fn with_label_count(mut self, count: usize, force: bool) -> Self {
        self.set_label_count(count, force);
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.set_granularity(granularity);
        self
    }

    #[must_use]
    pub fn with_centering(mut self, enabled: bool) -> Self {
        self.centering_enabled = enabled;
        self
    }

    /// Sets the requested label count, clamped to `2..=25`.
    pub fn set_label_count(&mut self, count: usize, force: bool) {
        self.label_count = count.clamp(MIN_LABEL_COUNT, MAX_LABEL_COUNT);
        self.force_labels = force;
    }

    /// Sets the minimum tick interval and enables it.
    pub fn set_granularity(&mut self, granularity: f64) {
        self.granularity = granularity;
        self.granularity_enabled = true;
    }

    /// Stores the planning bounds and resets the effective range to them.
    pub fn set_bounds(&mut self, minimum: f64, maximum: f64) {
        self.data_minimum = minimum;
        self.data_maximum = maximum;
        self.snap_to(minimum, maximum);
    }

    /// Replaces the effective range only; the planning bounds are kept.
    pub fn snap_to(&mut self, minimum: f64, maximum: f64) {
        self.minimum = minimum;
        self.maximum = maximum;
        self.range = (maximum - minimum).abs();
    }

    /// Width of the planning bounds.
    #[must_use]
    pub fn data_range(&self) -> f64 {
        (self.data_maximum - self.data_minimum).abs()
    }

    /// Derives the range from data for a category (x) axis: custom bounds
    /// win, otherwise the data bounds are padded by `space_min`/`space_max`.
    pub fn calculate(&mut self, data_min: f64, data_max: f64) {
        let minimum = self.custom_minimum.unwrap_or(data_min - self.space_min);
        let maximum = self.custom_maximum.unwrap_or(data_max + self.space_max);
        self.set_bounds(minimum, maximum);
    }

    /// Derives the range from data for a value (y) axis: a flat range is
    /// widened by 1 on both sides, then padded by the top/bottom percentages
    /// unless a custom bound is set.
    pub fn calculate_value_axis(&mut self, data_min: f64, data_max: f64) {
        let mut min = self.custom_minimum.unwrap_or(data_min);
        let mut max = self.custom_maximum.unwrap_or(data_max);

        if (max - min).abs() == 0.0 {
            max += 1.0;
            min -= 1.0;
        }

        let range = (max - min).abs();
        let minimum = match self.custom_minimum {
            Some(custom) => custom,
            None => min - range / 100.0 * self.space_bottom_percent,
        };
        let maximum = match self.custom_maximum {
            Some(custom) => custom,
            None => max + range / 100.0 * self.space_top_percent,
        };
        self.set_bounds(minimum, maximum);
    }
}

#[cfg(test)]
mod tests {
    use super::AxisRange;

    #[test]
    fn value_axis_pads_by_percent() {
        let mut axis = AxisRange::default();
        axis.calculate_value_axis(0.0, 100.0);
        assert_eq!(axis.minimum, -10.0);
        assert_eq!(axis.maximum, 110.0);
        assert_eq!(axis.range, 120.0);
    }

    #[test]
    fn flat_value_axis_is_widened() {
        let mut axis = AxisRange {
            space_top_percent: 0.0,
            space_bottom_percent: 0.0,
            ..AxisRange::default()
        };
        axis.calculate_value_axis(5.0, 5.0);
        assert_eq!((axis.minimum, axis.maximum), (4.0, 6.0));
    }

    #[test]
    fn custom_bounds_override_data() {
        let mut axis = AxisRange {
            custom_minimum: Some(0.0),
            ..AxisRange::default()
        };
        axis.calculate_value_axis(20.0, 40.0);
        assert_eq!(axis.minimum, 0.0);
        assert_eq!(axis.maximum, 44.0);
    }

    #[test]
    fn snapping_keeps_planning_bounds() {
        let mut axis = AxisRange::new(-5.0, 144.4);
        axis.snap_to(-20.0, 160.0);
        assert_eq!((axis.minimum, axis.maximum, axis.range), (-20.0, 160.0, 180.0));
        assert_eq!((axis.data_minimum, axis.data_maximum), (-5.0, 144.4));
        assert!((axis.data_range() - 149.4).abs() < 1e-9);
    }

    #[test]
    fn label_count_is_clamped() {
        let axis = AxisRange::default().with_label_count(100, true);
        assert_eq!(axis.label_count, 25);
        assert!(axis.force_labels);
    }
}
