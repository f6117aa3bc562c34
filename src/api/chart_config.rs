use serde::{Deserialize, Serialize};

use crate::core::axis::{DEFAULT_LABEL_COUNT, DEFAULT_SPACE_PERCENT, MAX_LABEL_COUNT, MIN_LABEL_COUNT};
use crate::core::viewport::DEFAULT_MIN_OFFSET_PX;
use crate::core::{AxisRange, Orientation};
use crate::error::{ChartError, ChartResult};
use crate::interaction::DEFAULT_MAX_HIGHLIGHT_DISTANCE;

/// Where the category axis draws its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum XAxisPosition {
    Top,
    #[default]
    Bottom,
    BothSided,
    TopInside,
    BottomInside,
}

/// Whether value-axis labels sit outside the content rect (and reserve
/// space for themselves) or inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum YAxisLabelPosition {
    #[default]
    OutsideChart,
    InsideChart,
}

/// Serializable setup of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub draw_labels: bool,
    #[serde(default = "default_label_count")]
    pub label_count: usize,
    #[serde(default)]
    pub force_labels: bool,
    /// Minimum tick interval; `None` disables the floor.
    #[serde(default)]
    pub granularity: Option<f64>,
    #[serde(default)]
    pub centering: bool,
    #[serde(default)]
    pub custom_minimum: Option<f64>,
    #[serde(default)]
    pub custom_maximum: Option<f64>,
    #[serde(default)]
    pub space_min: f64,
    #[serde(default)]
    pub space_max: f64,
    #[serde(default = "default_space_percent")]
    pub space_top_percent: f64,
    #[serde(default = "default_space_percent")]
    pub space_bottom_percent: f64,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub label_rotation_degrees: f64,
    /// Horizontal label padding in pixels, applied on both sides.
    #[serde(default = "default_label_padding")]
    pub x_offset: f64,
    /// Vertical label padding in pixels.
    #[serde(default = "default_label_padding")]
    pub y_offset: f64,
    /// Lower bound of the space a value axis reserves, in pixels.
    #[serde(default)]
    pub min_width: f64,
    /// Upper bound of the space a value axis reserves; `0` means unbounded.
    #[serde(default)]
    pub max_width: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            draw_labels: true,
            label_count: DEFAULT_LABEL_COUNT,
            force_labels: false,
            granularity: None,
            centering: false,
            custom_minimum: None,
            custom_maximum: None,
            space_min: 0.0,
            space_max: 0.0,
            space_top_percent: DEFAULT_SPACE_PERCENT,
            space_bottom_percent: DEFAULT_SPACE_PERCENT,
            inverted: false,
            label_rotation_degrees: 0.0,
            x_offset: default_label_padding(),
            y_offset: default_label_padding(),
            min_width: 0.0,
            max_width: 0.0,
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn with_label_count(mut self, count: usize, force: bool) -> Self {
        self.label_count = count;
        self.force_labels = force;
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = Some(granularity);
        self
    }

    #[must_use]
    pub fn with_centering(mut self, centering: bool) -> Self {
        self.centering = centering;
        self
    }

    #[must_use]
    pub fn with_custom_bounds(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.custom_minimum = minimum;
        self.custom_maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn with_label_rotation(mut self, degrees: f64) -> Self {
        self.label_rotation_degrees = degrees;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Axis range carrying this config's tick and padding preferences.
    #[must_use]
    pub fn to_axis_range(&self) -> AxisRange {
        let mut axis = AxisRange {
            centering_enabled: self.centering,
            custom_minimum: self.custom_minimum,
            custom_maximum: self.custom_maximum,
            space_min: self.space_min,
            space_max: self.space_max,
            space_top_percent: self.space_top_percent,
            space_bottom_percent: self.space_bottom_percent,
            inverted: self.inverted,
            ..AxisRange::default()
        };
        axis.set_label_count(self.label_count, self.force_labels);
        if let Some(granularity) = self.granularity {
            axis.set_granularity(granularity);
        }
        axis
    }

    pub fn validate(&self, name: &str) -> ChartResult<()> {
        if !(MIN_LABEL_COUNT..=MAX_LABEL_COUNT).contains(&self.label_count) {
            return Err(ChartError::InvalidConfig(format!(
                "{name} label count must be within {MIN_LABEL_COUNT}..={MAX_LABEL_COUNT}"
            )));
        }
        if let Some(granularity) = self.granularity {
            if !granularity.is_finite() || granularity <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} granularity must be finite and > 0"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.custom_minimum, self.custom_maximum) {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} custom bounds must be finite with minimum < maximum"
                )));
            }
        }
        let paddings = [
            self.space_min,
            self.space_max,
            self.space_top_percent,
            self.space_bottom_percent,
            self.x_offset,
            self.y_offset,
            self.min_width,
            self.max_width,
        ];
        if paddings.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "{name} spacing values must be finite and >= 0"
            )));
        }
        if !self.label_rotation_degrees.is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "{name} label rotation must be finite"
            )));
        }
        Ok(())
    }
}

/// Serializable setup of a Cartesian chart.
///
/// Host applications can persist and reload chart setup through
/// [`ChartConfig::to_json_string`] and [`ChartConfig::from_json_str`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default = "default_min_offset")]
    pub min_offset: f64,
    #[serde(default = "default_max_highlight_distance")]
    pub max_highlight_distance: f64,
    #[serde(default)]
    pub drag_offset_x: f64,
    #[serde(default)]
    pub drag_offset_y: f64,
    /// Upper zoom bound along x; `None` leaves zoom unbounded.
    #[serde(default)]
    pub max_scale_x: Option<f64>,
    #[serde(default)]
    pub max_scale_y: Option<f64>,
    /// Re-fit value axes to the visible x window on every layout pass.
    #[serde(default)]
    pub auto_scale_min_max: bool,
    #[serde(default)]
    pub x_axis_position: XAxisPosition,
    #[serde(default)]
    pub y_label_position: YAxisLabelPosition,
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default)]
    pub left_axis: AxisConfig,
    #[serde(default = "default_right_axis")]
    pub right_axis: AxisConfig,
}

impl ChartConfig {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::Vertical,
            min_offset: default_min_offset(),
            max_highlight_distance: default_max_highlight_distance(),
            drag_offset_x: 0.0,
            drag_offset_y: 0.0,
            max_scale_x: None,
            max_scale_y: None,
            auto_scale_min_max: false,
            x_axis_position: XAxisPosition::default(),
            y_label_position: YAxisLabelPosition::default(),
            x_axis: AxisConfig::default(),
            left_axis: AxisConfig::default(),
            right_axis: default_right_axis(),
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_min_offset(mut self, min_offset: f64) -> Self {
        self.min_offset = min_offset;
        self
    }

    #[must_use]
    pub fn with_max_highlight_distance(mut self, distance: f64) -> Self {
        self.max_highlight_distance = distance;
        self
    }

    #[must_use]
    pub fn with_drag_offsets(mut self, x: f64, y: f64) -> Self {
        self.drag_offset_x = x;
        self.drag_offset_y = y;
        self
    }

    #[must_use]
    pub fn with_max_scale(mut self, x: Option<f64>, y: Option<f64>) -> Self {
        self.max_scale_x = x;
        self.max_scale_y = y;
        self
    }

    #[must_use]
    pub fn with_auto_scale_min_max(mut self, enabled: bool) -> Self {
        self.auto_scale_min_max = enabled;
        self
    }

    #[must_use]
    pub fn with_x_axis_position(mut self, position: XAxisPosition) -> Self {
        self.x_axis_position = position;
        self
    }

    #[must_use]
    pub fn with_y_label_position(mut self, position: YAxisLabelPosition) -> Self {
        self.y_label_position = position;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_left_axis(mut self, axis: AxisConfig) -> Self {
        self.left_axis = axis;
        self
    }

    #[must_use]
    pub fn with_right_axis(mut self, axis: AxisConfig) -> Self {
        self.right_axis = axis;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "chart size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_offset.is_finite() || self.min_offset < 0.0 {
            return Err(ChartError::InvalidConfig(
                "min offset must be finite and >= 0".to_owned(),
            ));
        }
        if !self.max_highlight_distance.is_finite() || self.max_highlight_distance <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "max highlight distance must be finite and > 0".to_owned(),
            ));
        }
        for drag in [self.drag_offset_x, self.drag_offset_y] {
            if !drag.is_finite() || drag < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "drag offsets must be finite and >= 0".to_owned(),
                ));
            }
        }
        for scale in [self.max_scale_x, self.max_scale_y].into_iter().flatten() {
            if !scale.is_finite() || scale < 1.0 {
                return Err(ChartError::InvalidConfig(
                    "max scale must be finite and >= 1".to_owned(),
                ));
            }
        }
        self.x_axis.validate("x axis")?;
        self.left_axis.validate("left axis")?;
        self.right_axis.validate("right axis")?;
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Serialization(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Serialization(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_label_count() -> usize {
    DEFAULT_LABEL_COUNT
}

fn default_space_percent() -> f64 {
    DEFAULT_SPACE_PERCENT
}

fn default_label_padding() -> f64 {
    5.0
}

fn default_min_offset() -> f64 {
    DEFAULT_MIN_OFFSET_PX
}

fn default_max_highlight_distance() -> f64 {
    DEFAULT_MAX_HIGHLIGHT_DISTANCE
}

fn default_right_axis() -> AxisConfig {
    AxisConfig::default().with_enabled(false)
}
