//! Chart-level facade over the coordinate core.

mod axis_layout;
mod chart;
mod chart_config;

pub use axis_layout::{
    AxisLabels, AxisOffsets, AxisRole, EstimatingLabelMeasurer, LabelMeasurer, LabelSize,
    category_label_size, compute_axis, compute_offsets, longest_label, required_height_space,
    required_width_space, rotated_label_size, visible_axis_bounds,
};
pub use chart::CartesianChart;
pub use chart_config::{AxisConfig, ChartConfig, XAxisPosition, YAxisLabelPosition};
