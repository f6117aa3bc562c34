//! chartcore: coordinate and axis layout engine for Cartesian charts.
//!
//! The crate maps data values to pixels under pan and zoom, plans
//! human-friendly axis ticks, resolves which entries are visible, and turns
//! touch positions back into highlighted entries. It draws nothing; renderers
//! and input handlers sit on top of it.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{AxisConfig, CartesianChart, ChartConfig};
pub use core::{
    AxisDependency, AxisRange, AxisTickPlanner, DataSet, Entry, Matrix, Orientation, Point,
    SeriesKind, TickSet, ValueTransformer, ViewportState, VisibleBounds, VisibleRangeResolver,
};
pub use error::{ChartError, ChartResult};
pub use interaction::{Highlight, Highlighter};
