pub mod axis;
pub mod data_set;
pub mod entry;
pub mod formatter;
pub mod matrix;
pub mod primitives;
pub mod ticks;
pub mod transformer;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use axis::AxisRange;
pub use data_set::{DataSet, Rounding, SeriesKind};
pub use entry::{Entry, EntryPayload, Ohlc, StackRange};
pub use formatter::{
    AxisValueFormatter, DefaultAxisValueFormatter, SharedAxisValueFormatter, UnixTimeAxisFormatter,
};
pub use matrix::Matrix;
pub use ticks::{AxisTickPlanner, TickSet};
pub use transformer::ValueTransformer;
pub use types::{AxisDependency, ContentRect, Orientation, Point};
pub use viewport::ViewportState;
pub use windowing::{VisibleBounds, VisibleRangeResolver, is_in_bounds_x};
