use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// A point in either data space or pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

/// Axis-aligned pixel rectangle where data is plotted.
///
/// Invariant for a well-formed rect: `left <= right` and `top <= bottom`.
/// [`ContentRect::new`] enforces it; [`ContentRect::from_edges`] does not, and
/// a malformed rect only yields degenerate geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ContentRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> ChartResult<Self> {
        let finite =
            left.is_finite() && top.is_finite() && right.is_finite() && bottom.is_finite();
        if !finite || left > right || top > bottom {
            return Err(ChartError::InvalidContentRect {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self::from_edges(left, top, right, bottom))
    }

    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// Which of the two value axes a data set is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisDependency {
    #[default]
    Left,
    Right,
}

/// Direction in which the category (x) axis runs on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Data x runs horizontally, data y vertically (line, bar, scatter...).
    #[default]
    Vertical,
    /// Data x runs vertically, data y horizontally (horizontal bar charts).
    Horizontal,
}

impl Orientation {
    /// Pixel coordinate along the value (data y) axis.
    #[must_use]
    pub fn value_axis_px(self, pixel: Point) -> f64 {
        match self {
            Self::Vertical => pixel.y,
            Self::Horizontal => pixel.x,
        }
    }

    /// Pixel coordinate along the category (data x) axis.
    #[must_use]
    pub fn category_axis_px(self, pixel: Point) -> f64 {
        match self {
            Self::Vertical => pixel.x,
            Self::Horizontal => pixel.y,
        }
    }
}
