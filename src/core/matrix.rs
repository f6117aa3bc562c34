use serde::{Deserialize, Serialize};

use crate::core::types::{ContentRect, Point};

/// 2D affine matrix.
///
/// Layout follows the usual row-major 3x3 form with an implicit `[0 0 1]`
/// last row:
///
/// ```text
/// | scale_x  skew_x   trans_x |
/// | skew_y   scale_y  trans_y |
/// ```
///
/// `post_*` operations apply *after* the current mapping, i.e.
/// `m.post_translate(dx, dy)` maps `p` to `m(p) + (dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub scale_x: f64,
    pub skew_x: f64,
    pub trans_x: f64,
    pub skew_y: f64,
    pub scale_y: f64,
    pub trans_y: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        skew_x: 0.0,
        trans_x: 0.0,
        skew_y: 0.0,
        scale_y: 1.0,
        trans_y: 0.0,
    };

    #[must_use]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            trans_x: dx,
            trans_y: dy,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            scale_x: sx,
            scale_y: sy,
            ..Self::IDENTITY
        }
    }

    pub fn post_translate(&mut self, dx: f64, dy: f64) {
        self.trans_x += dx;
        self.trans_y += dy;
    }

    pub fn post_scale(&mut self, sx: f64, sy: f64) {
        self.scale_x *= sx;
        self.skew_x *= sx;
        self.trans_x *= sx;
        self.skew_y *= sy;
        self.scale_y *= sy;
        self.trans_y *= sy;
    }

    /// Scales about the pivot `(px, py)`, which stays fixed.
    pub fn post_scale_about(&mut self, sx: f64, sy: f64, px: f64, py: f64) {
        self.post_translate(-px, -py);
        self.post_scale(sx, sy);
        self.post_translate(px, py);
    }

    /// Replaces `self` with `other ∘ self`.
    pub fn post_concat(&mut self, other: &Matrix) {
        *self = other.concat(self);
    }

    /// Returns `self ∘ inner`: `inner` is applied first.
    #[must_use]
    pub fn concat(&self, inner: &Matrix) -> Matrix {
        Matrix {
            scale_x: self.scale_x * inner.scale_x + self.skew_x * inner.skew_y,
            skew_x: self.scale_x * inner.skew_x + self.skew_x * inner.scale_y,
            trans_x: self.scale_x * inner.trans_x + self.skew_x * inner.trans_y + self.trans_x,
            skew_y: self.skew_y * inner.scale_x + self.scale_y * inner.skew_y,
            scale_y: self.skew_y * inner.skew_x + self.scale_y * inner.scale_y,
            trans_y: self.skew_y * inner.trans_x + self.scale_y * inner.trans_y + self.trans_y,
        }
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.scale_x * self.scale_y - self.skew_x * self.skew_y
    }

    /// Returns the inverse mapping, or `None` for singular or non-finite
    /// matrices.
    #[must_use]
    pub fn invert(&self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let scale_x = self.scale_y / det;
        let skew_x = -self.skew_x / det;
        let skew_y = -self.skew_y / det;
        let scale_y = self.scale_x / det;
        Some(Matrix {
            scale_x,
            skew_x,
            trans_x: -(scale_x * self.trans_x + skew_x * self.trans_y),
            skew_y,
            scale_y,
            trans_y: -(skew_y * self.trans_x + scale_y * self.trans_y),
        })
    }

    #[must_use]
    pub fn map_point(&self, point: Point) -> Point {
        Point::new(
            self.scale_x * point.x + self.skew_x * point.y + self.trans_x,
            self.skew_y * point.x + self.scale_y * point.y + self.trans_y,
        )
    }

    /// Maps interleaved `[x0, y0, x1, y1, ...]` pairs in place. A trailing odd
    /// value is left untouched.
    pub fn map_points(&self, points: &mut [f64]) {
        #[cfg(feature = "parallel-projection")]
        {
            use rayon::prelude::*;

            const PARALLEL_THRESHOLD_PAIRS: usize = 4_096;
            if points.len() / 2 >= PARALLEL_THRESHOLD_PAIRS {
                points.par_chunks_exact_mut(2).for_each(|pair| self.map_pair(pair));
                return;
            }
        }

        for pair in points.chunks_exact_mut(2) {
            self.map_pair(pair);
        }
    }

    fn map_pair(&self, pair: &mut [f64]) {
        let mapped = self.map_point(Point::new(pair[0], pair[1]));
        pair[0] = mapped.x;
        pair[1] = mapped.y;
    }

    /// Maps the four corners of `rect` and returns their sorted bounding box.
    #[must_use]
    pub fn map_rect(&self, rect: ContentRect) -> ContentRect {
        let corners = [
            self.map_point(Point::new(rect.left, rect.top)),
            self.map_point(Point::new(rect.right, rect.top)),
            self.map_point(Point::new(rect.left, rect.bottom)),
            self.map_point(Point::new(rect.right, rect.bottom)),
        ];

        let mut out = ContentRect::from_edges(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for corner in corners {
            out.left = out.left.min(corner.x);
            out.top = out.top.min(corner.y);
            out.right = out.right.max(corner.x);
            out.bottom = out.bottom.max(corner.y);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Matrix;
    use crate::core::types::Point;

    #[test]
    fn post_operations_apply_after_current_mapping() {
        let mut m = Matrix::IDENTITY;
        m.post_translate(-10.0, 0.0);
        m.post_scale(2.0, -1.0);

        let p = m.map_point(Point::new(15.0, 4.0));
        assert_eq!(p, Point::new(10.0, -4.0));
    }

    #[test]
    fn scale_about_pivot_keeps_pivot_fixed() {
        let mut m = Matrix::IDENTITY;
        m.post_scale_about(3.0, 0.5, 40.0, 60.0);
        assert_eq!(m.map_point(Point::new(40.0, 60.0)), Point::new(40.0, 60.0));
    }

    #[test]
    fn inverse_round_trips_affine_with_skew() {
        let m = Matrix {
            scale_x: 2.0,
            skew_x: 0.5,
            trans_x: 3.0,
            skew_y: -0.25,
            scale_y: 4.0,
            trans_y: -7.0,
        };
        let inv = m.invert().expect("invertible");
        let p = Point::new(12.5, -3.25);
        let back = inv.map_point(m.map_point(p));
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Matrix::scaling(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn concat_applies_inner_first() {
        let outer = Matrix::translation(5.0, 5.0);
        let inner = Matrix::scaling(2.0, 3.0);
        let m = outer.concat(&inner);
        assert_eq!(m.map_point(Point::new(1.0, 1.0)), Point::new(7.0, 8.0));
    }

    #[test]
    fn map_points_leaves_trailing_odd_value() {
        let m = Matrix::translation(1.0, 2.0);
        let mut buf = [0.0, 0.0, 5.0];
        m.map_points(&mut buf);
        assert_eq!(buf, [1.0, 2.0, 5.0]);
    }
}
