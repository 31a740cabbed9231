use std::fmt;

use super::{Axis, Point, Rect};

/// A `Size` has a width and height but no location.
///
/// Components are always non-negative: the constructors collapse negative and
/// NaN inputs to zero. Infinite components are permitted and are used to
/// express unbounded available space during measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal length.
    pub width: f64,
    /// Vertical length.
    pub height: f64,
}

/// Clamp one component into the valid size domain.
fn sanitize(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Unbounded in both dimensions.
    pub const INFINITE: Self = Self {
        width: f64::INFINITY,
        height: f64::INFINITY,
    };

    /// Construct a size, collapsing negative or NaN components to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Length along an axis.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Return a copy with the length along `axis` replaced.
    pub fn with_along(&self, axis: Axis, v: f64) -> Self {
        match axis {
            Axis::Horizontal => Self::new(v, self.height),
            Axis::Vertical => Self::new(self.width, v),
        }
    }

    /// Build a size from per-axis lengths.
    pub fn from_axes(mut f: impl FnMut(Axis) -> f64) -> Self {
        Self::new(f(Axis::Horizontal), f(Axis::Vertical))
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Component-wise minimum.
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Component-wise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// True if this size can completely enclose `other` in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// A `Rect` with these dimensions located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// A `Rect` with these dimensions located at `tl`.
    pub fn at(&self, tl: Point) -> Rect {
        Rect::new(tl.x, tl.y, self.width, self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

impl From<(f64, f64)> for Size {
    fn from(v: (f64, f64)) -> Self {
        Self::new(v.0, v.1)
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        r.size()
    }
}
