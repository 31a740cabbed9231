use std::{
    fmt,
    ops::{Add, Neg, Sub},
};

use super::{Axis, Point};

/// A displacement in layout units, such as a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct a vector.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component along an axis.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Return a copy with the component along `axis` replaced.
    pub fn with_along(&self, axis: Axis, v: f64) -> Self {
        match axis {
            Axis::Horizontal => Self { x: v, y: self.y },
            Axis::Vertical => Self { x: self.x, y: v },
        }
    }

    /// Build a vector from per-axis components.
    pub fn from_axes(mut f: impl FnMut(Axis) -> f64) -> Self {
        Self {
            x: f(Axis::Horizontal),
            y: f(Axis::Vertical),
        }
    }

    /// True if both components are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Vector {
    #[inline]
    fn from(v: (f64, f64)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

impl From<Point> for Vector {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}
