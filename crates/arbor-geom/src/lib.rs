//! Geometry primitives used across arbor.
//!
//! All quantities are `f64` layout units. Sizes are never negative and never
//! NaN; infinite lengths are allowed and mean "unbounded".

#![warn(missing_docs)]

/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;
/// Offset vectors.
mod vector;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;
pub use vector::Vector;

/// Layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis, measured by widths.
    Horizontal,
    /// The y axis, measured by heights.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];
}

/// Collapse NaN to zero, leaving every other value untouched.
pub fn nan_to_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}
