//! Alignment policy for placing a child inside space offered by its parent.

use crate::geom::{Axis, Rect, Size};

/// How a child is placed along one axis within the space it was offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Placed at the leading edge at its desired length.
    Start,
    /// Centered at its desired length.
    Center,
    /// Placed at the trailing edge at its desired length.
    End,
    /// Fills the whole available length regardless of its desired length.
    #[default]
    Stretch,
}

/// Horizontal and vertical alignment of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Align {
    /// Alignment along the x axis.
    pub x: Alignment,
    /// Alignment along the y axis.
    pub y: Alignment,
}

impl Align {
    /// Construct from per-axis alignments.
    pub fn new(x: Alignment, y: Alignment) -> Self {
        Self { x, y }
    }

    /// Centered on both axes.
    pub fn center() -> Self {
        Self::new(Alignment::Center, Alignment::Center)
    }

    /// Alignment along an axis.
    pub fn along(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Offset and length of a child along one axis.
pub fn align_axis(desired: f64, available: f64, align: Alignment) -> (f64, f64) {
    match align {
        Alignment::Start => (0.0, desired),
        Alignment::Center => ((available - desired) / 2.0, desired),
        Alignment::End => (available - desired, desired),
        Alignment::Stretch => (0.0, available),
    }
}

/// Placement rectangle for a child with size `desired` inside `available`,
/// relative to the parent's origin.
pub fn arrange_rect(desired: Size, available: Size, align: Align) -> Rect {
    let (x, w) = align_axis(desired.width, available.width, align.x);
    let (y, h) = align_axis(desired.height, available.height, align.y);
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_policies() {
        assert_eq!(align_axis(40.0, 100.0, Alignment::Start), (0.0, 40.0));
        assert_eq!(align_axis(40.0, 100.0, Alignment::Center), (30.0, 40.0));
        assert_eq!(align_axis(40.0, 100.0, Alignment::End), (60.0, 40.0));
        assert_eq!(align_axis(40.0, 100.0, Alignment::Stretch), (0.0, 100.0));
    }

    #[test]
    fn oversized_child_is_not_clipped() {
        assert_eq!(align_axis(120.0, 100.0, Alignment::Center), (-10.0, 120.0));
        assert_eq!(align_axis(120.0, 100.0, Alignment::End), (-20.0, 120.0));
    }

    #[test]
    fn rect_is_symmetric_across_axes() {
        let r = arrange_rect(
            Size::new(40.0, 10.0),
            Size::new(100.0, 50.0),
            Align::new(Alignment::Center, Alignment::End),
        );
        assert_eq!(r, Rect::new(30.0, 40.0, 40.0, 10.0));

        let r = arrange_rect(Size::new(40.0, 10.0), Size::new(100.0, 50.0), Align::default());
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 50.0));
    }
}
