//! Scroll offset, extent and viewport coordination.
//!
//! A [`ScrollableViewport`] keeps three core quantities consistent: the
//! `extent` of the scrolled content, the `viewport` through which it is seen,
//! and the `offset` of the viewport's top-left corner within the extent. On
//! every axis `0 <= offset <= max(extent - viewport, 0)` holds after each
//! mutation. Six scrollbar quantities are derived from the core ones and
//! republished whenever any of them changes.

use crate::{
    geom::{Axis, Size, Vector, nan_to_zero},
    property::{AttachedProperty, Property, PropertyChange, SubscriptionId},
};

/// When a scrollbar is shown, and whether its axis scrolls at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBarVisibility {
    /// No scrollbar, and the axis does not scroll: content is measured with
    /// the available length.
    Disabled,
    /// Shown only while the extent exceeds the viewport.
    #[default]
    Auto,
    /// Never shown, but the axis still scrolls.
    Hidden,
    /// Always shown.
    Visible,
}

impl ScrollBarVisibility {
    /// Resolve the policy for the given extent and viewport lengths.
    pub fn is_visible(self, extent: f64, viewport: f64) -> bool {
        match self {
            Self::Disabled | Self::Hidden => false,
            Self::Auto => extent > viewport,
            Self::Visible => true,
        }
    }

    /// Does the axis scroll under this policy?
    pub fn allows_scrolling(self) -> bool {
        self != Self::Disabled
    }
}

/// Horizontal scrollbar policy, attachable to any node.
pub const HORIZONTAL_SCROLLBAR_VISIBILITY: AttachedProperty<ScrollBarVisibility> =
    AttachedProperty::new("horizontal_scrollbar_visibility", ScrollBarVisibility::Disabled);

/// Vertical scrollbar policy, attachable to any node.
pub const VERTICAL_SCROLLBAR_VISIBILITY: AttachedProperty<ScrollBarVisibility> =
    AttachedProperty::new("vertical_scrollbar_visibility", ScrollBarVisibility::Auto);

/// Scrollbar visibility policy attached property for an axis.
pub fn scrollbar_visibility(axis: Axis) -> &'static AttachedProperty<ScrollBarVisibility> {
    match axis {
        Axis::Horizontal => &HORIZONTAL_SCROLLBAR_VISIBILITY,
        Axis::Vertical => &VERTICAL_SCROLLBAR_VISIBILITY,
    }
}

/// The derived scrollbar quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollBarQuantity {
    /// Largest horizontal offset, rounded to whole units.
    HorizontalMaximum,
    /// Largest vertical offset, rounded to whole units.
    VerticalMaximum,
    /// Mirror of the horizontal offset.
    HorizontalValue,
    /// Mirror of the vertical offset.
    VerticalValue,
    /// Horizontal thumb length.
    HorizontalViewportSize,
    /// Vertical thumb length.
    VerticalViewportSize,
}

impl ScrollBarQuantity {
    /// Every derived quantity.
    pub const ALL: [Self; 6] = [
        Self::HorizontalMaximum,
        Self::VerticalMaximum,
        Self::HorizontalValue,
        Self::VerticalValue,
        Self::HorizontalViewportSize,
        Self::VerticalViewportSize,
    ];
}

/// Clamp a requested offset so that the viewport stays within the extent on
/// both axes. NaN components collapse to zero, and an infinite scroll range
/// is treated as empty, matching the scrollbar maximum.
pub fn coerce_offset(extent: Size, viewport: Size, requested: Vector) -> Vector {
    Vector::from_axes(|axis| {
        let max = finite_or_zero((extent.along(axis) - viewport.along(axis)).max(0.0));
        nan_to_zero(requested.along(axis)).clamp(0.0, max)
    })
}

/// Collapse non-finite values to zero.
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Scrollbar maximum along one axis.
fn scrollbar_maximum(extent: f64, viewport: f64) -> f64 {
    finite_or_zero((extent - viewport).max(0.0)).round()
}

/// Scrollbar thumb length along one axis. Not rounded.
fn scrollbar_viewport_size(extent: f64, viewport: f64) -> f64 {
    finite_or_zero((viewport / extent) * (extent - viewport)).max(0.0)
}

/// Keeps extent, viewport and offset consistent, and derives scrollbar ranges
/// from them.
#[derive(Debug)]
pub struct ScrollableViewport {
    /// Size of the scrolled content.
    extent: Property<Size>,
    /// Size of the visible window.
    viewport: Property<Size>,
    /// Position of the window within the content.
    offset: Property<Vector>,

    /// Derived horizontal maximum.
    horizontal_maximum: Property<f64>,
    /// Derived vertical maximum.
    vertical_maximum: Property<f64>,
    /// Horizontal offset mirror.
    horizontal_value: Property<f64>,
    /// Vertical offset mirror.
    vertical_value: Property<f64>,
    /// Derived horizontal thumb length.
    horizontal_viewport_size: Property<f64>,
    /// Derived vertical thumb length.
    vertical_viewport_size: Property<f64>,

    /// Distance moved by a line scroll.
    line_size: f64,
}

impl Default for ScrollableViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollableViewport {
    /// A viewport with all quantities zero.
    pub fn new() -> Self {
        Self {
            extent: Property::new("extent", Size::ZERO),
            viewport: Property::new("viewport", Size::ZERO),
            offset: Property::new("offset", Vector::ZERO),
            horizontal_maximum: Property::new("horizontal_scrollbar_maximum", 0.0),
            vertical_maximum: Property::new("vertical_scrollbar_maximum", 0.0),
            horizontal_value: Property::new("horizontal_scrollbar_value", 0.0),
            vertical_value: Property::new("vertical_scrollbar_value", 0.0),
            horizontal_viewport_size: Property::new("horizontal_scrollbar_viewport_size", 0.0),
            vertical_viewport_size: Property::new("vertical_scrollbar_viewport_size", 0.0),
            line_size: 1.0,
        }
    }

    /// Set the distance moved by line scrolls. Negative and NaN sizes are
    /// treated as zero.
    pub fn with_line_size(mut self, line_size: f64) -> Self {
        self.line_size = nan_to_zero(line_size).max(0.0);
        self
    }

    /// Distance moved by line scrolls.
    pub fn line_size(&self) -> f64 {
        self.line_size
    }

    /// Size of the scrolled content.
    pub fn extent(&self) -> Size {
        *self.extent.get()
    }

    /// Size of the visible window.
    pub fn viewport(&self) -> Size {
        *self.viewport.get()
    }

    /// Current scroll offset.
    pub fn offset(&self) -> Vector {
        *self.offset.get()
    }

    /// Largest horizontal offset, rounded to whole units.
    pub fn horizontal_scrollbar_maximum(&self) -> f64 {
        *self.horizontal_maximum.get()
    }

    /// Largest vertical offset, rounded to whole units.
    pub fn vertical_scrollbar_maximum(&self) -> f64 {
        *self.vertical_maximum.get()
    }

    /// Horizontal offset as seen by a scrollbar.
    pub fn horizontal_scrollbar_value(&self) -> f64 {
        *self.horizontal_value.get()
    }

    /// Vertical offset as seen by a scrollbar.
    pub fn vertical_scrollbar_value(&self) -> f64 {
        *self.vertical_value.get()
    }

    /// Horizontal thumb length.
    pub fn horizontal_scrollbar_viewport_size(&self) -> f64 {
        *self.horizontal_viewport_size.get()
    }

    /// Vertical thumb length.
    pub fn vertical_scrollbar_viewport_size(&self) -> f64 {
        *self.vertical_viewport_size.get()
    }

    /// Current value of a derived quantity.
    pub fn derived(&self, quantity: ScrollBarQuantity) -> f64 {
        *self.derived_property(quantity).get()
    }

    /// The property holding a derived quantity.
    fn derived_property(&self, quantity: ScrollBarQuantity) -> &Property<f64> {
        match quantity {
            ScrollBarQuantity::HorizontalMaximum => &self.horizontal_maximum,
            ScrollBarQuantity::VerticalMaximum => &self.vertical_maximum,
            ScrollBarQuantity::HorizontalValue => &self.horizontal_value,
            ScrollBarQuantity::VerticalValue => &self.vertical_value,
            ScrollBarQuantity::HorizontalViewportSize => &self.horizontal_viewport_size,
            ScrollBarQuantity::VerticalViewportSize => &self.vertical_viewport_size,
        }
    }

    /// Mutable access to the property holding a derived quantity.
    fn derived_property_mut(&mut self, quantity: ScrollBarQuantity) -> &mut Property<f64> {
        match quantity {
            ScrollBarQuantity::HorizontalMaximum => &mut self.horizontal_maximum,
            ScrollBarQuantity::VerticalMaximum => &mut self.vertical_maximum,
            ScrollBarQuantity::HorizontalValue => &mut self.horizontal_value,
            ScrollBarQuantity::VerticalValue => &mut self.vertical_value,
            ScrollBarQuantity::HorizontalViewportSize => &mut self.horizontal_viewport_size,
            ScrollBarQuantity::VerticalViewportSize => &mut self.vertical_viewport_size,
        }
    }

    /// Set the content size. On change the offset is re-clamped against the
    /// new bounds and every derived quantity is recomputed.
    pub fn set_extent(&mut self, extent: Size) -> bool {
        if !self.extent.set(extent) {
            return false;
        }
        self.revalidate();
        true
    }

    /// Set the visible window size. On change the offset is re-clamped
    /// against the new bounds and every derived quantity is recomputed.
    pub fn set_viewport(&mut self, viewport: Size) -> bool {
        if !self.viewport.set(viewport) {
            return false;
        }
        self.revalidate();
        true
    }

    /// Request a new offset. The request is clamped into range; returns `true`
    /// if the stored offset changed.
    pub fn set_offset(&mut self, requested: Vector) -> bool {
        let offset = coerce_offset(self.extent(), self.viewport(), requested);
        if offset != requested {
            tracing::debug!(%requested, %offset, "scroll offset clamped");
        }
        let changed = self.offset.set(offset);
        self.publish_values();
        changed
    }

    /// Write the horizontal offset through its scrollbar mirror.
    pub fn set_horizontal_scrollbar_value(&mut self, x: f64) -> bool {
        let offset = self.offset();
        self.set_offset(Vector::new(x, offset.y))
    }

    /// Write the vertical offset through its scrollbar mirror.
    pub fn set_vertical_scrollbar_value(&mut self, y: f64) -> bool {
        let offset = self.offset();
        self.set_offset(Vector::new(offset.x, y))
    }

    /// Re-clamp the current offset and recompute everything derived.
    fn revalidate(&mut self) {
        let offset = self.offset();
        self.set_offset(offset);
        self.publish_all();
    }

    /// Publish the offset mirrors.
    fn publish_values(&mut self) {
        let offset = self.offset();
        self.horizontal_value.set(offset.x);
        self.vertical_value.set(offset.y);
    }

    /// Recompute and publish every derived quantity.
    fn publish_all(&mut self) {
        let extent = self.extent();
        let viewport = self.viewport();
        self.horizontal_maximum.set(scrollbar_maximum(extent.width, viewport.width));
        self.vertical_maximum.set(scrollbar_maximum(extent.height, viewport.height));
        self.horizontal_viewport_size.set(scrollbar_viewport_size(extent.width, viewport.width));
        self.vertical_viewport_size.set(scrollbar_viewport_size(extent.height, viewport.height));
        self.publish_values();
    }

    /// Observe offset changes.
    pub fn subscribe_offset(
        &mut self,
        f: impl FnMut(&PropertyChange<Vector>) + 'static,
    ) -> SubscriptionId {
        self.offset.subscribe(f)
    }

    /// Observe extent changes.
    pub fn subscribe_extent(
        &mut self,
        f: impl FnMut(&PropertyChange<Size>) + 'static,
    ) -> SubscriptionId {
        self.extent.subscribe(f)
    }

    /// Observe viewport changes.
    pub fn subscribe_viewport(
        &mut self,
        f: impl FnMut(&PropertyChange<Size>) + 'static,
    ) -> SubscriptionId {
        self.viewport.subscribe(f)
    }

    /// Observe changes to one derived quantity.
    pub fn subscribe_derived(
        &mut self,
        quantity: ScrollBarQuantity,
        f: impl FnMut(&PropertyChange<f64>) + 'static,
    ) -> SubscriptionId {
        self.derived_property_mut(quantity).subscribe(f)
    }

    /// Move the offset by a delta.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> bool {
        self.set_offset(self.offset() + Vector::new(dx, dy))
    }

    /// Scroll up by one line.
    pub fn line_up(&mut self) -> bool {
        self.scroll_by(0.0, -self.line_size)
    }

    /// Scroll down by one line.
    pub fn line_down(&mut self) -> bool {
        self.scroll_by(0.0, self.line_size)
    }

    /// Scroll left by one line.
    pub fn line_left(&mut self) -> bool {
        self.scroll_by(-self.line_size, 0.0)
    }

    /// Scroll right by one line.
    pub fn line_right(&mut self) -> bool {
        self.scroll_by(self.line_size, 0.0)
    }

    /// Scroll up by the height of the viewport.
    pub fn page_up(&mut self) -> bool {
        self.scroll_by(0.0, -self.viewport().height)
    }

    /// Scroll down by the height of the viewport.
    pub fn page_down(&mut self) -> bool {
        self.scroll_by(0.0, self.viewport().height)
    }

    /// Scroll left by the width of the viewport.
    pub fn page_left(&mut self) -> bool {
        self.scroll_by(-self.viewport().width, 0.0)
    }

    /// Scroll right by the width of the viewport.
    pub fn page_right(&mut self) -> bool {
        self.scroll_by(self.viewport().width, 0.0)
    }

    /// Scroll to the top-left corner.
    pub fn scroll_to_home(&mut self) -> bool {
        self.set_offset(Vector::new(f64::NEG_INFINITY, f64::NEG_INFINITY))
    }

    /// Scroll to the bottom, at the left edge.
    pub fn scroll_to_end(&mut self) -> bool {
        self.set_offset(Vector::new(f64::NEG_INFINITY, f64::INFINITY))
    }
}
