//! A container that scrolls a single piece of content.

use std::mem;

use crate::{
    NodeId,
    content::Content,
    context::NodeContext,
    error::Result,
    geom::{Axis, Point, Size, Vector},
    presenter::ContentPresenter,
    scroll::{ScrollBarVisibility, ScrollableViewport, scrollbar_visibility},
    visual::Visual,
};

/// Hosts a [`ContentPresenter`] and scrolls it within its own bounds.
///
/// During measure the presenter gets unbounded space on every axis whose
/// attached visibility policy allows scrolling, and its desired size becomes
/// the extent. During arrange the final size becomes the viewport, and the
/// presenter is placed at the negated offset.
#[derive(Debug)]
pub struct ScrollViewer {
    /// Content held until the presenter is created on mount.
    initial: Option<Content>,
    /// The hosted presenter, once mounted.
    presenter: Option<NodeId>,
    /// Offset, extent and viewport state.
    viewport: ScrollableViewport,
}

impl Default for ScrollViewer {
    fn default() -> Self {
        Self::new(Content::Empty)
    }
}

impl ScrollViewer {
    /// Create a scroll viewer around `content`.
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            initial: Some(content.into()),
            presenter: None,
            viewport: ScrollableViewport::new(),
        }
    }

    /// Set the distance moved by line scrolls.
    pub fn with_line_size(mut self, line_size: f64) -> Self {
        self.viewport = mem::take(&mut self.viewport).with_line_size(line_size);
        self
    }

    /// Scroll state.
    pub fn viewport(&self) -> &ScrollableViewport {
        &self.viewport
    }

    /// Mutable scroll state, for subscribing to its properties.
    pub fn viewport_mut(&mut self) -> &mut ScrollableViewport {
        &mut self.viewport
    }

    /// The hosted presenter node, once mounted.
    pub fn presenter(&self) -> Option<NodeId> {
        self.presenter
    }

    /// Replace the scrolled content. Returns `false` if it was unchanged.
    pub fn set_content(
        &mut self,
        ctx: &mut NodeContext<'_>,
        content: impl Into<Content>,
    ) -> Result<bool> {
        let content = content.into();
        let Some(presenter) = self.presenter else {
            let changed = self.initial.as_ref() != Some(&content);
            self.initial = Some(content);
            return Ok(changed);
        };
        ctx.with_visual::<ContentPresenter, _>(presenter, |p, ctx| p.set_content(ctx, content))?
    }

    /// Apply a change to the scroll state, re-arranging if the offset moved.
    pub fn scroll(
        &mut self,
        ctx: &mut NodeContext<'_>,
        f: impl FnOnce(&mut ScrollableViewport) -> bool,
    ) -> bool {
        let changed = f(&mut self.viewport);
        if changed {
            ctx.invalidate_arrange();
        }
        changed
    }

    /// Request a new offset.
    pub fn set_offset(&mut self, ctx: &mut NodeContext<'_>, offset: Vector) -> bool {
        self.scroll(ctx, |vp| vp.set_offset(offset))
    }

    /// Move the offset by a delta.
    pub fn scroll_by(&mut self, ctx: &mut NodeContext<'_>, dx: f64, dy: f64) -> bool {
        self.scroll(ctx, |vp| vp.scroll_by(dx, dy))
    }

    /// Scroll up by one line.
    pub fn line_up(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::line_up)
    }

    /// Scroll down by one line.
    pub fn line_down(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::line_down)
    }

    /// Scroll left by one line.
    pub fn line_left(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::line_left)
    }

    /// Scroll right by one line.
    pub fn line_right(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::line_right)
    }

    /// Scroll up by a page.
    pub fn page_up(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::page_up)
    }

    /// Scroll down by a page.
    pub fn page_down(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::page_down)
    }

    /// Scroll left by a page.
    pub fn page_left(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::page_left)
    }

    /// Scroll right by a page.
    pub fn page_right(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::page_right)
    }

    /// Scroll to the top-left corner.
    pub fn scroll_to_home(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::scroll_to_home)
    }

    /// Scroll to the bottom, at the left edge.
    pub fn scroll_to_end(&mut self, ctx: &mut NodeContext<'_>) -> bool {
        self.scroll(ctx, ScrollableViewport::scroll_to_end)
    }

    /// The visibility policy attached to this node for an axis.
    fn policy(ctx: &NodeContext<'_>, axis: Axis) -> ScrollBarVisibility {
        ctx.attached(scrollbar_visibility(axis))
    }

    /// Content extent as seen by the viewport. Axes that do not scroll are
    /// capped at `bound`. Content that fills an unbounded axis has no finite
    /// extent, so it is treated as exactly `bound` long.
    fn scroll_extent(ctx: &NodeContext<'_>, desired: Size, bound: Size) -> Size {
        Size::from_axes(|axis| {
            let len = desired.along(axis);
            if !len.is_finite() {
                bound.along(axis)
            } else if Self::policy(ctx, axis).allows_scrolling() {
                len
            } else {
                len.min(bound.along(axis))
            }
        })
    }

    /// Can the content move along `axis`?
    fn can_scroll(&self, ctx: &NodeContext<'_>, axis: Axis) -> bool {
        Self::policy(ctx, axis).allows_scrolling()
            && self.viewport.extent().along(axis) > self.viewport.viewport().along(axis)
    }

    /// Should the scrollbar for `axis` be shown?
    fn scrollbar_visible(&self, ctx: &NodeContext<'_>, axis: Axis) -> bool {
        Self::policy(ctx, axis).is_visible(
            self.viewport.extent().along(axis),
            self.viewport.viewport().along(axis),
        )
    }

    /// Can the content move horizontally?
    pub fn can_scroll_horizontally(&self, ctx: &NodeContext<'_>) -> bool {
        self.can_scroll(ctx, Axis::Horizontal)
    }

    /// Can the content move vertically?
    pub fn can_scroll_vertically(&self, ctx: &NodeContext<'_>) -> bool {
        self.can_scroll(ctx, Axis::Vertical)
    }

    /// Should the horizontal scrollbar be shown?
    pub fn horizontal_scrollbar_visible(&self, ctx: &NodeContext<'_>) -> bool {
        self.scrollbar_visible(ctx, Axis::Horizontal)
    }

    /// Should the vertical scrollbar be shown?
    pub fn vertical_scrollbar_visible(&self, ctx: &NodeContext<'_>) -> bool {
        self.scrollbar_visible(ctx, Axis::Vertical)
    }
}

impl Visual for ScrollViewer {
    fn on_mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        let content = self.initial.take().unwrap_or_default();
        let presenter = ctx.insert_child(ContentPresenter::new(content))?;
        let me = ctx.node_id();
        ctx.tree_mut().set_templated_parent(presenter, Some(me))?;
        self.presenter = Some(presenter);
        Ok(())
    }

    fn measure(&mut self, ctx: &mut NodeContext<'_>, available: Size) -> Result<Size> {
        let Some(presenter) = self.presenter else {
            return Ok(Size::ZERO);
        };
        let offered = Size::from_axes(|axis| {
            if Self::policy(ctx, axis).allows_scrolling() {
                f64::INFINITY
            } else {
                available.along(axis)
            }
        });
        let desired = ctx.measure_child(presenter, offered)?;
        self.viewport.set_extent(Self::scroll_extent(ctx, desired, available));
        Ok(desired.min(available))
    }

    fn arrange(&mut self, ctx: &mut NodeContext<'_>, final_size: Size) -> Result<Size> {
        let Some(presenter) = self.presenter else {
            return Ok(final_size);
        };
        let extent = Self::scroll_extent(ctx, ctx.desired_size(presenter), final_size);
        self.viewport.set_extent(extent);
        self.viewport.set_viewport(final_size);
        let offset = self.viewport.offset();
        let rect = extent.max(final_size).at(Point::from(-offset));
        ctx.arrange_child(presenter, rect)?;
        Ok(final_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        VisualTree,
        geom::Rect,
        scroll::{HORIZONTAL_SCROLLBAR_VISIBILITY, VERTICAL_SCROLLBAR_VISIBILITY},
        text::TextBlock,
    };

    /// Ten lines of five cells each.
    fn lines() -> String {
        vec!["abcde"; 10].join("\n")
    }

    fn with_viewer<R>(
        tree: &mut VisualTree,
        id: NodeId,
        f: impl FnOnce(&mut ScrollViewer, &mut NodeContext<'_>) -> R,
    ) -> Result<R> {
        tree.with_visual::<ScrollViewer, _>(id, f)
    }

    #[test]
    fn mount_creates_templated_presenter() -> Result<()> {
        let mut tree = VisualTree::new();
        let sv = tree.insert(ScrollViewer::new("hi"))?;
        let presenter = tree.visual::<ScrollViewer>(sv).and_then(ScrollViewer::presenter);
        let Some(presenter) = presenter else {
            panic!("no presenter");
        };
        assert_eq!(tree.children(sv), &[presenter]);
        assert_eq!(tree.templated_parent(presenter), Some(sv));
        assert_eq!(
            tree.visual::<ContentPresenter>(presenter).map(ContentPresenter::content),
            Some(&Content::from("hi"))
        );
        Ok(())
    }

    #[test]
    fn measure_is_unbounded_on_scrolling_axes() -> Result<()> {
        let mut tree = VisualTree::new();
        let sv = tree.insert(ScrollViewer::new(lines()))?;
        let desired = tree.measure(sv, Size::new(20.0, 4.0))?;
        assert_eq!(desired, Size::new(5.0, 4.0));
        let extent = tree.visual::<ScrollViewer>(sv).map(|s| s.viewport().extent());
        assert_eq!(extent, Some(Size::new(5.0, 10.0)));
        Ok(())
    }

    #[test]
    fn arrange_places_presenter_at_negated_offset() -> Result<()> {
        let mut tree = VisualTree::new();
        let sv = tree.insert(ScrollViewer::new(lines()))?;
        tree.update_layout(sv, Size::new(20.0, 4.0))?;
        let Some(presenter) = tree.visual::<ScrollViewer>(sv).and_then(ScrollViewer::presenter) else {
            panic!("no presenter");
        };
        assert_eq!(tree.bounds(presenter), Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(
            tree.visual::<ScrollViewer>(sv).map(|s| s.viewport().vertical_scrollbar_maximum()),
            Some(6.0)
        );

        assert!(with_viewer(&mut tree, sv, |s, ctx| s.set_offset(ctx, Vector::new(7.0, 3.0)))?);
        assert!(!tree.is_arrange_valid(sv));
        assert!(tree.is_measure_valid(sv));
        tree.update_layout(sv, Size::new(20.0, 4.0))?;
        assert_eq!(tree.bounds(presenter), Rect::new(0.0, -3.0, 20.0, 10.0));

        // A taller viewport re-clamps the offset.
        tree.update_layout(sv, Size::new(20.0, 8.0))?;
        assert_eq!(tree.bounds(presenter), Rect::new(0.0, -2.0, 20.0, 10.0));
        Ok(())
    }

    /// Takes whatever space it is offered.
    struct Fill;

    impl Visual for Fill {
        fn measure(&mut self, _ctx: &mut NodeContext<'_>, available: Size) -> Result<Size> {
            Ok(available)
        }
    }

    #[test]
    fn content_filling_unbounded_axis_does_not_scroll() -> Result<()> {
        let mut tree = VisualTree::new();
        let fill = tree.insert(Fill)?;
        let sv = tree.insert(ScrollViewer::new(fill))?;
        tree.update_layout(sv, Size::new(10.0, 10.0))?;
        assert!(!with_viewer(&mut tree, sv, |s, ctx| s.scroll_to_end(ctx))?);
        tree.update_layout(sv, Size::new(10.0, 10.0))?;

        let Some(viewer) = tree.visual::<ScrollViewer>(sv) else {
            panic!("no viewer");
        };
        let vp = viewer.viewport();
        assert_eq!(vp.extent(), Size::new(10.0, 10.0));
        assert_eq!(vp.offset(), Vector::ZERO);
        assert_eq!(vp.vertical_scrollbar_maximum(), 0.0);
        assert_eq!(vp.vertical_scrollbar_value(), 0.0);
        let Some(presenter) = viewer.presenter() else {
            panic!("no presenter");
        };
        assert_eq!(tree.bounds(presenter), Rect::new(0.0, 0.0, 10.0, 10.0));
        Ok(())
    }

    #[test]
    fn scroll_wrappers_invalidate_only_on_change() -> Result<()> {
        let mut tree = VisualTree::new();
        let sv = tree.insert(ScrollViewer::new(lines()).with_line_size(2.0))?;
        tree.update_layout(sv, Size::new(20.0, 4.0))?;

        assert!(!with_viewer(&mut tree, sv, |s, ctx| s.line_up(ctx))?);
        assert!(tree.is_arrange_valid(sv));
        assert!(with_viewer(&mut tree, sv, |s, ctx| s.line_down(ctx))?);
        assert!(with_viewer(&mut tree, sv, |s, ctx| s.page_down(ctx))?);
        assert_eq!(
            tree.visual::<ScrollViewer>(sv).map(|s| s.viewport().offset()),
            Some(Vector::new(0.0, 6.0))
        );
        assert!(with_viewer(&mut tree, sv, |s, ctx| s.scroll_to_home(ctx))?);
        assert!(with_viewer(&mut tree, sv, |s, ctx| s.scroll_to_end(ctx))?);
        assert_eq!(
            tree.visual::<ScrollViewer>(sv).map(|s| s.viewport().vertical_scrollbar_value()),
            Some(6.0)
        );
        assert!(!with_viewer(&mut tree, sv, |s, ctx| s.line_right(ctx))?);
        Ok(())
    }

    #[test]
    fn visibility_follows_attached_policy() -> Result<()> {
        let mut tree = VisualTree::new();
        let sv = tree.insert(ScrollViewer::new(lines()))?;
        tree.update_layout(sv, Size::new(3.0, 4.0))?;

        let state = |tree: &mut VisualTree| {
            with_viewer(tree, sv, |s, ctx| {
                (
                    s.can_scroll_horizontally(ctx),
                    s.can_scroll_vertically(ctx),
                    s.horizontal_scrollbar_visible(ctx),
                    s.vertical_scrollbar_visible(ctx),
                )
            })
        };
        assert_eq!(state(&mut tree)?, (false, true, false, true));

        tree.set_attached(sv, &HORIZONTAL_SCROLLBAR_VISIBILITY, ScrollBarVisibility::Visible)?;
        tree.set_attached(sv, &VERTICAL_SCROLLBAR_VISIBILITY, ScrollBarVisibility::Hidden)?;
        assert!(!tree.is_measure_valid(sv));
        tree.update_layout(sv, Size::new(3.0, 4.0))?;
        assert_eq!(state(&mut tree)?, (true, true, true, false));
        Ok(())
    }

    #[test]
    fn set_content_before_and_after_mount() -> Result<()> {
        let mut tree = VisualTree::new();
        let mut viewer = ScrollViewer::new("a");
        let root = tree.insert(TextBlock::new("root"))?;
        let mut ctx = NodeContext::new(&mut tree, root);
        assert!(!viewer.set_content(&mut ctx, "a")?);
        assert!(viewer.set_content(&mut ctx, "b")?);

        let sv = tree.insert(viewer)?;
        assert!(!with_viewer(&mut tree, sv, |s, ctx| s.set_content(ctx, "b"))??);
        assert!(with_viewer(&mut tree, sv, |s, ctx| s.set_content(ctx, "c"))??);
        tree.update_layout(sv, Size::new(10.0, 10.0))?;
        assert_eq!(
            tree.visual::<ScrollViewer>(sv).map(|s| s.viewport().extent()),
            Some(Size::new(1.0, 1.0))
        );
        Ok(())
    }
}
