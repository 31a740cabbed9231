//! Integration tests for scroll coordination.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use arbor::{
        HORIZONTAL_SCROLLBAR_VISIBILITY, NodeId, Result, ScrollBarQuantity, ScrollBarVisibility,
        ScrollViewer, ScrollableViewport, VisualTree, coerce_offset,
        geom::{Size, Vector},
    };

    fn viewer_state<R>(
        tree: &VisualTree,
        id: NodeId,
        f: impl FnOnce(&ScrollableViewport) -> R,
    ) -> Option<R> {
        tree.visual::<ScrollViewer>(id).map(|s| f(s.viewport()))
    }

    #[test]
    fn extent_viewport_offset_scenario() {
        let mut vp = ScrollableViewport::new();
        vp.set_extent(Size::new(200.0, 100.0));
        vp.set_viewport(Size::new(50.0, 100.0));
        assert_eq!(vp.horizontal_scrollbar_maximum(), 150.0);
        assert_eq!(vp.horizontal_scrollbar_viewport_size(), 37.5);

        vp.set_offset(Vector::new(300.0, 0.0));
        assert_eq!(vp.offset(), Vector::new(150.0, 0.0));
        assert_eq!(vp.horizontal_scrollbar_value(), 150.0);
    }

    #[test]
    fn zero_extent_has_zero_ratio() {
        let mut vp = ScrollableViewport::new();
        vp.set_viewport(Size::new(80.0, 24.0));
        assert_eq!(vp.horizontal_scrollbar_viewport_size(), 0.0);
        assert_eq!(vp.vertical_scrollbar_viewport_size(), 0.0);
        assert_eq!(vp.horizontal_scrollbar_maximum(), 0.0);
    }

    #[test]
    fn pure_coercion() {
        let e = Size::new(100.0, 100.0);
        let v = Size::new(30.0, 120.0);
        assert_eq!(coerce_offset(e, v, Vector::new(-5.0, 10.0)), Vector::new(0.0, 0.0));
        assert_eq!(coerce_offset(e, v, Vector::new(500.0, 0.0)), Vector::new(70.0, 0.0));
        assert_eq!(coerce_offset(e, v, Vector::new(f64::NAN, f64::NAN)), Vector::ZERO);
    }

    #[test]
    fn every_derived_quantity_is_observable() {
        let mut vp = ScrollableViewport::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for q in ScrollBarQuantity::ALL {
            let s = Rc::clone(&seen);
            vp.subscribe_derived(q, move |c| s.borrow_mut().push((q, c.new)));
        }
        vp.set_extent(Size::new(300.0, 200.0));
        vp.set_viewport(Size::new(100.0, 100.0));
        vp.set_offset(Vector::new(20.0, 30.0));

        let seen = seen.borrow();
        let last = |q: ScrollBarQuantity| seen.iter().rev().find(|(k, _)| *k == q).map(|(_, v)| *v);
        assert_eq!(last(ScrollBarQuantity::HorizontalMaximum), Some(200.0));
        assert_eq!(last(ScrollBarQuantity::VerticalMaximum), Some(100.0));
        assert_eq!(last(ScrollBarQuantity::HorizontalValue), Some(20.0));
        assert_eq!(last(ScrollBarQuantity::VerticalValue), Some(30.0));
        assert_eq!(last(ScrollBarQuantity::VerticalViewportSize), Some(50.0));
        assert!(last(ScrollBarQuantity::HorizontalViewportSize).is_some());
    }

    #[test]
    fn viewer_scrolls_long_text() -> Result<()> {
        let text = (0..20).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut tree = VisualTree::new();
        let sv = tree.insert(ScrollViewer::new(text))?;
        tree.update_layout(sv, Size::new(30.0, 5.0))?;

        assert_eq!(
            viewer_state(&tree, sv, ScrollableViewport::extent),
            Some(Size::new(7.0, 20.0))
        );
        assert_eq!(
            viewer_state(&tree, sv, ScrollableViewport::vertical_scrollbar_maximum),
            Some(15.0)
        );

        tree.with_visual::<ScrollViewer, _>(sv, |s, ctx| s.scroll_to_end(ctx))?;
        tree.update_layout(sv, Size::new(30.0, 5.0))?;
        let presenter = tree.children(sv)[0];
        assert_eq!(tree.bounds(presenter).tl.y, -15.0);

        // Growing the viewport pulls the offset back into range.
        tree.update_layout(sv, Size::new(30.0, 18.0))?;
        assert_eq!(
            viewer_state(&tree, sv, ScrollableViewport::offset),
            Some(Vector::new(0.0, 2.0))
        );
        assert_eq!(tree.bounds(presenter).tl.y, -2.0);
        Ok(())
    }

    #[test]
    fn horizontal_scrolling_needs_a_policy() -> Result<()> {
        let mut tree = VisualTree::new();
        let sv = tree.insert(ScrollViewer::new("a very long single line of text"))?;
        tree.update_layout(sv, Size::new(10.0, 1.0))?;
        assert!(!tree.with_visual::<ScrollViewer, _>(sv, |s, ctx| s.scroll_by(ctx, 5.0, 0.0))?);

        tree.set_attached(sv, &HORIZONTAL_SCROLLBAR_VISIBILITY, ScrollBarVisibility::Auto)?;
        tree.update_layout(sv, Size::new(10.0, 1.0))?;
        assert!(tree.with_visual::<ScrollViewer, _>(sv, |s, ctx| s.scroll_by(ctx, 5.0, 0.0))?);
        assert!(
            tree.with_visual::<ScrollViewer, _>(sv, |s, ctx| s.horizontal_scrollbar_visible(ctx))?
        );
        Ok(())
    }
}
