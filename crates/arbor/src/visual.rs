//! The visual trait implemented by everything that lives in the tree.

use std::any::{Any, type_name};

use crate::{context::NodeContext, error::Result, geom::Size, state::NodeName};

/// Visuals are the behavior attached to nodes in the [`VisualTree`](crate::VisualTree).
///
/// Layout is two-pass. The tree first calls [`Visual::measure`] top-down with
/// the space a parent offers, and each visual reports the size it would like.
/// The tree then calls [`Visual::arrange`] with the size actually granted, and
/// each visual positions its children inside it. Visuals drive their children
/// through the [`NodeContext`] they are handed.
pub trait Visual: Any {
    /// Report the desired size for the given available space. Infinite
    /// components of `available` mean the parent imposes no bound.
    fn measure(&mut self, _ctx: &mut NodeContext<'_>, _available: Size) -> Result<Size> {
        Ok(Size::ZERO)
    }

    /// Position children within `final_size` and return the size actually used.
    fn arrange(&mut self, _ctx: &mut NodeContext<'_>, final_size: Size) -> Result<Size> {
        Ok(final_size)
    }

    /// Called once, right after the node is inserted into the tree.
    fn on_mount(&mut self, _ctx: &mut NodeContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once, immediately before the node is removed from the tree.
    fn on_unmount(&mut self, _ctx: &mut NodeContext<'_>) {}

    /// Name used in tree dumps and traces.
    fn name(&self) -> NodeName {
        NodeName::of_type(type_name::<Self>())
    }
}

/// Convert visuals into boxed trait objects.
impl<V> From<V> for Box<dyn Visual>
where
    V: Visual + 'static,
{
    fn from(visual: V) -> Self {
        Box::new(visual)
    }
}
