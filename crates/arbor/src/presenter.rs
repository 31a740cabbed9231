//! A container that hosts exactly one piece of content.
//!
//! The presenter turns its [`Content`] into a single visual child when the
//! content is set: a visual is used as-is, a data value goes through the tree's
//! data templates and falls back to a [`TextBlock`] showing the value's text.
//! Layout forwards the available size to that child and positions it inside the
//! final size according to the child's alignment.

use crate::{
    NodeId,
    content::Content,
    context::NodeContext,
    error::Result,
    geom::Size,
    layout::arrange_rect,
    property::{Property, PropertyChange, SubscriptionId},
    text::TextBlock,
    visual::Visual,
};

/// Hosts one piece of content as a single visual child.
#[derive(Debug)]
pub struct ContentPresenter {
    /// The content slot.
    content: Property<Content>,
    /// The realized child, once mounted.
    child: Option<NodeId>,
    /// True if the child was built by this presenter and is destroyed with it.
    owns_child: bool,
    /// True once the node has been mounted into a tree.
    mounted: bool,
}

impl Default for ContentPresenter {
    fn default() -> Self {
        Self::new(Content::Empty)
    }
}

impl ContentPresenter {
    /// Create a presenter. The child is realized when the node is mounted.
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: Property::new("content", content.into()),
            child: None,
            owns_child: false,
            mounted: false,
        }
    }

    /// The current content.
    pub fn content(&self) -> &Content {
        self.content.get()
    }

    /// The realized child, if any.
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    /// Observe changes to the content slot.
    pub fn subscribe_content(
        &mut self,
        f: impl FnMut(&PropertyChange<Content>) + 'static,
    ) -> SubscriptionId {
        self.content.subscribe(f)
    }

    /// Replace the content. Equal content is a no-op and returns `false`.
    /// Otherwise the new content is realized first and the old child is torn
    /// down only once that succeeds, then measure is invalidated. On error the
    /// old content and child stay in place.
    pub fn set_content(
        &mut self,
        ctx: &mut NodeContext<'_>,
        content: impl Into<Content>,
    ) -> Result<bool> {
        let content = content.into();
        if *self.content.get() == content {
            return Ok(false);
        }
        if self.mounted {
            self.attach(ctx, &content)?;
            ctx.invalidate_measure();
        }
        self.content.set(content);
        Ok(true)
    }

    /// Produce the visual for a piece of content. Data values are built into
    /// the tree as detached nodes; a visual is returned as-is.
    pub fn realize(ctx: &mut NodeContext<'_>, content: &Content) -> Result<Option<NodeId>> {
        let node = match content {
            Content::Empty => return Ok(None),
            Content::Visual(node) => *node,
            Content::Value(value) => {
                let lookup = ctx.tree().template_lookup();
                match lookup.find(value) {
                    Some(template) => {
                        tracing::debug!(ty = value.type_name(), "realizing value from template");
                        template.build(value, ctx.tree_mut())?
                    }
                    None => {
                        tracing::debug!(ty = value.type_name(), "no template, realizing as text");
                        ctx.tree_mut().insert(TextBlock::new(value.to_string()))?
                    }
                }
            }
        };
        ctx.tree_mut().set_templated_parent(node, None)?;
        Ok(Some(node))
    }

    /// Realize `content` and make it the only child, replacing any previous
    /// one. Nothing is torn down unless realization succeeds.
    fn attach(&mut self, ctx: &mut NodeContext<'_>, content: &Content) -> Result<()> {
        if let Content::Visual(node) = content {
            ctx.tree().check_add_child(ctx.node_id(), *node)?;
        }
        let child = Self::realize(ctx, content)?;
        let owned = matches!(content, Content::Value(_));
        if let Err(e) = self.teardown(ctx) {
            if owned && let Some(child) = child {
                ctx.tree_mut().remove_subtree(child)?;
            }
            return Err(e);
        }
        if let Some(child) = child {
            ctx.add_child(child)?;
        }
        self.child = child;
        self.owns_child = owned;
        Ok(())
    }

    /// Remove the current child. Children this presenter built are destroyed;
    /// a visual supplied as content is only detached. A child that has
    /// already left the tree is forgotten.
    fn teardown(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        let Some(child) = self.child.take() else {
            return Ok(());
        };
        if !ctx.tree().contains(child) {
            self.owns_child = false;
            return Ok(());
        }
        tracing::debug!(?child, owned = self.owns_child, "tearing down presenter child");
        if self.owns_child {
            ctx.tree_mut().remove_subtree(child)?;
        } else {
            ctx.remove_child(child)?;
        }
        self.owns_child = false;
        Ok(())
    }
}

impl Visual for ContentPresenter {
    fn on_mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        self.mounted = true;
        let content = self.content.get().clone();
        self.attach(ctx, &content)
    }

    fn on_unmount(&mut self, ctx: &mut NodeContext<'_>) {
        if let Some(child) = self.child
            && !self.owns_child
            && let Err(e) = ctx.remove_child(child)
        {
            tracing::debug!(?child, %e, "failed to release presenter child");
        }
    }

    fn measure(&mut self, ctx: &mut NodeContext<'_>, available: Size) -> Result<Size> {
        match ctx.first_child() {
            Some(child) => ctx.measure_child(child, available),
            None => Ok(Size::ZERO),
        }
    }

    fn arrange(&mut self, ctx: &mut NodeContext<'_>, final_size: Size) -> Result<Size> {
        if let Some(child) = ctx.first_child() {
            let rect = arrange_rect(ctx.desired_size(child), final_size, ctx.align_of(child));
            ctx.arrange_child(child, rect)?;
        }
        Ok(final_size)
    }
}
