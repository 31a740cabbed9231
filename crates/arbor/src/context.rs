use std::fmt;

use crate::{
    NodeId, VisualTree,
    error::Result,
    geom::{Rect, Size},
    layout::Align,
    property::{AttachedProperty, PropertyChange},
    visual::Visual,
};

/// Handle given to a visual while it runs: the tree, plus the id of the node
/// the visual belongs to.
pub struct NodeContext<'a> {
    /// Tree being operated on.
    tree: &'a mut VisualTree,
    /// Node whose visual is running.
    node: NodeId,
}

impl<'a> NodeContext<'a> {
    /// Create a context for `node`.
    pub(crate) fn new(tree: &'a mut VisualTree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// The node this context belongs to.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Shared access to the whole tree.
    pub fn tree(&self) -> &VisualTree {
        &*self.tree
    }

    /// Mutable access to the whole tree.
    pub fn tree_mut(&mut self) -> &mut VisualTree {
        &mut *self.tree
    }

    /// Children of this node.
    pub fn children(&self) -> &[NodeId] {
        self.tree.children(self.node)
    }

    /// First child of this node, if any.
    pub fn first_child(&self) -> Option<NodeId> {
        self.children().first().copied()
    }

    /// Insert a new visual and attach it as the last child of this node.
    pub fn insert_child(&mut self, visual: impl Visual) -> Result<NodeId> {
        let child = self.tree.insert(visual)?;
        self.tree.add_child(self.node, child)?;
        Ok(child)
    }

    /// Attach an existing node as the last child of this node.
    pub fn add_child(&mut self, child: NodeId) -> Result<()> {
        self.tree.add_child(self.node, child)
    }

    /// Detach a child from this node without destroying it.
    pub fn remove_child(&mut self, child: NodeId) -> Result<bool> {
        self.tree.remove_child(self.node, child)
    }

    /// Measure a child with the given available size.
    pub fn measure_child(&mut self, child: NodeId, available: Size) -> Result<Size> {
        self.tree.measure(child, available)
    }

    /// Arrange a child into `rect`, relative to this node.
    pub fn arrange_child(&mut self, child: NodeId, rect: Rect) -> Result<()> {
        self.tree.arrange(child, rect)
    }

    /// Desired size of a node from its last measure.
    pub fn desired_size(&self, node: NodeId) -> Size {
        self.tree.desired_size(node)
    }

    /// Alignment policy of a node.
    pub fn align_of(&self, node: NodeId) -> Align {
        self.tree.align(node)
    }

    /// Value of an attached property on this node.
    pub fn attached<T>(&self, prop: &AttachedProperty<T>) -> T
    where
        T: Copy + PartialEq + fmt::Debug + 'static,
    {
        self.tree.get_attached(self.node, prop)
    }

    /// Set an attached property on this node.
    pub fn set_attached<T>(
        &mut self,
        prop: &AttachedProperty<T>,
        value: T,
    ) -> Result<Option<PropertyChange<T>>>
    where
        T: Copy + PartialEq + fmt::Debug + 'static,
    {
        self.tree.set_attached(self.node, prop, value)
    }

    /// Mark this node (and its ancestors) as needing a new measure.
    pub fn invalidate_measure(&mut self) {
        self.tree.invalidate_measure(self.node);
    }

    /// Mark this node (and its ancestors) as needing a new arrange.
    pub fn invalidate_arrange(&mut self) {
        self.tree.invalidate_arrange(self.node);
    }

    /// Run a closure against the visual of another node.
    pub fn with_visual<V, R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut V, &mut NodeContext<'_>) -> R,
    ) -> Result<R>
    where
        V: Visual,
    {
        self.tree.with_visual(node, f)
    }
}
