//! The visual tree arena and the measure/arrange driver.

use std::{
    any::{Any, type_name},
    fmt, mem,
    rc::Rc,
};

use slotmap::SlotMap;

use crate::{
    NodeId,
    context::NodeContext,
    error::{Error, Result},
    geom::{Axis, Rect, Size},
    layout::Align,
    node::Node,
    property::{AttachedProperty, AttachedValues, PropertyChange},
    template::{DataTemplates, TemplateLookup},
    visual::Visual,
};

/// Arena of visual nodes, their attached property values, and the template
/// lookup used to realize content.
pub struct VisualTree {
    /// Node storage arena.
    nodes: SlotMap<NodeId, Node>,
    /// Attached property side table.
    attached: AttachedValues,
    /// Data templates consulted when content needs a visual.
    templates: Rc<dyn TemplateLookup>,
}

impl Default for VisualTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualTree {
    /// Create an empty tree with no data templates.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            attached: AttachedValues::default(),
            templates: Rc::new(DataTemplates::new()),
        }
    }

    /// Create an empty tree that realizes content through `templates`.
    pub fn with_templates(templates: impl TemplateLookup + 'static) -> Self {
        let mut tree = Self::new();
        tree.set_template_lookup(Rc::new(templates));
        tree
    }

    /// Replace the template lookup. Already realized content is unaffected.
    pub fn set_template_lookup(&mut self, templates: Rc<dyn TemplateLookup>) {
        self.templates = templates;
    }

    /// The current template lookup.
    pub fn template_lookup(&self) -> Rc<dyn TemplateLookup> {
        Rc::clone(&self.templates)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Does the node exist?
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Node data, if the node exists.
    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    /// Node data, or `NodeNotFound`.
    fn node_ref(&self, node: NodeId) -> Result<&Node> {
        self.nodes.get(node).ok_or(Error::NodeNotFound(node))
    }

    /// Mutable node data, or `NodeNotFound`.
    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(node).ok_or(Error::NodeNotFound(node))
    }

    /// Insert a visual as a new detached node and mount it.
    pub fn insert(&mut self, visual: impl Visual) -> Result<NodeId> {
        self.insert_boxed(Box::new(visual))
    }

    /// Insert a boxed visual as a new detached node and mount it.
    pub fn insert_boxed(&mut self, visual: Box<dyn Visual>) -> Result<NodeId> {
        let id = self.nodes.insert(Node::new(visual));
        let mounted = self
            .with_visual_mut(id, |visual, ctx| visual.on_mount(ctx))
            .and_then(|r| r);
        if let Err(e) = mounted {
            tracing::debug!(?id, %e, "mount failed, discarding node");
            self.remove_subtree(id)?;
            return Err(e);
        }
        Ok(id)
    }

    /// Parent of a node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Children of a node. Empty if the node does not exist.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The control whose template created a node, if any.
    pub fn templated_parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.templated_parent)
    }

    /// Set or clear the templated parent back-reference.
    pub fn set_templated_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<()> {
        self.node_mut(node)?.templated_parent = parent;
        Ok(())
    }

    /// Alignment policy of a node. Default if the node does not exist.
    pub fn align(&self, node: NodeId) -> Align {
        self.nodes.get(node).map(|n| n.align).unwrap_or_default()
    }

    /// Set the alignment policy of a node. The parent must re-arrange.
    pub fn set_align(&mut self, node: NodeId, align: Align) -> Result<()> {
        let n = self.node_mut(node)?;
        if n.align == align {
            return Ok(());
        }
        n.align = align;
        let parent = n.parent;
        self.invalidate_arrange(node);
        if let Some(parent) = parent {
            self.invalidate_arrange(parent);
        }
        Ok(())
    }

    /// Desired size of a node from its last measure.
    pub fn desired_size(&self, node: NodeId) -> Size {
        self.nodes.get(node).map(|n| n.desired_size).unwrap_or_default()
    }

    /// Bounds of a node from its last arrange, relative to its parent.
    pub fn bounds(&self, node: NodeId) -> Rect {
        self.nodes.get(node).map(|n| n.bounds).unwrap_or_default()
    }

    /// Is the node's measurement current?
    pub fn is_measure_valid(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.measure_valid)
    }

    /// Is the node's arrangement current?
    pub fn is_arrange_valid(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.arrange_valid)
    }

    /// Is `ancestor` a strict ancestor of `node`?
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Check that [`add_child`](Self::add_child) would succeed: both nodes
    /// exist and `child` is neither `parent` nor one of its ancestors.
    pub fn check_add_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node_ref(parent)?;
        self.node_ref(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    /// Attach `child` as the last child of `parent`. A child that already has
    /// a parent is detached from it first, so a node never has two parents.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_add_child(parent, child)?;
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        self.invalidate_measure(parent);
        Ok(())
    }

    /// Detach `child` from `parent`. Returns `false` if it was not a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.node_ref(parent)?;
        if self.parent(child) != Some(parent) {
            return Ok(false);
        }
        self.detach(child)?;
        Ok(true)
    }

    /// Detach a node from its parent, if it has one. The node stays in the
    /// arena.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(());
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        self.invalidate_measure(parent);
        Ok(())
    }

    /// Detach every child of `parent`, returning them in their former order.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>> {
        let children = mem::take(&mut self.node_mut(parent)?.children);
        for child in &children {
            if let Some(node) = self.nodes.get_mut(*child) {
                node.parent = None;
            }
        }
        if !children.is_empty() {
            self.invalidate_measure(parent);
        }
        Ok(children)
    }

    /// Detach a node and destroy it along with all of its descendants.
    ///
    /// Visuals are unmounted top-down. Children read after a visual's
    /// `on_unmount` runs, so a visual may detach children it does not own to
    /// keep them alive.
    pub fn remove_subtree(&mut self, root: NodeId) -> Result<()> {
        self.detach(root)?;
        let mut doomed = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.contains(id) {
                continue;
            }
            self.with_visual_mut(id, |visual, ctx| visual.on_unmount(ctx))?;
            doomed.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        for id in doomed.into_iter().rev() {
            self.nodes.remove(id);
            self.attached.clear_node(id);
        }
        Ok(())
    }

    /// Mark a node and all of its ancestors as needing measure and arrange.
    pub fn invalidate_measure(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get_mut(id) else {
                break;
            };
            n.measure_valid = false;
            n.arrange_valid = false;
            current = n.parent;
        }
    }

    /// Mark a node and all of its ancestors as needing arrange.
    pub fn invalidate_arrange(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get_mut(id) else {
                break;
            };
            n.arrange_valid = false;
            current = n.parent;
        }
    }

    /// Measure a node. The cached desired size is returned without calling
    /// the visual when the measurement is valid and `available` is unchanged.
    pub fn measure(&mut self, node: NodeId, available: Size) -> Result<Size> {
        let n = self.node_ref(node)?;
        if n.measure_valid && n.previous_available == Some(available) {
            return Ok(n.desired_size);
        }
        tracing::trace!(name = %n.name, ?node, %available, "measure");
        let desired = self.with_visual_mut(node, |visual, ctx| visual.measure(ctx, available))??;
        let desired = Size::new(desired.width, desired.height);
        let n = self.node_mut(node)?;
        n.desired_size = desired;
        n.previous_available = Some(available);
        n.measure_valid = true;
        Ok(desired)
    }

    /// Arrange a node into `rect`, relative to its parent. A node whose
    /// measurement is stale is measured again with its previous constraint.
    pub fn arrange(&mut self, node: NodeId, rect: Rect) -> Result<()> {
        let n = self.node_ref(node)?;
        if n.arrange_valid && n.bounds == rect {
            return Ok(());
        }
        if !n.measure_valid {
            let available = n.previous_available.unwrap_or_else(|| rect.size());
            self.measure(node, available)?;
        }
        tracing::trace!(?node, %rect, "arrange");
        self.with_visual_mut(node, |visual, ctx| visual.arrange(ctx, rect.size()))??;
        let n = self.node_mut(node)?;
        n.bounds = rect;
        n.arrange_valid = true;
        Ok(())
    }

    /// Run a full layout pass from `root`. Unbounded axes of `available` are
    /// arranged at the root's desired length.
    pub fn update_layout(&mut self, root: NodeId, available: Size) -> Result<()> {
        let desired = self.measure(root, available)?;
        let final_size = Size::from_axes(|axis: Axis| {
            let len = available.along(axis);
            if len.is_infinite() {
                desired.along(axis)
            } else {
                len
            }
        });
        self.arrange(root, final_size.rect())
    }

    /// Value of an attached property on a node.
    pub fn get_attached<T>(&self, node: NodeId, prop: &AttachedProperty<T>) -> T
    where
        T: Copy + PartialEq + fmt::Debug + 'static,
    {
        self.attached.get(node, prop)
    }

    /// Set an attached property on a node. A change invalidates the node's
    /// measure.
    pub fn set_attached<T>(
        &mut self,
        node: NodeId,
        prop: &AttachedProperty<T>,
        value: T,
    ) -> Result<Option<PropertyChange<T>>>
    where
        T: Copy + PartialEq + fmt::Debug + 'static,
    {
        self.node_ref(node)?;
        let change = self.attached.set(node, prop, value);
        if change.is_some() {
            self.invalidate_measure(node);
        }
        Ok(change)
    }

    /// Shared access to a node's visual as a concrete type.
    pub fn visual<V: Visual>(&self, node: NodeId) -> Option<&V> {
        let visual = self.nodes.get(node)?.visual.as_deref()?;
        let any: &dyn Any = visual;
        any.downcast_ref::<V>()
    }

    /// Run a closure with mutable access to a node's visual as a concrete type.
    pub fn with_visual<V, R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut V, &mut NodeContext<'_>) -> R,
    ) -> Result<R>
    where
        V: Visual,
    {
        self.with_visual_mut(node, |visual, ctx| {
            let any: &mut dyn Any = visual;
            any.downcast_mut::<V>()
                .map(|visual| f(visual, ctx))
                .ok_or(Error::VisualTypeMismatch {
                    node,
                    expected: type_name::<V>(),
                })
        })?
    }

    /// Take a node's visual out of its slot for a single call, then put it
    /// back. Re-entering the same node during the call fails.
    pub(crate) fn with_visual_mut<R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut dyn Visual, &mut NodeContext<'_>) -> R,
    ) -> Result<R> {
        let mut visual = self
            .node_mut(node)?
            .visual
            .take()
            .ok_or(Error::ReentrantVisualBorrow(node))?;
        let out = {
            let mut ctx = NodeContext::new(self, node);
            f(visual.as_mut(), &mut ctx)
        };
        if let Some(n) = self.nodes.get_mut(node)
            && n.visual.is_none()
        {
            n.visual = Some(visual);
        }
        Ok(out)
    }
}

impl fmt::Debug for VisualTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualTree")
            .field("nodes", &self.nodes.len())
            .field("attached", &self.attached)
            .finish()
    }
}
