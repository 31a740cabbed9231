use crate::{
    NodeId,
    geom::{Rect, Size},
    layout::Align,
    state::NodeName,
    visual::Visual,
};

/// Node data stored in the tree arena.
pub struct Node {
    /// Visual behavior and state. Empty while the visual is borrowed for a call.
    pub(crate) visual: Option<Box<dyn Visual>>,
    /// Node name for dumps and traces.
    pub(crate) name: NodeName,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree.
    pub(crate) children: Vec<NodeId>,
    /// The control whose template created this node, if any.
    pub(crate) templated_parent: Option<NodeId>,

    /// Placement policy applied by the parent.
    pub(crate) align: Align,
    /// Size reported by the last measure.
    pub(crate) desired_size: Size,
    /// Available size passed to the last measure.
    pub(crate) previous_available: Option<Size>,
    /// Rectangle from the last arrange, relative to the parent.
    pub(crate) bounds: Rect,
    /// False when the node must be measured again.
    pub(crate) measure_valid: bool,
    /// False when the node must be arranged again.
    pub(crate) arrange_valid: bool,
}

impl Node {
    /// Build a fresh, unattached node around a visual.
    pub(crate) fn new(visual: Box<dyn Visual>) -> Self {
        let name = visual.name();
        Self {
            visual: Some(visual),
            name,
            parent: None,
            children: Vec::new(),
            templated_parent: None,
            align: Align::default(),
            desired_size: Size::ZERO,
            previous_available: None,
            bounds: Rect::zero(),
            measure_valid: false,
            arrange_valid: false,
        }
    }

    /// Return the node's name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the templated parent, if any.
    pub fn templated_parent(&self) -> Option<NodeId> {
        self.templated_parent
    }

    /// Return the alignment policy.
    pub fn align(&self) -> Align {
        self.align
    }

    /// Return the desired size from the last measure.
    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    /// Return the bounds from the last arrange.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Return true if the cached measurement is current.
    pub fn is_measure_valid(&self) -> bool {
        self.measure_valid
    }

    /// Return true if the cached arrangement is current.
    pub fn is_arrange_valid(&self) -> bool {
        self.arrange_valid
    }
}
