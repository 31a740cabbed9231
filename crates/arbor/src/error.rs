use std::result::Result as StdResult;

use thiserror::Error;

use crate::NodeId;

/// Result type for arbor operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The node does not exist in the tree.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The node's visual is already borrowed further up the call stack.
    #[error("visual re-entered during a call: {0:?}")]
    ReentrantVisualBorrow(NodeId),

    /// The node holds a different visual type than the caller asked for.
    #[error("node {node:?} is not a {expected}")]
    VisualTypeMismatch {
        /// Node that was accessed.
        node: NodeId,
        /// Requested visual type name.
        expected: &'static str,
    },

    /// Attaching the child would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Proposed parent.
        parent: NodeId,
        /// Proposed child.
        child: NodeId,
    },

    #[error("template: {0}")]
    /// A data template failed to build its visual.
    Template(String),

    #[error("invalid: {0}")]
    /// Invalid input error.
    Invalid(String),
}
