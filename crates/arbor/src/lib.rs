//! Arbor: content presentation and scroll coordination for a retained-mode
//! visual tree.
//!
//! Visuals live in an arena-based [`VisualTree`] and are laid out in two
//! passes: measure reports desired sizes bottom-up, arrange hands out final
//! rectangles top-down.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`VisualTree`] - The node arena and layout driver
//! - [`Visual`] - The trait implemented by everything in the tree
//! - [`ContentPresenter`] - Hosts one piece of content as a single child
//! - [`ScrollViewer`] - Scrolls a presenter within its bounds
//! - [`ScrollableViewport`] - Offset, extent and viewport coordination
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Size, Vector, Point, Rect)
//! - [`property`] - Observable and attached properties
//! - [`template`] - Data templates that turn values into visuals

#![warn(missing_docs)]

/// Content model for presenters.
pub mod content;
/// Node context handed to visuals.
mod context;
/// Tree debugging output.
pub mod dump;
/// Error types.
pub mod error;
/// Node identifiers.
mod id;
/// Alignment policy.
pub mod layout;
/// Node storage.
mod node;
/// Single-content presenter.
pub mod presenter;
/// Observable and attached properties.
pub mod property;
/// Scroll state coordination.
pub mod scroll;
/// Scroll-hosting container.
pub mod scroll_viewer;
/// Node naming.
pub mod state;
/// Data templates.
pub mod template;
/// Built-in text visual.
pub mod text;
/// The visual tree arena.
mod tree;
/// The visual trait.
mod visual;

pub use arbor_geom as geom;
pub use content::{Content, DataValue, Value};
pub use context::NodeContext;
pub use error::{Error, Result};
pub use id::NodeId;
pub use layout::{Align, Alignment};
pub use node::Node;
pub use presenter::ContentPresenter;
pub use scroll::{
    HORIZONTAL_SCROLLBAR_VISIBILITY, ScrollBarQuantity, ScrollBarVisibility, ScrollableViewport,
    VERTICAL_SCROLLBAR_VISIBILITY, coerce_offset,
};
pub use scroll_viewer::ScrollViewer;
pub use text::TextBlock;
pub use tree::VisualTree;
pub use visual::Visual;
