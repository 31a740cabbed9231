use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    NodeId, VisualTree,
    error::{Error, Result},
};

/// Traverses a tree of nodes and returns a string showing the node names,
/// layout results and invalidation state of each node. This is a debug
/// function.
pub fn dump(tree: &VisualTree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], but with ANSI colors for display in a terminal.
pub fn dump_ansi(tree: &VisualTree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Map a buffer write failure into our error type.
fn write_err(e: io::Error) -> Error {
    Error::Invalid(format!("dump: {e}"))
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> io::Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, tree: &VisualTree, node_id: NodeId, level: usize) -> Result<()> {
    let node = tree.node(node_id).ok_or(Error::NodeNotFound(node_id))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}").map_err(write_err)?;
    buffer
        .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))
        .map_err(write_err)?;
    write!(buffer, "{}", node.name()).map_err(write_err)?;
    buffer.reset().map_err(write_err)?;
    write!(buffer, " {node_id:?}").map_err(write_err)?;

    let mut indicators = Vec::new();
    if !node.is_measure_valid() {
        indicators.push("measure-stale");
    } else if !node.is_arrange_valid() {
        indicators.push("arrange-stale");
    }
    if node.templated_parent().is_some() {
        indicators.push("templated");
    }
    for (i, indicator) in indicators.iter().enumerate() {
        write!(buffer, "{}", if i == 0 { " " } else { ", " }).map_err(write_err)?;
        let color = match *indicator {
            "templated" => Color::Magenta,
            _ => Color::Yellow,
        };
        buffer
            .set_color(ColorSpec::new().set_fg(Some(color)))
            .map_err(write_err)?;
        write!(buffer, "{indicator}").map_err(write_err)?;
        buffer.reset().map_err(write_err)?;
    }
    writeln!(buffer).map_err(write_err)?;

    write_field(buffer, &indent, "bounds:", &node.bounds().to_string()).map_err(write_err)?;
    write_field(buffer, &indent, "desired:", &node.desired_size().to_string())
        .map_err(write_err)?;

    for child in node.children() {
        dump_node(buffer, tree, *child, level + 1)?;
    }
    Ok(())
}
