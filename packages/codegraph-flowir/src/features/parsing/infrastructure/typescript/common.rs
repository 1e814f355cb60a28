//! Node traversal and span helpers shared by the lowering

use crate::errors::{ExtractError, Result};
use crate::shared::models::Span;
use tree_sitter::Node;

/// Convert tree-sitter Node to Span (1-indexed lines and columns)
pub fn node_to_span(node: &Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        (start.row + 1) as u32,
        (start.column + 1) as u32,
        (end.row + 1) as u32,
        (end.column + 1) as u32,
    )
}

/// Extract text from a node
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Named children, comments skipped
pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

/// Required field child
pub fn field<'t>(node: &Node<'t>, name: &str) -> Result<Node<'t>> {
    node.child_by_field_name(name).ok_or_else(|| {
        ExtractError::malformed(
            format!("{} without '{}'", node.kind(), name),
            Some(node_to_span(node)),
        )
    })
}

/// Whether any anonymous child is exactly `token` (`get`, `static`, `?.`)
pub fn has_token(node: &Node, token: &str) -> bool {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .any(|c| !c.is_named() && c.kind() == token)
}

/// First ERROR or MISSING node in document order
pub fn first_syntax_error<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find_map(|c| first_syntax_error(&c))
}
