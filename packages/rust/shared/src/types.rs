//! Core domain types for handbook summaries.

use indexmap::IndexMap;
use serde::Serialize;

// ---------------------------------------------------------------------------
// SummaryNode
// ---------------------------------------------------------------------------

/// A node in the handbook navigation tree.
///
/// Each node owns its children; the map is keyed by one dot-separated
/// segment of an extracted document title, and insertion order is preserved
/// because it determines render order. A node with a `filepath` is a
/// terminal for some document; a node without one is purely structural.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryNode {
    /// Display label: the full extracted title of the owning document,
    /// or `None` for structural nodes no document maps to exactly.
    pub name: Option<String>,
    /// Summary-relative reference to the originating document, with the
    /// caller-supplied prefix prepended. Forward slashes on every platform.
    pub filepath: Option<String>,
    /// Child nodes keyed by path segment, in insertion order.
    pub children: IndexMap<String, SummaryNode>,
}

impl SummaryNode {
    /// Create an empty node with no name, no filepath, no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or create the child for one path segment.
    ///
    /// Idempotent: re-requesting an existing segment returns the same node
    /// rather than creating a duplicate.
    pub fn child(&mut self, segment: &str) -> &mut SummaryNode {
        self.children.entry(segment.to_string()).or_default()
    }

    /// Walk from this node, descending/creating one child per segment.
    pub fn descend<'a, I>(&mut self, segments: I) -> &mut SummaryNode
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for segment in segments {
            node = node.child(segment);
        }
        node
    }

    /// Whether this node carries no document of its own.
    pub fn is_structural(&self) -> bool {
        self.filepath.is_none()
    }
}

// ---------------------------------------------------------------------------
// ConflictPolicy
// ---------------------------------------------------------------------------

/// What to do when two documents resolve to the exact same module path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The later file in sort order silently overwrites `name`/`filepath`
    /// on the existing node; previously inserted children are untouched.
    #[default]
    Overwrite,
    /// Fail the run with [`crate::HandbookError::Conflict`].
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_is_idempotent() {
        let mut root = SummaryNode::new();
        root.child("api").name = Some("api".into());
        root.child("api").filepath = Some("docs/api.md".into());

        assert_eq!(root.children.len(), 1);
        let api = &root.children["api"];
        assert_eq!(api.name.as_deref(), Some("api"));
        assert_eq!(api.filepath.as_deref(), Some("docs/api.md"));
    }

    #[test]
    fn children_preserve_insertion_order() {
        let mut root = SummaryNode::new();
        root.child("zeta");
        root.child("alpha");
        root.child("mid");

        let keys: Vec<_> = root.children.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn descend_shares_prefix_nodes() {
        let mut root = SummaryNode::new();
        root.descend("pkg.sub.Client".split('.')).filepath = Some("a".into());
        root.descend("pkg.sub.Server".split('.')).filepath = Some("b".into());

        assert_eq!(root.children.len(), 1);
        let sub = &root.children["pkg"].children["sub"];
        assert_eq!(sub.children.len(), 2);
        assert!(sub.is_structural());
    }

    #[test]
    fn empty_segment_is_a_valid_key() {
        let mut root = SummaryNode::new();
        root.descend("".split('.')).filepath = Some("untitled.md".into());
        assert!(root.children.contains_key(""));
    }

    #[test]
    fn serializes_children_in_order() {
        let mut root = SummaryNode::new();
        root.child("b").name = Some("B".into());
        root.child("a").name = Some("A".into());

        let json = serde_json::to_string(&root).expect("serialize");
        let b_pos = json.find("\"b\"").expect("b key");
        let a_pos = json.find("\"a\"").expect("a key");
        assert!(b_pos < a_pos, "insertion order must survive serialization");
    }
}
