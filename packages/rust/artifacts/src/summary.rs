//! Summary rendering: turn the summary tree into a SUMMARY.md outline.
//!
//! Rendering goes through handlebars so the outline format can be replaced
//! with a user-supplied template. The default template produces a
//! GitBook-style nested bullet list: one entry per node, depth-first in
//! insertion order, linked when the node carries a filepath.

use std::path::Path;

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value;
use tracing::debug;

use handbookgen_shared::{HandbookError, Result, SummaryNode};

/// Registered name of the summary template.
const TEMPLATE_NAME: &str = "summary";

/// Default summary template. `summary_tree` walks the node tree.
const DEFAULT_TEMPLATE: &str = "# Summary\n\n{{summary_tree this}}";

/// Renders a [`SummaryNode`] tree into a textual outline.
#[derive(Debug)]
pub struct SummaryRenderer {
    handlebars: Handlebars<'static>,
}

impl SummaryRenderer {
    /// Create a renderer with the built-in SUMMARY.md template.
    pub fn new() -> Result<Self> {
        let mut handlebars = base_registry();
        handlebars
            .register_template_string(TEMPLATE_NAME, DEFAULT_TEMPLATE)
            .map_err(|e| HandbookError::render(e.to_string()))?;
        Ok(Self { handlebars })
    }

    /// Create a renderer from a user-supplied handlebars template file.
    ///
    /// The template receives the root [`SummaryNode`] as context and may use
    /// the `summary_tree` helper to emit the nested outline.
    pub fn from_template_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HandbookError::read(path, e))?;

        let mut handlebars = base_registry();
        handlebars
            .register_template_string(TEMPLATE_NAME, content)
            .map_err(|e| HandbookError::render(format!("{}: {e}", path.display())))?;

        debug!(template = %path.display(), "loaded summary template");
        Ok(Self { handlebars })
    }

    /// Render the completed summary tree.
    pub fn render(&self, summary: &SummaryNode) -> Result<String> {
        self.handlebars
            .render(TEMPLATE_NAME, summary)
            .map_err(|e| HandbookError::render(e.to_string()))
    }
}

/// Write a rendered summary to a file, creating parent directories.
pub fn write_summary(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HandbookError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| HandbookError::io(path, e))
}

/// Handlebars registry with the `summary_tree` helper installed.
fn base_registry() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("summary_tree", Box::new(summary_tree_helper));
    handlebars
}

/// `{{summary_tree <node>}}`: emit the nested outline for a node's subtree.
fn summary_tree_helper(
    h: &Helper,
    _: &Handlebars,
    ctx: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let node = h.param(0).map_or_else(|| ctx.data(), |p| p.value());
    write_entries(node, 0, out)
}

/// Depth-first walk over `children`, two spaces of indent per level.
/// Nodes without a filepath render as unlinked headings; a node's label is
/// its name, falling back to the segment key for structural nodes.
fn write_entries(node: &Value, depth: usize, out: &mut dyn Output) -> HelperResult {
    let Some(children) = node.get("children").and_then(Value::as_object) else {
        return Ok(());
    };

    for (segment, child) in children {
        let label = child
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(segment);
        let indent = "  ".repeat(depth);

        match child.get("filepath").and_then(Value::as_str) {
            Some(filepath) => out.write(&format!("{indent}* [{label}]({filepath})\n"))?,
            None => out.write(&format!("{indent}* {label}\n"))?,
        }

        write_entries(child, depth + 1, out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SummaryNode {
        let mut root = SummaryNode::new();
        let reference = root.child("reference");
        reference.name = Some("API Reference".into());

        let client = reference.descend(["API", "Client"]);
        client.name = Some("API.Client".into());
        client.filepath = Some("pkg/client.md".into());

        let server = reference.descend(["API", "Server"]);
        server.name = Some("API.Server".into());
        server.filepath = Some("pkg/server.md".into());

        root
    }

    #[test]
    fn renders_nested_outline() {
        let rendered = SummaryRenderer::new().unwrap().render(&sample_tree()).unwrap();

        // Unlinked reference node, two spaces of indent per level,
        // children in insertion order.
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "# Summary");
        assert_eq!(lines[2], "* API Reference");
        assert_eq!(lines[3], "  * API");
        assert_eq!(lines[4], "    * [API.Client](pkg/client.md)");
        assert_eq!(lines[5], "    * [API.Server](pkg/server.md)");
    }

    #[test]
    fn structural_nodes_render_unlinked() {
        let rendered = SummaryRenderer::new().unwrap().render(&sample_tree()).unwrap();
        assert!(rendered.contains("* API\n"));
        assert!(!rendered.contains("[API]("));
    }

    #[test]
    fn insertion_order_is_render_order() {
        let mut root = SummaryNode::new();
        root.child("zeta").filepath = Some("z.md".into());
        root.child("alpha").filepath = Some("a.md".into());

        let rendered = SummaryRenderer::new().unwrap().render(&root).unwrap();
        let z = rendered.find("z.md").unwrap();
        let a = rendered.find("a.md").unwrap();
        assert!(z < a);
    }

    #[test]
    fn custom_template_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.hbs");
        std::fs::write(&path, "== Contents ==\n{{summary_tree this}}").unwrap();

        let rendered = SummaryRenderer::from_template_file(&path)
            .unwrap()
            .render(&sample_tree())
            .unwrap();
        assert!(rendered.starts_with("== Contents =="));
        assert!(rendered.contains("[API.Client](pkg/client.md)"));
    }

    #[test]
    fn malformed_template_is_a_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.hbs");
        std::fs::write(&path, "{{#each children}}").unwrap();

        let err = SummaryRenderer::from_template_file(&path).unwrap_err();
        assert!(matches!(err, HandbookError::Render(_)));
    }

    #[test]
    fn write_summary_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handbook/.SUMMARY.md");
        write_summary(&path, "# Summary\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Summary\n");
    }
}
