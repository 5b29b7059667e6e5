//! Title extraction from Markdown documents.
//!
//! Parses a document with `tree-sitter-md` just far enough to locate the
//! first top-level heading and return its text. Both ATX (`# Title`) and
//! setext (`===` underline) headings count as top-level; a document with no
//! top-level heading yields an empty title, which is valid input downstream.

use streaming_iterator::StreamingIterator;
use tracing::trace;

use handbookgen_shared::{HandbookError, Result};

/// Query for level-1 headings in the tree-sitter-md block grammar.
const H1_QUERY: &str = "\
(atx_heading (atx_h1_marker) (inline) @title)
(setext_heading (paragraph (inline) @title) (setext_h1_underline))";

/// Extract the first top-level heading text from a Markdown document.
///
/// Returns the trimmed heading text, or an empty string when the document
/// has no top-level heading. Pure function of the document content.
///
/// # Errors
///
/// Returns [`HandbookError::Parse`] when the Markdown grammar cannot be
/// loaded or the parser fails to produce a syntax tree. Input that parses
/// but lacks a heading is NOT an error.
pub fn extract_title(text: &str) -> Result<String> {
    let language: tree_sitter::Language = tree_sitter_md::LANGUAGE.into();

    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| HandbookError::parse(format!("failed to load markdown grammar: {e}")))?;

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| HandbookError::parse("markdown parser produced no syntax tree"))?;

    let query = tree_sitter::Query::new(&language, H1_QUERY)
        .map_err(|e| HandbookError::parse(format!("invalid heading query: {e}")))?;

    let bytes = text.as_bytes();
    let mut cursor = tree_sitter::QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);

    // Take the heading earliest in document order, whichever pattern hit.
    let mut first: Option<tree_sitter::Node> = None;
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            if first.is_none_or(|f| node.start_byte() < f.start_byte()) {
                first = Some(node);
            }
        }
    }

    let title = match first {
        Some(node) => text[node.byte_range()].trim().to_string(),
        None => String::new(),
    };
    trace!(title = %title, "extracted document title");
    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_atx_heading() {
        let title = extract_title("# golem.runner\n\nSome body text.\n").unwrap();
        assert_eq!(title, "golem.runner");
    }

    #[test]
    fn extracts_setext_heading() {
        let title = extract_title("net.Provider\n============\n\nBody.\n").unwrap();
        assert_eq!(title, "net.Provider");
    }

    #[test]
    fn no_heading_yields_empty_title() {
        assert_eq!(extract_title("Just a paragraph.\n").unwrap(), "");
        assert_eq!(extract_title("").unwrap(), "");
    }

    #[test]
    fn lower_level_headings_do_not_count() {
        let text = "## Section\n\n### Subsection\n";
        assert_eq!(extract_title(text).unwrap(), "");
    }

    #[test]
    fn first_h1_wins_even_after_h2() {
        let text = "## Preamble\n\n# actual.Title\n\n# second.Title\n";
        assert_eq!(extract_title(text).unwrap(), "actual.Title");
    }

    #[test]
    fn heading_after_paragraph_is_found() {
        let text = "Intro paragraph.\n\n# pkg.sub.Class\n";
        assert_eq!(extract_title(text).unwrap(), "pkg.sub.Class");
    }

    #[test]
    fn fenced_code_is_not_a_heading() {
        let text = "```\n# not a heading\n```\n\n# real.Heading\n";
        assert_eq!(extract_title(text).unwrap(), "real.Heading");
    }

    #[test]
    fn bare_marker_without_text_yields_empty_title() {
        assert_eq!(extract_title("#\n\nbody\n").unwrap(), "");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(extract_title("#   spaced.Title   \n").unwrap(), "spaced.Title");
    }
}
