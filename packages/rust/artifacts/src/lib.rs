//! Handbook artifacts: the staged docs tree and the rendered summary.
//!
//! Staging copies the Markdown sources into the destination handbook
//! directory; the summary renderer turns a completed [`SummaryNode`] tree
//! into a table-of-contents outline via handlebars.
//!
//! [`SummaryNode`]: handbookgen_shared::SummaryNode

mod stage;
mod summary;

pub use stage::{StageResult, stage_docs};
pub use summary::{SummaryRenderer, write_summary};
