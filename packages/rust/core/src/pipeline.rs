//! End-to-end `generate` pipeline: stage docs, build the reference tree,
//! render the summary, write it out.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use handbookgen_artifacts::{SummaryRenderer, stage_docs, write_summary};
use handbookgen_shared::{ConflictPolicy, HandbookError, Result, SummaryNode};

use crate::reference::build_reference;

/// Segment key of the reference section in the root summary node.
const REFERENCE_SEGMENT: &str = "reference";

/// Configuration for the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory of Markdown sources to scan.
    pub docs_dir: PathBuf,
    /// Destination directory the handbook is assembled into.
    pub handbook_dir: PathBuf,
    /// Replace an existing handbook directory instead of failing.
    pub overwrite: bool,
    /// Prefix prepended to every reference path in the summary.
    pub summary_prefix: String,
    /// Display title for the reference section.
    pub reference_title: String,
    /// Where the rendered summary goes.
    pub output: SummaryOutput,
    /// Behavior when two documents share a module path.
    pub on_conflict: ConflictPolicy,
    /// Optional user template replacing the built-in summary layout.
    pub template: Option<PathBuf>,
}

/// Output target for the rendered summary: a file or stdout, never both.
#[derive(Debug, Clone)]
pub enum SummaryOutput {
    /// Write to this file path.
    File(PathBuf),
    /// Print to standard output.
    Stdout,
}

/// Result of the `generate` pipeline.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of files staged into the handbook directory.
    pub file_count: usize,
    /// Where the summary was written; `None` for stdout.
    pub summary_path: Option<PathBuf>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &GenerateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &GenerateResult) {}
}

/// Run the full handbook generation pipeline.
///
/// 1. Stage the docs tree into the handbook directory
/// 2. Build the reference tree from extracted titles
/// 3. Render the summary template
/// 4. Write the summary to its output target
///
/// Every step is fatal on failure; no partial handbook is left behind a
/// successful return.
#[instrument(skip_all, fields(docs = %config.docs_dir.display(), handbook = %config.handbook_dir.display()))]
pub fn generate(config: &GenerateConfig, progress: &dyn ProgressReporter) -> Result<GenerateResult> {
    let start = Instant::now();
    info!("starting handbook generation");

    // --- Phase 1: staging ---
    progress.phase("Staging documentation");
    let staged = stage_docs(&config.docs_dir, &config.handbook_dir, config.overwrite)?;

    // --- Phase 2: reference tree ---
    progress.phase("Scanning Markdown files");
    let mut summary = SummaryNode::new();
    let reference = summary.child(REFERENCE_SEGMENT);
    reference.name = Some(config.reference_title.clone());
    build_reference(
        reference,
        &config.docs_dir,
        &config.summary_prefix,
        config.on_conflict,
    )?;

    // --- Phase 3: render ---
    progress.phase("Rendering summary");
    let renderer = match &config.template {
        Some(path) => SummaryRenderer::from_template_file(path)?,
        None => SummaryRenderer::new()?,
    };
    let rendered = renderer.render(&summary)?;

    // --- Phase 4: write ---
    let summary_path = match &config.output {
        SummaryOutput::File(path) => {
            progress.phase("Writing summary");
            write_summary(path, &rendered)?;
            Some(path.clone())
        }
        SummaryOutput::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| writeln!(stdout))
                .map_err(|e| HandbookError::io("<stdout>", e))?;
            None
        }
    };

    let result = GenerateResult {
        file_count: staged.file_count,
        summary_path,
        elapsed: start.elapsed(),
    };
    info!(
        files = result.file_count,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "handbook generated"
    );
    progress.done(&result);
    Ok(result)
}
