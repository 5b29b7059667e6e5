//! Reference tree construction.
//!
//! Walks a docs tree, extracts each file's module path from its first
//! top-level heading, and inserts the file into the summary tree keyed by
//! the dot-separated segments of that title. Directories and filenames are
//! sorted explicitly, so the resulting tree (and therefore render order) is
//! independent of OS iteration order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use handbookgen_markdown::extract_title;
use handbookgen_shared::{ConflictPolicy, HandbookError, Result, SummaryNode};

/// Build the reference tree for every `.md` file under `md_root`,
/// mutating `root` in place.
///
/// Files are processed grouped by directory: directories in lexicographic
/// order (the root itself first), filenames sorted within each directory.
/// A file that cannot be read aborts the whole run; a partial tree is never
/// produced.
#[instrument(skip(root), fields(md_root = %md_root.display()))]
pub fn build_reference(
    root: &mut SummaryNode,
    md_root: &Path,
    summary_prefix: &str,
    policy: ConflictPolicy,
) -> Result<()> {
    let groups = md_file_groups(md_root)?;
    let total: usize = groups.iter().map(|(_, files)| files.len()).sum();
    debug!(directories = groups.len(), files = total, "scanning docs tree");

    for (dirname, files) in &groups {
        for filename in files {
            process_file(root, md_root, dirname, filename, summary_prefix, policy)?;
        }
    }

    Ok(())
}

/// Enumerate all `.md` files under `md_root` in a single walk, grouped by
/// containing directory. Directories come out in lexicographic path order
/// (root first) and filenames are sorted within each group.
fn md_file_groups(md_root: &Path) -> Result<Vec<(PathBuf, Vec<String>)>> {
    let mut groups: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();

    for entry in WalkDir::new(md_root) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| md_root.to_path_buf());
            match e.into_io_error() {
                Some(io) => HandbookError::read(&path, io),
                None => HandbookError::read(
                    &path,
                    std::io::Error::other("directory traversal error"),
                ),
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        // Extension match is exact and case-sensitive: `.md` only.
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !name.ends_with(".md") {
            continue;
        }

        let dir = entry
            .path()
            .parent()
            .map_or_else(|| md_root.to_path_buf(), Path::to_path_buf);
        groups.entry(dir).or_default().push(name.to_string());
    }

    Ok(groups
        .into_iter()
        .map(|(dir, mut files)| {
            files.sort();
            (dir, files)
        })
        .collect())
}

/// Insert one document into the tree.
fn process_file(
    root: &mut SummaryNode,
    md_root: &Path,
    dirname: &Path,
    filename: &str,
    summary_prefix: &str,
    policy: ConflictPolicy,
) -> Result<()> {
    let file_path = dirname.join(filename);
    let text =
        std::fs::read_to_string(&file_path).map_err(|e| HandbookError::read(&file_path, e))?;

    let title = extract_title(&text).map_err(|e| match e {
        HandbookError::Parse { message } => {
            HandbookError::parse(format!("{}: {message}", file_path.display()))
        }
        other => other,
    })?;

    // An empty title tokenizes to a single empty-string segment, so the
    // document is still inserted rather than skipped.
    let node = root.descend(title.split('.'));

    if policy == ConflictPolicy::Error && node.filepath.is_some() {
        return Err(HandbookError::Conflict { path: title });
    }

    let relative = file_path
        .strip_prefix(md_root)
        .map_err(|_| HandbookError::read(&file_path, std::io::Error::other("file escaped docs root")))?;

    node.name = Some(title.clone());
    node.filepath = Some(format!("{summary_prefix}/{}", slash_join(relative)));

    trace!(file = %file_path.display(), title = %title, "inserted document");
    Ok(())
}

/// Join path components with forward slashes regardless of platform.
fn slash_join(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
