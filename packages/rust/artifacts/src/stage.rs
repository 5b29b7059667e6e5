//! Staging: copy the source docs tree into the handbook directory.

use std::path::Path;

use tracing::{debug, info, instrument};

use handbookgen_shared::{HandbookError, Result};

/// Result of staging the docs tree.
#[derive(Debug)]
pub struct StageResult {
    /// Number of files copied into the destination.
    pub file_count: usize,
}

/// Copy the whole docs tree from `source_root` into `destination_root`.
///
/// An existing destination is a fatal precondition error unless `overwrite`
/// is set, in which case it is removed first. Nothing is written when the
/// precondition fails.
#[instrument(fields(source = %source_root.display(), dest = %destination_root.display()))]
pub fn stage_docs(source_root: &Path, destination_root: &Path, overwrite: bool) -> Result<StageResult> {
    if !source_root.is_dir() {
        return Err(HandbookError::read(
            source_root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "docs directory not found"),
        ));
    }

    if destination_root.exists() {
        if !overwrite {
            return Err(HandbookError::Precondition {
                path: destination_root.to_path_buf(),
            });
        }
        debug!("removing existing destination");
        std::fs::remove_dir_all(destination_root)
            .map_err(|e| HandbookError::io(destination_root, e))?;
    }

    let mut file_count = 0;
    copy_tree(source_root, destination_root, &mut file_count)?;

    info!(file_count, "staged documentation");
    Ok(StageResult { file_count })
}

/// Recursively copy a directory tree, counting copied files.
fn copy_tree(src: &Path, dest: &Path, file_count: &mut usize) -> Result<()> {
    std::fs::create_dir_all(dest).map_err(|e| HandbookError::io(dest, e))?;

    for entry in std::fs::read_dir(src).map_err(|e| HandbookError::read(src, e))? {
        let entry = entry.map_err(|e| HandbookError::read(src, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| HandbookError::read(entry.path(), e))?;

        let from = entry.path();
        let to = dest.join(entry.file_name());

        if file_type.is_dir() {
            copy_tree(&from, &to, file_count)?;
        } else {
            std::fs::copy(&from, &to).map_err(|e| HandbookError::io(&to, e))?;
            *file_count += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};
    use tempfile::tempdir;

    #[test]
    fn stages_nested_tree() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("docs");
        create_dir_all(src.join("api/net")).unwrap();
        write(src.join("index.md"), "# Index").unwrap();
        write(src.join("api/client.md"), "# api.Client").unwrap();
        write(src.join("api/net/provider.md"), "# api.net.Provider").unwrap();

        let dest = dir.path().join("handbook");
        let result = stage_docs(&src, &dest, false).unwrap();

        assert_eq!(result.file_count, 3);
        assert!(dest.join("api/net/provider.md").is_file());
    }

    #[test]
    fn existing_destination_without_overwrite_fails() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("docs");
        create_dir_all(&src).unwrap();
        let dest = dir.path().join("handbook");
        create_dir_all(&dest).unwrap();

        let err = stage_docs(&src, &dest, false).unwrap_err();
        assert!(matches!(err, HandbookError::Precondition { .. }));
    }

    #[test]
    fn overwrite_replaces_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("docs");
        create_dir_all(&src).unwrap();
        write(src.join("new.md"), "# New").unwrap();

        let dest = dir.path().join("handbook");
        create_dir_all(&dest).unwrap();
        write(dest.join("stale.md"), "# Stale").unwrap();

        stage_docs(&src, &dest, true).unwrap();

        assert!(dest.join("new.md").is_file());
        assert!(!dest.join("stale.md").exists());
    }

    #[test]
    fn missing_source_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = stage_docs(
            &dir.path().join("nope"),
            &dir.path().join("handbook"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, HandbookError::Read { .. }));
    }
}
