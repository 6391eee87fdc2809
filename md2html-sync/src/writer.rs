//! Atomic file output.
//!
//! HTML pages go through [`write_page`]:
//!
//! 1. Normalise line endings to LF.
//! 2. Create the destination's parent directories.
//! 3. Write to `<path>.md2html.tmp`.
//! 4. Rename to the final path (atomic on POSIX).
//!
//! Assets go through [`copy_asset`], which copies bytes and permissions.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of handling one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WriteResult {
    /// An HTML page was written.
    Written { path: PathBuf },
    /// An asset was copied.
    Copied { path: PathBuf },
    /// The destination was left alone.
    Skipped { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Copied { path }
            | WriteResult::Skipped { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// write_page
// ---------------------------------------------------------------------------

/// Atomically write `content` to `path`, replacing any existing file.
pub fn write_page(path: &Path, content: &str) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}.md2html.tmp", path.display()));
    write_page_with_tmp(path, content, &tmp)
}

fn write_page_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<WriteResult, SyncError> {
    let normalized = content.replace("\r\n", "\n");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, normalized).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::debug!(path = %path.display(), "wrote page");
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// copy_asset
// ---------------------------------------------------------------------------

/// Copy `source` to `destination`, creating parent directories.
pub fn copy_asset(source: &Path, destination: &Path) -> Result<WriteResult, SyncError> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::copy(source, destination).map_err(|e| io_err(source, e))?;

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        "copied asset"
    );
    Ok(WriteResult::Copied {
        path: destination.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        let result = write_page(&path, "<p>hello</p>").unwrap();
        assert_eq!(result, WriteResult::Written { path: path.clone() });
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>hello</p>");
    }

    #[test]
    fn existing_file_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        fs::write(&path, "old").unwrap();
        write_page(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.html");
        write_page(&path, "data").unwrap();
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "tmp files left behind: {leftovers:?}");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/c/page.html");
        write_page(&path, "nested").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn crlf_is_normalised_to_lf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crlf.html");
        write_page(&path, "line1\r\nline2\r\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line1\nline2\n");
    }

    #[test]
    fn failed_rename_cleans_up_tmp() {
        let tmp = TempDir::new().unwrap();
        // A directory at the destination makes the rename fail.
        let path = tmp.path().join("taken");
        fs::create_dir_all(path.join("child")).unwrap();
        let tmp_file = tmp.path().join("taken.md2html.tmp");
        let err = write_page_with_tmp(&path, "x", &tmp_file).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
        assert!(!tmp_file.exists());
    }

    #[test]
    fn copy_asset_preserves_bytes() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("in/logo.png");
        fs::create_dir_all(src.parent().unwrap()).unwrap();
        fs::write(&src, [0u8, 159, 146, 150]).unwrap();
        let dst = tmp.path().join("out/img/logo.png");
        let result = copy_asset(&src, &dst).unwrap();
        assert_eq!(result.path(), dst.as_path());
        assert_eq!(fs::read(&dst).unwrap(), vec![0u8, 159, 146, 150]);
    }

    #[test]
    fn copy_missing_source_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = copy_asset(&tmp.path().join("nope"), &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }
}
