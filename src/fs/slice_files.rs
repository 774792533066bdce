use std::path::{Path, PathBuf};

use crate::error::StateError;
use crate::models::Slice;
use crate::parser::frontmatter;

/// Load every `*.md` slice file in `dir`, sorted by slice id.
///
/// # Errors
///
/// - [`StateError::DirNotFound`] if `dir` cannot be listed
/// - [`StateError::Io`] if an entry of `dir` cannot be read
/// - [`StateError::NoSliceFiles`] if it holds no markdown files
/// - [`StateError::ParseFailure`] naming the first file that cannot be read or parsed
pub fn read_slices(dir: &Path) -> Result<Vec<Slice>, StateError> {
    let entries =
        std::fs::read_dir(dir).map_err(|_| StateError::DirNotFound(dir.to_path_buf()))?;
    let paths = markdown_files(dir, entries.map(|entry| entry.map(|e| e.path())))?;

    let mut slices = Vec::with_capacity(paths.len());
    for path in paths {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = std::fs::read_to_string(&path).map_err(|e| StateError::ParseFailure {
            file: file.clone(),
            reason: e.to_string(),
        })?;
        let (fields, _body) = frontmatter::parse(&content).map_err(|e| {
            StateError::ParseFailure {
                file: file.clone(),
                reason: e.to_string(),
            }
        })?;

        slices.push(Slice::from_fields(&fields));
    }

    slices.sort_by(|a, b| a.id.cmp(&b.id));
    tracing::debug!(count = slices.len(), dir = %dir.display(), "read slice files");

    Ok(slices)
}

/// Markdown files among `entries`. The first unreadable entry fails the scan.
fn markdown_files<I>(dir: &Path, entries: I) -> Result<Vec<PathBuf>, StateError>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| StateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(StateError::NoSliceFiles(dir.to_path_buf()));
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SliceStatus;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_reads_and_sorts_by_id() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.md", "---\nid: S-02\nstatus: pending\n---\n");
        write(tmp.path(), "a.md", "---\nid: S-10\nstatus: complete\n---\n");
        write(tmp.path(), "c.md", "---\nid: S-01\nstatus: in_progress\n---\n");

        let slices = read_slices(tmp.path()).unwrap();
        let ids: Vec<_> = slices.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["S-01", "S-02", "S-10"]);
        assert_eq!(slices[0].status, SliceStatus::InProgress);
    }

    #[test]
    fn test_ignores_other_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "S-01.md", "---\nid: S-01\nstatus: pending\n---\n");
        write(tmp.path(), "notes.txt", "not a slice");
        std::fs::create_dir(tmp.path().join("nested.md")).unwrap();

        let slices = read_slices(tmp.path()).unwrap();
        assert_eq!(slices.len(), 1);
    }

    #[test]
    fn test_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let err = read_slices(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, StateError::DirNotFound(_)));
    }

    #[test]
    fn test_no_slice_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.txt", "hello");
        let err = read_slices(tmp.path()).unwrap_err();
        assert!(matches!(err, StateError::NoSliceFiles(_)));
    }

    #[test]
    fn test_parse_failure_names_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "S-01.md", "---\nid: S-01\n");
        let err = read_slices(tmp.path()).unwrap_err();
        match err {
            StateError::ParseFailure { file, .. } => assert_eq!(file, "S-01.md"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unreadable_entry_fails_the_scan() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "S-01.md", "---\nid: S-01\n---\n");
        let entries = vec![
            Ok(tmp.path().join("S-01.md")),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "stale handle")),
        ];

        let err = markdown_files(tmp.path(), entries).unwrap_err();
        match err {
            StateError::Io { path, source } => {
                assert_eq!(path, tmp.path());
                assert_eq!(source.to_string(), "stale handle");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
