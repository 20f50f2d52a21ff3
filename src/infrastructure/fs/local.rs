//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{DirEntry, FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temp file + rename so a crash never leaves a
/// half-written page behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    /// Walk `root` without any ignore filtering (hidden files included),
    /// in a stable order, yielding parents before children.
    fn walk(root: &Path) -> ignore::Walk {
        WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
    }
}

fn walk_error(err: ignore::Error) -> FsError {
    match err.io_error() {
        Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
            FsError::Other(format!("permission denied while walking: {}", err))
        }
        _ => FsError::Other(err.to_string()),
    }
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> FsResult<()> {
    let target = fs::read_link(from).map_err(|e| FsError::from_io(from, e))?;
    if fs::symlink_metadata(to).is_ok() {
        fs::remove_file(to).map_err(|e| FsError::from_io(to, e))?;
    }
    std::os::unix::fs::symlink(&target, to).map_err(|e| FsError::from_io(to, e))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> FsResult<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| FsError::from_io(from, e))
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))?;
        tmp.write_all(content)
            .map_err(|e| FsError::from_io(tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn remove_all(&self, path: &Path) -> FsResult<()> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(FsError::from_io(path, e)),
        };

        let result = if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        result.map_err(|e| FsError::from_io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn copy_dir_contents(&self, from: &Path, to: &Path) -> FsResult<()> {
        if !from.is_dir() {
            return Err(FsError::NotFound(from.to_path_buf()));
        }
        fs::create_dir_all(to).map_err(|e| FsError::from_io(to, e))?;

        for entry in Self::walk(from) {
            let entry = entry.map_err(walk_error)?;
            if entry.depth() == 0 {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| FsError::Other(e.to_string()))?;
            let dest = to.join(rel);

            let Some(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                fs::create_dir_all(&dest).map_err(|e| FsError::from_io(&dest, e))?;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &dest)?;
            } else {
                fs::copy(entry.path(), &dest).map_err(|e| FsError::from_io(entry.path(), e))?;
            }
        }

        Ok(())
    }

    fn list_entries(&self, dir: &Path) -> FsResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))? {
            let entry = entry.map_err(|e| FsError::from_io(dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| FsError::from_io(&entry.path(), e))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in Self::walk(dir) {
            let entry = entry.map_err(walk_error)?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if entry.depth() == 0 || is_dir {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(dir) {
                files.push(rel.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("index.html");
        let fs = LocalFs::new();

        fs.write(&file, b"<head></head>").unwrap();
        let content = fs.read(&file).unwrap();

        assert_eq!(content, b"<head></head>");
    }

    #[test]
    fn local_fs_round_trips_non_utf8_bytes() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("gtag.js");
        std::fs::write(&file, b"<!-- caf\xe9 -->").unwrap();
        let fs = LocalFs::new();

        assert_eq!(fs.read(&file).unwrap(), b"<!-- caf\xe9 -->");

        let copy = dir.path().join("copy.js");
        fs.write(&copy, &fs.read(&file).unwrap()).unwrap();
        assert_eq!(std::fs::read(&copy).unwrap(), b"<!-- caf\xe9 -->");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("build").join("html").join("index.html");
        let fs = LocalFs::new();

        fs.write(&file, b"content").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn local_fs_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();

        let err = fs.read(&dir.path().join("gtag.js")).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn local_fs_remove_all_handles_files_dirs_and_missing() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let file = dir.path().join("objects.inv");
        let tree = dir.path().join("_static");
        fs.write(&file, b"x").unwrap();
        fs.write(&tree.join("css").join("a.css"), b"y").unwrap();

        fs.remove_all(&file).unwrap();
        fs.remove_all(&tree).unwrap();
        fs.remove_all(&dir.path().join("never-existed")).unwrap();

        assert!(!file.exists());
        assert!(!tree.exists());
    }

    #[test]
    fn local_fs_copy_dir_contents_includes_hidden_entries() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let src = dir.path().join("html");
        let dst = dir.path().join("site");
        fs.write(&src.join("index.html"), b"index").unwrap();
        fs.write(&src.join(".nojekyll"), b"").unwrap();
        fs.write(&src.join("_static").join("app.js"), b"js").unwrap();
        fs.write(&src.join(".hidden").join("x.txt"), b"x").unwrap();

        fs.copy_dir_contents(&src, &dst).unwrap();

        assert_eq!(fs.read(&dst.join("index.html")).unwrap(), b"index");
        assert!(dst.join(".nojekyll").exists());
        assert_eq!(fs.read(&dst.join("_static/app.js")).unwrap(), b"js");
        assert_eq!(fs.read(&dst.join(".hidden/x.txt")).unwrap(), b"x");
    }

    #[test]
    fn local_fs_copy_dir_contents_overwrites_existing() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let src = dir.path().join("html");
        let dst = dir.path().join("site");
        fs.write(&src.join("index.html"), b"new").unwrap();
        fs.write(&dst.join("index.html"), b"old").unwrap();
        fs.write(&dst.join("CNAME"), b"docs.example.com").unwrap();

        fs.copy_dir_contents(&src, &dst).unwrap();

        assert_eq!(fs.read(&dst.join("index.html")).unwrap(), b"new");
        assert_eq!(fs.read(&dst.join("CNAME")).unwrap(), b"docs.example.com");
    }

    #[test]
    fn local_fs_copy_dir_contents_missing_source() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();

        let err = fs
            .copy_dir_contents(&dir.path().join("missing"), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn local_fs_list_entries_sorted_with_kinds() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        fs.write(&dir.path().join("index.html"), b"").unwrap();
        fs.write(&dir.path().join(".buildinfo"), b"").unwrap();
        fs.create_dir_all(&dir.path().join("_static")).unwrap();

        let entries = fs.list_entries(dir.path()).unwrap();

        assert_eq!(
            entries,
            vec![
                DirEntry::file(".buildinfo"),
                DirEntry::dir("_static"),
                DirEntry::file("index.html"),
            ]
        );
    }

    #[test]
    fn local_fs_list_files_is_recursive_and_relative() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        fs.write(&dir.path().join("index.html"), b"").unwrap();
        fs.write(&dir.path().join("_static/css/theme.css"), b"").unwrap();
        fs.create_dir_all(&dir.path().join("empty")).unwrap();

        let files = fs.list_files(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("_static/css/theme.css"),
                PathBuf::from("index.html"),
            ]
        );
    }
}
