//! Local filesystem pack backend
//!
//! Wraps standard filesystem operations behind the `PackFile` interface.
//! All operations complete immediately (synchronous).

use std::io;
use std::path::{Path, PathBuf};

use super::PackFile;

/// A pack entry on the local filesystem
#[derive(Debug, Clone)]
pub struct DiskPackFile {
    path: PathBuf,
}

impl DiskPackFile {
    /// Create a pack entry for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the underlying path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Collect all files below `dir` into `out`, skipping unreadable entries
    fn collect_files(dir: &Path, out: &mut Vec<Box<dyn PackFile>>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                Self::collect_files(&path, out);
            } else {
                out.push(Box::new(DiskPackFile::new(path)));
            }
        }
    }
}

impl PackFile for DiskPackFile {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn is_directory(&self) -> bool {
        self.path.is_dir()
    }

    fn list_files_recursively(&self) -> Vec<Box<dyn PackFile>> {
        let mut files = Vec::new();
        Self::collect_files(&self.path, &mut files);
        files
    }

    fn relative_path_from(&self, root: &dyn PackFile) -> String {
        let root_path = PathBuf::from(root.abs_path());
        let relative = self.path.strip_prefix(&root_path).unwrap_or(&self.path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }

    fn abs_path(&self) -> String {
        self.path.display().to_string()
    }
}
