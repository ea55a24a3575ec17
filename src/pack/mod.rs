//! Pack file abstraction
//!
//! Provides a unified interface over the entries of a resource pack so the
//! texture index can be built from any backing store. The shipped backend
//! reads from the local filesystem; archive-backed packs only need another
//! `PackFile` implementation.

pub mod disk;

pub use disk::DiskPackFile;

use std::fmt::Debug;
use std::io;

/// One entry (file or directory) inside a resource pack
///
/// Listing and reading are the only operations the index builder needs;
/// everything else about the backing store stays behind this trait.
pub trait PackFile: Debug + Send + Sync {
    /// Check if the entry exists
    fn exists(&self) -> bool;

    /// Check if the entry is a directory
    fn is_directory(&self) -> bool;

    /// List every file (not directory) below this entry, recursively
    ///
    /// Unreadable subtrees are skipped. No ordering is guaranteed.
    fn list_files_recursively(&self) -> Vec<Box<dyn PackFile>>;

    /// Path of this entry relative to `root`, with `/` separators
    fn relative_path_from(&self, root: &dyn PackFile) -> String;

    /// Read the entire contents of the entry
    fn read(&self) -> io::Result<Vec<u8>>;

    /// Absolute path of the entry, for diagnostics
    fn abs_path(&self) -> String;
}

/// Read a pack entry as UTF-8 text, tolerating a leading byte-order mark
pub fn read_text(file: &dyn PackFile) -> io::Result<String> {
    let bytes = file.read()?;
    let text = String::from_utf8(bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}
