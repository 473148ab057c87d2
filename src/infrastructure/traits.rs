//! I/O boundary traits for testability
//!
//! The menu banner and the config template are the only files the
//! calculator touches; services go through this trait so tests can
//! substitute an in-memory implementation.

use std::fs;
use std::io;
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_nested_target_when_writing_then_creates_parents() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a/b/exprtree.toml");
        let fs = RealFileSystem;

        fs.ensure_parent(&target).unwrap();
        fs.write(&target, "precision = \"double\"\n").unwrap();

        assert!(fs.exists(&target));
        assert_eq!(
            fs.read_to_string(&target).unwrap(),
            "precision = \"double\"\n"
        );
    }

    #[test]
    fn given_bare_file_name_when_ensuring_parent_then_is_noop() {
        assert!(RealFileSystem.ensure_parent(Path::new("Menu.txt")).is_ok());
    }
}
