//! Shared test utilities for the mdtend test suite.
//!
//! Tests build small document trees inside a `tempfile::TempDir` rather than
//! shipping fixture directories: every tree a test needs fits in a few
//! `(relative path, content)` pairs.

use std::fs;
use std::path::Path;

/// Create files (and any missing parent directories) under `root`.
///
/// ```rust
/// let tmp = TempDir::new().unwrap();
/// write_tree(tmp.path(), &[
///     ("a.md", "[b](sub/b.md)"),
///     ("sub/b.md", ""),
/// ]);
/// ```
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
}
