//! Per-component run configuration.
//!
//! The CLI assembles one immutable options value per enabled component and
//! hands it to that component's entry point. There is no config file and no
//! ambient state: everything a component needs arrives as a parameter.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {0}: {1}")]
    InvalidPattern(&'static str, regex::Error),
}

/// Options for the link-fixing pass. Which files qualify is decided by the
/// [`crate::filter::PathFilter`] passed alongside.
#[derive(Debug, Clone)]
pub struct LinkFixOptions {
    /// Traversal root; also the directory rewritten links become relative to.
    pub base_dir: PathBuf,
    /// Replace `\` with `/` in rewritten targets.
    pub normalize_separators: bool,
}

/// Options for sidebar generation.
#[derive(Debug, Clone)]
pub struct SidebarOptions {
    /// Traversal root for the index.
    pub base_dir: PathBuf,
    pub sort_by: SortBy,
    /// Replace `\` with `/` in sidebar link paths.
    pub normalize_separators: bool,
    /// Destination file for the generated sidebar.
    pub output_path: PathBuf,
    pub output_behavior: OutputBehavior,
}

/// Sibling ordering within each sidebar level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortBy {
    /// Lexicographic by path, ascending.
    Name,
    /// Lexicographic by path, descending.
    NameDesc,
    /// Creation time, oldest first.
    Created,
    /// Creation time, newest first.
    CreatedDesc,
    /// Modification time, oldest first.
    Modified,
    /// Modification time, newest first.
    ModifiedDesc,
}

impl SortBy {
    /// Descending variants sort by the same key, reversed.
    pub fn is_descending(self) -> bool {
        matches!(
            self,
            SortBy::NameDesc | SortBy::CreatedDesc | SortBy::ModifiedDesc
        )
    }
}

/// What to do when the sidebar output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputBehavior {
    /// Always replace the output file's contents.
    Overwrite,
    /// Append a blank line and the generated text to an existing file.
    Append,
    /// Do nothing at all if the output file exists.
    Skip,
}
