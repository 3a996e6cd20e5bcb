//! Sidebar generation: a nested bullet-list index of a document tree.
//!
//! ## Output Format
//!
//! One line per entry, tab-indented to its depth, each a Markdown link:
//!
//! ```text
//! - [a](a.md)
//! - [sub](sub)
//! 	- [b](sub/b.md)
//! 	- [deep](sub/deep)
//! 		- [c](sub/deep/c.md)
//! ```
//!
//! Link paths are relative to the base directory, separator-normalized (when
//! enabled) and percent-encoded for URL safety. Line order is a pre-order
//! depth-first traversal: a directory's line comes first, then its children,
//! siblings ordered by the configured sort key.
//!
//! ## Two Phases
//!
//! 1. **Collect** — a filtered top-down walk records each directory's
//!    immediate children into a [`TreeIndex`]. Ignored directory names are
//!    pruned, ignored files and non-matching extensions excluded.
//! 2. **Render** — recursive descent over the index accumulates the output
//!    text. Rendering does no directory I/O; time-based sort keys stat the
//!    joined path, nothing else touches the filesystem.
//!
//! A directory reached by the walk is always listed; one with no qualifying
//! descendants simply has no lines beneath its own.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::config::{OutputBehavior, SidebarOptions, SortBy};
use crate::filter::{PathFilter, strip_extension};

/// Everything except alphanumerics, `/`, and the URL-unreserved marks is
/// percent-encoded.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a generation run did.
#[derive(Debug, PartialEq, Eq)]
pub enum SidebarOutcome {
    /// Output file already existed under `skip`; nothing was read or written.
    Skipped,
    Written { path: PathBuf, lines: usize },
}

/// Immediate children of one visited directory, paths relative to the base.
#[derive(Debug, Default)]
struct Listing {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

/// Flattened traversal result: directory → its filtered children. The root
/// is keyed by the empty path; every child directory has its own entry,
/// files are leaves.
#[derive(Debug, Default)]
pub struct TreeIndex {
    entries: HashMap<PathBuf, Listing>,
}

impl TreeIndex {
    /// Walk `base_dir` top-down, pruning ignored directories and filtering
    /// files. Entries within a directory are enumerated in name order so
    /// sort-key ties have a deterministic fallback.
    pub fn collect(base_dir: &Path, filter: &PathFilter) -> Result<Self, SidebarError> {
        let mut index = TreeIndex::default();
        visit(base_dir, Path::new(""), filter, &mut index)?;
        Ok(index)
    }
}

fn visit(
    abs_dir: &Path,
    rel_dir: &Path,
    filter: &PathFilter,
    index: &mut TreeIndex,
) -> Result<(), SidebarError> {
    let mut entries: Vec<fs::DirEntry> =
        fs::read_dir(abs_dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut listing = Listing::default();
    let mut subdirs = Vec::new();

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if filter.should_ignore(&name) {
            continue;
        }
        let rel = rel_dir.join(&name);
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            subdirs.push((entry.path(), rel.clone()));
            listing.dirs.push(rel);
        } else if file_type.is_file() && filter.extension_accepted(&name) {
            listing.files.push(rel);
        }
    }

    index.entries.insert(rel_dir.to_path_buf(), listing);

    for (abs, rel) in subdirs {
        visit(&abs, &rel, filter, index)?;
    }
    Ok(())
}

/// Generate the sidebar and write it out per the configured output behavior.
pub fn generate(
    options: &SidebarOptions,
    filter: &PathFilter,
) -> Result<SidebarOutcome, SidebarError> {
    // skip short-circuits before any traversal
    if options.output_behavior == OutputBehavior::Skip && options.output_path.exists() {
        return Ok(SidebarOutcome::Skipped);
    }

    let index = TreeIndex::collect(&options.base_dir, filter)?;
    let body = render(&index, options)?;

    match options.output_behavior {
        OutputBehavior::Append if options.output_path.exists() => {
            let mut file = fs::OpenOptions::new()
                .append(true)
                .open(&options.output_path)?;
            file.write_all(b"\n")?;
            file.write_all(body.as_bytes())?;
        }
        _ => fs::write(&options.output_path, &body)?,
    }

    Ok(SidebarOutcome::Written {
        path: options.output_path.clone(),
        lines: body.lines().count(),
    })
}

/// Render the bullet list from a collected index. Pure except for the stat
/// calls behind time-based sort keys.
pub fn render(index: &TreeIndex, options: &SidebarOptions) -> Result<String, SidebarError> {
    let mut out = String::new();
    emit_level(index, Path::new(""), 0, options, &mut out)?;
    Ok(out)
}

/// Sort key for one sibling. Within a run all keys are the same variant.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Name(String),
    Time(SystemTime),
}

fn sort_key(child: &Path, options: &SidebarOptions) -> Result<SortKey, SidebarError> {
    let key = match options.sort_by {
        SortBy::Name | SortBy::NameDesc => SortKey::Name(child.to_string_lossy().into_owned()),
        SortBy::Created | SortBy::CreatedDesc => {
            SortKey::Time(fs::metadata(options.base_dir.join(child))?.created()?)
        }
        SortBy::Modified | SortBy::ModifiedDesc => {
            SortKey::Time(fs::metadata(options.base_dir.join(child))?.modified()?)
        }
    };
    Ok(key)
}

fn emit_level(
    index: &TreeIndex,
    dir: &Path,
    depth: usize,
    options: &SidebarOptions,
    out: &mut String,
) -> Result<(), SidebarError> {
    let Some(listing) = index.entries.get(dir) else {
        return Ok(());
    };

    // directories and files sort together at each level
    let mut children: Vec<(&PathBuf, bool, SortKey)> = Vec::new();
    for d in &listing.dirs {
        children.push((d, true, sort_key(d, options)?));
    }
    for f in &listing.files {
        children.push((f, false, sort_key(f, options)?));
    }
    if options.sort_by.is_descending() {
        children.sort_by(|a, b| b.2.cmp(&a.2));
    } else {
        children.sort_by(|a, b| a.2.cmp(&b.2));
    }

    for (child, is_dir, _) in children {
        let basename = child
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = strip_extension(&basename).to_string();
        out.push_str(&"\t".repeat(depth));
        out.push_str(&format!(
            "- [{title}]({})\n",
            clean_path(child, options.normalize_separators)
        ));
        if is_dir {
            emit_level(index, child, depth + 1, options, out)?;
        }
    }
    Ok(())
}

/// Separator normalization then percent-encoding for URL safety.
fn clean_path(path: &Path, normalize_separators: bool) -> String {
    let mut s = path.to_string_lossy().into_owned();
    if normalize_separators {
        s = s.replace('\\', "/");
    }
    utf8_percent_encode(&s, PATH_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_tree;
    use tempfile::TempDir;

    const IGNORE: &str = r"^\..+|^_|node_modules";

    fn md_filter() -> PathFilter {
        PathFilter::new(IGNORE, Some(r"\.md")).unwrap()
    }

    fn options(base: &Path, out: &Path) -> SidebarOptions {
        SidebarOptions {
            base_dir: base.to_path_buf(),
            sort_by: SortBy::Name,
            normalize_separators: true,
            output_path: out.to_path_buf(),
            output_behavior: OutputBehavior::Overwrite,
        }
    }

    fn three_level_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[("a.md", ""), ("sub/b.md", ""), ("sub/deep/c.md", "")],
        );
        tmp
    }

    #[test]
    fn nested_tree_preorder_with_depths() {
        let tmp = three_level_tree();
        let out = tmp.path().join("_sidebar.md");
        let opts = options(tmp.path(), &out);

        let outcome = generate(&opts, &md_filter()).unwrap();
        assert_eq!(
            outcome,
            SidebarOutcome::Written {
                path: out.clone(),
                lines: 5
            }
        );

        let body = fs::read_to_string(&out).unwrap();
        assert_eq!(
            body,
            "- [a](a.md)\n\
             - [sub](sub)\n\
             \t- [b](sub/b.md)\n\
             \t- [deep](sub/deep)\n\
             \t\t- [c](sub/deep/c.md)\n"
        );
    }

    #[test]
    fn name_desc_reverses_sibling_order() {
        let tmp = three_level_tree();
        let out = tmp.path().join("_sidebar.md");
        let mut opts = options(tmp.path(), &out);
        opts.sort_by = SortBy::NameDesc;

        generate(&opts, &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        let first_level: Vec<&str> = body
            .lines()
            .filter(|l| !l.starts_with('\t'))
            .collect();
        assert_eq!(first_level, vec!["- [sub](sub)", "- [a](a.md)"]);
    }

    #[test]
    fn skip_leaves_existing_output_untouched() {
        let tmp = three_level_tree();
        let out = tmp.path().join("_sidebar.md");
        fs::write(&out, "hand-written").unwrap();

        let mut opts = options(tmp.path(), &out);
        opts.output_behavior = OutputBehavior::Skip;

        let outcome = generate(&opts, &md_filter()).unwrap();
        assert_eq!(outcome, SidebarOutcome::Skipped);
        assert_eq!(fs::read_to_string(&out).unwrap(), "hand-written");
    }

    #[test]
    fn skip_without_existing_output_writes() {
        let tmp = three_level_tree();
        let out = tmp.path().join("_sidebar.md");
        let mut opts = options(tmp.path(), &out);
        opts.output_behavior = OutputBehavior::Skip;

        let outcome = generate(&opts, &md_filter()).unwrap();
        assert!(matches!(outcome, SidebarOutcome::Written { .. }));
        assert!(out.exists());
    }

    #[test]
    fn append_adds_blank_line_then_body() {
        let tmp = three_level_tree();
        let out = tmp.path().join("_sidebar.md");
        fs::write(&out, "X").unwrap();

        let mut opts = options(tmp.path(), &out);
        opts.output_behavior = OutputBehavior::Append;

        generate(&opts, &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        assert!(body.starts_with("X\n- [a](a.md)\n"));
    }

    #[test]
    fn append_creates_missing_output() {
        let tmp = three_level_tree();
        let out = tmp.path().join("_sidebar.md");
        let mut opts = options(tmp.path(), &out);
        opts.output_behavior = OutputBehavior::Append;

        generate(&opts, &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        assert!(body.starts_with("- [a](a.md)\n"));
    }

    #[test]
    fn ignored_names_contribute_no_lines() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("a.md", ""),
                ("_drafts/wip.md", ""),
                (".hidden/h.md", ""),
                ("node_modules/pkg/readme.md", ""),
                ("_loose.md", ""),
            ],
        );
        // output file only comes into existence after traversal
        let out = tmp.path().join("sidebar-out.md");
        let opts = options(tmp.path(), &out);

        generate(&opts, &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        assert_eq!(body, "- [a](a.md)\n");
    }

    #[test]
    fn empty_directory_lists_itself_with_no_children() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("a.md", ""), ("empty/notes.txt", "")]);
        let out = tmp.path().join("_sidebar.md");

        generate(&options(tmp.path(), &out), &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        assert_eq!(body, "- [a](a.md)\n- [empty](empty)\n");
    }

    #[test]
    fn unsafe_characters_percent_encoded() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("my notes.md", "")]);
        let out = tmp.path().join("_sidebar.md");

        generate(&options(tmp.path(), &out), &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        assert_eq!(body, "- [my notes](my%20notes.md)\n");
    }

    #[test]
    fn modified_sort_orders_by_mtime() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("old.md", ""), ("new.md", "")]);
        // push new.md's mtime into the future so ordering is unambiguous
        let future = SystemTime::now() + std::time::Duration::from_secs(3600);
        let file = fs::OpenOptions::new()
            .write(true)
            .open(tmp.path().join("new.md"))
            .unwrap();
        file.set_modified(future).unwrap();

        let out = tmp.path().join("_sidebar.md");
        let mut opts = options(tmp.path(), &out);
        opts.sort_by = SortBy::Modified;
        generate(&opts, &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        assert_eq!(body, "- [old](old.md)\n- [new](new.md)\n");

        opts.sort_by = SortBy::ModifiedDesc;
        opts.output_behavior = OutputBehavior::Overwrite;
        generate(&opts, &md_filter()).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        assert_eq!(body, "- [new](new.md)\n- [old](old.md)\n");
    }

    #[test]
    fn clean_path_quotes_like_a_url() {
        assert_eq!(clean_path(Path::new("sub/b.md"), true), "sub/b.md");
        assert_eq!(clean_path(Path::new("a b/c d.md"), true), "a%20b/c%20d.md");
        assert_eq!(clean_path(Path::new("100%.md"), true), "100%25.md");
    }
}
