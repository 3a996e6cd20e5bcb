//! Relative-link rewriting for Markdown documents.
//!
//! Documents link to each other with relative paths, and those paths rot as
//! files get reorganized. This component re-bases every relative link against
//! a single base directory: the link target is resolved from the document's
//! own directory, canonicalized by the OS, and re-expressed relative to the
//! base. Links that carry a URI scheme (`https:`, `mailto:`, `file:`, …) are
//! left byte-for-byte alone.
//!
//! The driving loop walks the base directory, prunes ignored names, and
//! rewrites qualifying files in place. Files whose text would not change are
//! not touched, so re-running the fixer is a no-op.
//!
//! Targets that do not resolve to a real path (broken links, or links
//! escaping the filesystem namespace) are left unchanged and reported as
//! warnings; one bad link never aborts a run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;
use url::Url;
use walkdir::WalkDir;

use crate::config::LinkFixOptions;
use crate::filter::PathFilter;

/// Inline Markdown link: lazy display text (may be empty), lazy non-empty
/// target. `.` does not cross newlines, so a link never spans lines.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.+?)\)").expect("invalid LINK_RE regex"));

#[derive(Error, Debug)]
pub enum LinkFixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("traversal error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("cannot resolve base directory {0}: {1}")]
    BaseDir(PathBuf, std::io::Error),
}

/// Result of rewriting one document's content.
#[derive(Debug)]
pub struct Rewrite {
    pub content: String,
    /// Relative links whose target text actually changed.
    pub rewritten: usize,
    /// Targets left unchanged because they did not resolve to a real path.
    pub warnings: Vec<String>,
}

/// Totals for one link-fixing run.
#[derive(Debug, Default)]
pub struct FixSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub links_rewritten: usize,
    pub warnings: Vec<String>,
}

/// Rewrites relative links against one fixed base directory.
pub struct LinkRewriter {
    base_dir: PathBuf,
    normalize_separators: bool,
}

impl LinkRewriter {
    /// Canonicalize the base directory once up front. Every rewritten target
    /// is computed relative to this resolved path, so symlinked base
    /// directories (common for temp dirs) compare correctly.
    pub fn new(base_dir: &Path, normalize_separators: bool) -> Result<Self, LinkFixError> {
        let base_dir = fs::canonicalize(base_dir)
            .map_err(|e| LinkFixError::BaseDir(base_dir.to_path_buf(), e))?;
        Ok(Self {
            base_dir,
            normalize_separators,
        })
    }

    /// Rewrite every relative link in `content`, resolving targets from
    /// `document_dir` (the directory containing the document).
    pub fn rewrite(&self, content: &str, document_dir: &Path) -> Rewrite {
        let mut rewritten = 0;
        let mut warnings = Vec::new();

        let new_content = LINK_RE.replace_all(content, |caps: &Captures| {
            let text = &caps[1];
            let target = &caps[2];

            // A target with a scheme is not ours to touch
            if Url::parse(target).is_ok() {
                return caps[0].to_string();
            }

            let joined = document_dir.join(target);
            match fs::canonicalize(&joined) {
                Ok(absolute) => {
                    let mut new_target = relative_to(&absolute, &self.base_dir)
                        .to_string_lossy()
                        .into_owned();
                    if self.normalize_separators {
                        new_target = new_target.replace('\\', "/");
                    }
                    if new_target != *target {
                        rewritten += 1;
                    }
                    format!("[{text}]({new_target})")
                }
                Err(_) => {
                    warnings.push(format!(
                        "unresolved link target '{target}' (from {})",
                        document_dir.display()
                    ));
                    caps[0].to_string()
                }
            }
        });

        Rewrite {
            content: new_content.into_owned(),
            rewritten,
            warnings,
        }
    }
}

/// Walk the base directory and rewrite qualifying documents in place.
///
/// Ignored directory names are pruned from descent; ignored file names and
/// files failing the extension pattern are skipped. A file is written back
/// only when its text changed.
pub fn fix_links(
    options: &LinkFixOptions,
    filter: &PathFilter,
) -> Result<FixSummary, LinkFixError> {
    let rewriter = LinkRewriter::new(&options.base_dir, options.normalize_separators)?;
    let mut summary = FixSummary::default();

    let walker = WalkDir::new(&options.base_dir)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !filter.should_ignore(&e.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !filter.extension_accepted(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        let document_dir = path.parent().unwrap_or(Path::new(""));
        let content = fs::read_to_string(path)?;
        let result = rewriter.rewrite(&content, document_dir);

        summary.files_scanned += 1;
        summary.links_rewritten += result.rewritten;
        summary.warnings.extend(result.warnings);

        if result.content != content {
            fs::write(path, result.content)?;
            summary.files_changed += 1;
        }
    }

    Ok(summary)
}

/// Express `path` relative to `base`, emitting `..` segments when the target
/// lies outside the base. Both paths must be absolute and canonical.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let mut path_parts = path.components().peekable();
    let mut base_parts = base.components().peekable();

    while let (Some(p), Some(b)) = (path_parts.peek(), base_parts.peek()) {
        if p == b {
            path_parts.next();
            base_parts.next();
        } else {
            break;
        }
    }

    let mut rel = PathBuf::new();
    for _ in base_parts {
        rel.push("..");
    }
    for part in path_parts {
        rel.push(part.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}
