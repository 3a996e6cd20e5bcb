//! Name-based traversal filtering shared by both components.
//!
//! A [`PathFilter`] answers two questions during a directory walk:
//!
//! - `should_ignore(basename)` — is this entry excluded outright? Matching
//!   directories are pruned (never descended into), matching files are
//!   dropped from consideration.
//! - `extension_accepted(filename)` — does this file's extension qualify it
//!   for processing? Only files are gated this way; directories always pass.
//!
//! Both patterns are anchored at the start of their input: `^\..+|^_` ignores
//! dotfiles and underscore-prefixed names but not `a._b`. Anchoring is
//! start-only, not exact: an extension pattern of `\.md` also matches the
//! start of `.mdx`, so users who want an exact match write `\.md$`.

use regex::Regex;

use crate::config::ConfigError;

/// Compiled ignore-name and extension predicates for one run.
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignore: Regex,
    extension: Option<Regex>,
}

impl PathFilter {
    /// Compile the filter patterns. Fails fast on an invalid regex so a bad
    /// pattern is reported before any traversal begins.
    pub fn new(ignore_pattern: &str, extension_pattern: Option<&str>) -> Result<Self, ConfigError> {
        let ignore = Regex::new(ignore_pattern)
            .map_err(|e| ConfigError::InvalidPattern("ignore-name-pattern", e))?;
        let extension = extension_pattern
            .map(|p| Regex::new(p).map_err(|e| ConfigError::InvalidPattern("extension-pattern", e)))
            .transpose()?;
        Ok(Self { ignore, extension })
    }

    /// True iff the ignore pattern matches anchored at the start of the
    /// basename.
    pub fn should_ignore(&self, basename: &str) -> bool {
        match_at_start(&self.ignore, basename)
    }

    /// True iff the file's extension matches the extension pattern anchored
    /// at the start. Accepts everything when no extension pattern is set.
    pub fn extension_accepted(&self, filename: &str) -> bool {
        match &self.extension {
            Some(re) => match_at_start(re, extension_of(filename)),
            None => true,
        }
    }
}

/// Leftmost match must begin at offset 0. The leftmost-first guarantee means
/// a match starting later implies no match exists at the start.
fn match_at_start(re: &Regex, text: &str) -> bool {
    re.find(text).is_some_and(|m| m.start() == 0)
}

/// Extension of a filename, dot included: `notes.md` → `.md`,
/// `archive.tar.gz` → `.gz`. Names without a dot — and dotfiles, whose
/// leading dots are part of the name, not a separator — yield `""`.
pub fn extension_of(filename: &str) -> &str {
    let leading = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading..].rfind('.') {
        Some(i) => &filename[leading + i..],
        None => "",
    }
}

/// Basename with its extension removed, complementing [`extension_of`].
pub fn strip_extension(filename: &str) -> &str {
    let ext = extension_of(filename);
    &filename[..filename.len() - ext.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_IGNORE: &str = r"^\..+|^_|node_modules";

    fn filter(ext: Option<&str>) -> PathFilter {
        PathFilter::new(DEFAULT_IGNORE, ext).unwrap()
    }

    #[test]
    fn default_ignore_matches_dotfiles_and_underscores() {
        let f = filter(None);
        assert!(f.should_ignore(".git"));
        assert!(f.should_ignore("_drafts"));
        assert!(f.should_ignore("node_modules"));
        assert!(!f.should_ignore("docs"));
        assert!(!f.should_ignore("notes.md"));
    }

    #[test]
    fn ignore_is_anchored_at_start() {
        let f = filter(None);
        // ".+" after "^\." needs at least one more char; "a._b" has the
        // dot mid-string and must not match
        assert!(!f.should_ignore("a._b"));
        assert!(!f.should_ignore("my_node"));
    }

    #[test]
    fn extension_pattern_gates_files() {
        let f = filter(Some(r"\.md|\.ipynb"));
        assert!(f.extension_accepted("readme.md"));
        assert!(f.extension_accepted("analysis.ipynb"));
        assert!(!f.extension_accepted("photo.png"));
        assert!(!f.extension_accepted("Makefile"));
    }

    #[test]
    fn extension_pattern_is_anchored_not_exact() {
        let f = filter(Some(r"\.md"));
        // anchored at start only — ".mdx" still begins with ".md"
        assert!(f.extension_accepted("page.mdx"));
        let exact = filter(Some(r"\.md$"));
        assert!(!exact.extension_accepted("page.mdx"));
    }

    #[test]
    fn no_extension_pattern_accepts_everything() {
        let f = filter(None);
        assert!(f.extension_accepted("anything"));
        assert!(f.extension_accepted("notes.md"));
    }

    #[test]
    fn extension_of_edge_cases() {
        assert_eq!(extension_of("notes.md"), ".md");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("..double"), "");
        assert_eq!(extension_of(".config.toml"), ".toml");
    }

    #[test]
    fn strip_extension_edge_cases() {
        assert_eq!(strip_extension("notes.md"), "notes");
        assert_eq!(strip_extension("Makefile"), "Makefile");
        assert_eq!(strip_extension(".bashrc"), ".bashrc");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn invalid_pattern_fails_fast() {
        assert!(PathFilter::new("[unclosed", None).is_err());
        assert!(PathFilter::new(".*", Some("(bad")).is_err());
    }
}
