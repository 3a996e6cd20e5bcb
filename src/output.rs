//! CLI output formatting for run results.
//!
//! Each component result has a `format_*` function returning `Vec<String>`
//! (pure, testable) and a `print_*` wrapper that writes to stdout. Warnings
//! go to stderr so summaries stay pipeable.

use std::path::Path;

use crate::linkfix::FixSummary;
use crate::sidebar::SidebarOutcome;

/// Summary lines for a link-fixing run.
///
/// ```text
/// 12 files scanned, 3 rewritten, 7 links updated
/// ```
pub fn format_fix_summary(summary: &FixSummary) -> Vec<String> {
    vec![format!(
        "{} files scanned, {} rewritten, {} links updated",
        summary.files_scanned, summary.files_changed, summary.links_rewritten
    )]
}

pub fn print_fix_summary(summary: &FixSummary) {
    for warning in &summary.warnings {
        eprintln!("warning: {warning}");
    }
    for line in format_fix_summary(summary) {
        println!("{line}");
    }
}

/// Summary lines for a sidebar run.
///
/// ```text
/// wrote _sidebar.md (5 entries)
/// ```
pub fn format_sidebar_outcome(outcome: &SidebarOutcome, output_path: &Path) -> Vec<String> {
    match outcome {
        SidebarOutcome::Skipped => {
            vec![format!("skipped: {} already exists", output_path.display())]
        }
        SidebarOutcome::Written { path, lines } => {
            vec![format!("wrote {} ({} entries)", path.display(), lines)]
        }
    }
}

pub fn print_sidebar_outcome(outcome: &SidebarOutcome, output_path: &Path) {
    for line in format_sidebar_outcome(outcome, output_path) {
        println!("{line}");
    }
}
