use clap::Parser;
use mdtend::config::{LinkFixOptions, OutputBehavior, SidebarOptions, SortBy};
use mdtend::filter::PathFilter;
use mdtend::{linkfix, output, sidebar};
use std::path::PathBuf;

/// Crate version on tagged builds, `dev@<short hash>` otherwise.
fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // leaked exactly once, at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "mdtend")]
#[command(about = "Maintain Markdown directory trees: fix relative links, generate sidebars")]
#[command(long_about = "\
Maintain Markdown directory trees: fix relative links, generate sidebars

Two independent operations, each enabled by its own flag and runnable in the
same invocation:

  --enable-link-fix      Rewrite every relative link in qualifying documents
                         so it resolves relative to the base directory, no
                         matter where the document sits in the tree. Links
                         with a URI scheme (https:, mailto:, file:) are left
                         alone. Rewrites happen in place, with no backups;
                         re-running is a no-op.

  --enable-sidebar-gen   Walk the tree and write a nested bullet-list index,
                         one Markdown link per file, tab-indented to mirror
                         directory depth:

                           - [intro](intro.md)
                           - [guide](guide)
                           \t- [setup](guide/setup.md)

Both operations prune directories matching --ignore-name-pattern and skip
files whose extension fails the component's extension pattern. Patterns are
regexes matched at the start of the basename / extension.

Generate several sidebars into one file by running repeatedly with different
base directories and --sidebar-output-behavior append.")]
#[command(version = version_string())]
struct Cli {
    /// Regex tested against each basename's start; matching directories are
    /// pruned, matching files excluded (both components)
    #[arg(long, default_value = r"^\..+|^_|node_modules")]
    ignore_name_pattern: String,

    /// Rewrite relative links in place under the link-fix base directory
    #[arg(long)]
    enable_link_fix: bool,

    /// Traversal root; rewritten links become relative to this directory
    #[arg(long, default_value = ".")]
    link_fix_base_dir: PathBuf,

    /// Regex tested against the start of a file's extension; gates which
    /// files are rewritten
    #[arg(long, default_value = r"\.md|\.ipynb")]
    link_fix_extension_pattern: String,

    /// Replace backslashes with forward slashes in rewritten targets
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, value_name = "BOOL")]
    link_fix_normalize_separators: bool,

    /// Generate a sidebar index of the sidebar base directory
    #[arg(long)]
    enable_sidebar_gen: bool,

    /// Traversal root for sidebar generation
    #[arg(long, default_value = ".")]
    sidebar_base_dir: PathBuf,

    /// Regex tested against the start of a file's extension; gates which
    /// files appear in the sidebar
    #[arg(long, default_value = r"\.md")]
    sidebar_extension_pattern: String,

    /// How to order siblings at each level
    #[arg(long, value_enum, default_value_t = SortBy::Name)]
    sidebar_sort_by: SortBy,

    /// Replace backslashes with forward slashes in sidebar link paths
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, value_name = "BOOL")]
    sidebar_normalize_separators: bool,

    /// Destination file for the generated sidebar
    #[arg(long, default_value = "_sidebar.md")]
    sidebar_output_path: PathBuf,

    /// What to do when the output file already exists
    #[arg(long, value_enum, default_value_t = OutputBehavior::Overwrite)]
    sidebar_output_behavior: OutputBehavior,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !cli.enable_link_fix && !cli.enable_sidebar_gen {
        eprintln!("nothing to do: pass --enable-link-fix and/or --enable-sidebar-gen");
        return Ok(());
    }

    if cli.enable_link_fix {
        let filter = PathFilter::new(
            &cli.ignore_name_pattern,
            Some(&cli.link_fix_extension_pattern),
        )?;
        let options = LinkFixOptions {
            base_dir: cli.link_fix_base_dir.clone(),
            normalize_separators: cli.link_fix_normalize_separators,
        };
        println!("==> Fixing links under {}", options.base_dir.display());
        let summary = linkfix::fix_links(&options, &filter)?;
        output::print_fix_summary(&summary);
    }

    if cli.enable_sidebar_gen {
        let filter = PathFilter::new(
            &cli.ignore_name_pattern,
            Some(&cli.sidebar_extension_pattern),
        )?;
        let options = SidebarOptions {
            base_dir: cli.sidebar_base_dir.clone(),
            sort_by: cli.sidebar_sort_by,
            normalize_separators: cli.sidebar_normalize_separators,
            output_path: cli.sidebar_output_path.clone(),
            output_behavior: cli.sidebar_output_behavior,
        };
        println!("==> Generating sidebar for {}", options.base_dir.display());
        let outcome = sidebar::generate(&options, &filter)?;
        output::print_sidebar_outcome(&outcome, &options.output_path);
    }

    Ok(())
}
