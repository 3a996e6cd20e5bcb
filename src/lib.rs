//! # mdtend
//!
//! Documentation maintenance for directory trees of Markdown (and other
//! text) documents. Two independent, stateless operations:
//!
//! 1. **Link fixing** — rewrite relative links inside documents so they stay
//!    valid relative to one base directory after files get reorganized.
//! 2. **Sidebar generation** — emit a nested bullet-list navigation index
//!    mirroring the directory structure.
//!
//! Both run as a single synchronous pass over the filesystem. They share one
//! traversal convention — a [`filter::PathFilter`] that prunes ignored
//! directory names and gates files by extension — and nothing else; when
//! both are selected they run sequentially and do not communicate.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`filter`] | ignore-name and extension regex predicates shared by both components |
//! | [`linkfix`] | per-document link rewriting and the in-place rewrite loop |
//! | [`sidebar`] | filtered tree index, sibling sorting, bullet-list rendering, output behavior |
//! | [`config`] | immutable per-component option values built by the CLI |
//! | [`output`] | pure `format_*` summary helpers with `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## No Ambient Configuration
//!
//! Every component entry point takes an explicit options value
//! ([`config::LinkFixOptions`], [`config::SidebarOptions`]) plus the shared
//! filter. There is no config file and no global state; a run is fully
//! described by its CLI flags.
//!
//! ## Regex-Based Link Scanning
//!
//! Links are matched with the lazy inline pattern `\[(.*?)\]\((.+?)\)`
//! rather than a full Markdown parser. Link rewriting must preserve every
//! byte it does not intend to change — code fences, HTML, reference-style
//! links — and a parse/re-serialize cycle cannot promise that. A regex
//! substitution touches exactly the matched spans and nothing else.
//!
//! ## The OS Resolves Paths
//!
//! Link targets are canonicalized with [`std::fs::canonicalize`] instead of
//! textual `..` folding, so symlinks and platform quirks resolve the same
//! way they would for any other program opening the file. The trade-off is
//! that a target must exist to be rewritten; targets that fail to resolve
//! are left unchanged and reported as warnings rather than guessed at.
//!
//! ## Destructive by Design
//!
//! The link fixer rewrites files in place with no backups. It is a one-shot,
//! re-runnable batch tool: a second run over the same tree is a textual
//! no-op, and a run interrupted midway leaves a tree that the next run
//! finishes. Files whose text would not change are never written.

pub mod config;
pub mod filter;
pub mod linkfix;
pub mod output;
pub mod sidebar;

#[cfg(test)]
pub(crate) mod test_helpers;
