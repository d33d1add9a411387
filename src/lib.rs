//! Static HTML pages for git repositories.
//!
//! For one repository, generates a commit log, a flat file listing and a
//! branches/tags page; for many repositories, an index page linking them.

mod assets;
pub mod components;
mod config;
pub mod error;
pub mod format;
pub mod git;
pub mod history;
pub mod meta;
pub mod pages;
pub mod pipeline;
pub mod refs;
pub mod sink;
pub mod tree;

pub use assets::{STYLESHEET, write_stylesheet};
pub use config::{Command, Config};
pub use error::{Issue, RepoError};
pub use git::{CommitRecord, DiffStat};
pub use history::{History, walk_history};
pub use meta::{RepositorySnapshot, load_snapshot};
pub use pages::index::IndexEntry;
pub use pages::{Formatters, Page, PageContext, PageKind};
pub use pipeline::{
    Extraction, IndexPolicy, RepoReport, build_index, build_repo_pages, extract, render_index,
};
pub use refs::{RefKind, RefSet, ReferenceRecord, TagKind, classify_refs};
pub use sink::{DirSink, MemorySink, PageSink};
pub use tree::{FileMode, TreeEntry, flatten_tree};
