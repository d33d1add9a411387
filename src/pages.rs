//! Page generation modules for different view types
//!
//! Repository pages (log, files, refs) share one header context and are
//! rendered through [`render`], which dispatches on [`Page`]. The
//! cross-repository index lives in [`index`].

pub mod files;
pub mod index;
pub mod log;
pub mod refs;

use chrono::{DateTime, FixedOffset};
use maud::Markup;

use crate::components::header::repo_header;
use crate::components::layout::{Feeds, page_wrapper};
use crate::format;
use crate::git::CommitRecord;
use crate::meta::RepositorySnapshot;
use crate::refs::ReferenceRecord;
use crate::tree::TreeEntry;

/// Kinds of per-repository documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Log,
    Files,
    Refs,
}

impl PageKind {
    pub const ALL: [PageKind; 3] = [PageKind::Log, PageKind::Files, PageKind::Refs];

    /// Page title shown in the document title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Log => "Log",
            Self::Files => "Files",
            Self::Refs => "Refs",
        }
    }

    /// Output file name, relative to the repository output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Log => "log.html",
            Self::Files => "files.html",
            Self::Refs => "refs.html",
        }
    }
}

/// Page content paired with its kind.
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    Log(&'a [CommitRecord]),
    Files(&'a [TreeEntry]),
    Refs {
        branches: &'a [ReferenceRecord],
        tags: &'a [ReferenceRecord],
    },
}

impl Page<'_> {
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Log(_) => PageKind::Log,
            Self::Files(_) => PageKind::Files,
            Self::Refs { .. } => PageKind::Refs,
        }
    }
}

/// Header fields of a repository page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub name: String,
    pub stripped_name: String,
    pub description: String,
    pub clone_url: String,
    /// Prefix from the page to the asset root; empty at the repository root.
    pub relative_path_prefix: String,
    pub readme_link: Option<String>,
    pub license_link: Option<String>,
    pub submodules_link: Option<String>,
    pub page_title: &'static str,
}

impl PageContext {
    /// Builds the header context of `kind` from the repository snapshot.
    pub fn new(snapshot: &RepositorySnapshot, kind: PageKind) -> Self {
        let file_link = |path: &str| format!("file/{}.html", path);

        Self {
            name: snapshot.name().to_string(),
            stripped_name: snapshot.stripped_name().to_string(),
            description: snapshot.description().to_string(),
            clone_url: snapshot.clone_url().to_string(),
            relative_path_prefix: String::new(),
            readme_link: snapshot.readme().map(file_link),
            license_link: snapshot.license().map(file_link),
            submodules_link: snapshot.submodules().map(file_link),
            page_title: kind.title(),
        }
    }

    /// Document title: `<page> - <name>`, plus ` - <description>` if set.
    pub fn document_title(&self) -> String {
        let mut title = String::from(self.page_title);
        if !title.is_empty() && !self.stripped_name.is_empty() {
            title.push_str(" - ");
        }
        title.push_str(&self.stripped_name);
        if !self.description.is_empty() {
            title.push_str(" - ");
            title.push_str(&self.description);
        }
        title
    }
}

/// Formatting functions handed to every page builder.
#[derive(Clone, Copy)]
pub struct Formatters {
    pub time: fn(DateTime<FixedOffset>) -> String,
    pub message: fn(&str) -> &str,
    pub count: fn(usize) -> String,
    pub size: fn(u64) -> String,
    pub ref_name: fn(&str) -> &str,
}

impl Default for Formatters {
    fn default() -> Self {
        Self {
            time: format::format_time,
            message: format::trim_message,
            count: format::format_count,
            size: format::format_size,
            ref_name: format::short_ref_name,
        }
    }
}

/// Renders a repository page as a complete HTML document.
pub fn render(page: &Page<'_>, ctx: &PageContext, fmt: &Formatters) -> Markup {
    let body = match *page {
        Page::Log(commits) => log::render(commits, fmt),
        Page::Files(entries) => files::render(entries, fmt),
        Page::Refs { branches, tags } => refs::render(branches, tags, fmt),
    };

    page_wrapper(
        &ctx.document_title(),
        &ctx.relative_path_prefix,
        Some(Feeds { name: &ctx.name }),
        repo_header(ctx),
        body,
    )
}
