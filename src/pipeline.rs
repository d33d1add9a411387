//! Extraction and page assembly for the `repo` and `index` commands.
//!
//! Every stage is run to completion before anything is written, so a
//! fatal error leaves the output untouched.

use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::{debug, error, warn};

use crate::error::{Issue, RepoError};
use crate::git;
use crate::history::{History, walk_history};
use crate::meta::RepositorySnapshot;
use crate::pages::index::IndexEntry;
use crate::pages::{self, Formatters, Page, PageContext, PageKind};
use crate::refs::{RefSet, classify_refs};
use crate::sink::PageSink;
use crate::tree::{TreeEntry, flatten_tree};

/// Everything extracted from one repository.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub snapshot: RepositorySnapshot,
    pub history: History,
    /// Flattened HEAD tree, `None` if it could not be listed.
    pub files: Option<Vec<TreeEntry>>,
    pub refs: RefSet,
    /// All recoverable problems, in stage order.
    pub issues: Vec<Issue>,
}

/// Outcome of a `repo` run.
#[derive(Debug, Clone)]
pub struct RepoReport {
    pub snapshot: RepositorySnapshot,
    pub pages: Vec<PageKind>,
    pub issues: Vec<Issue>,
}

/// How `build_index` treats repositories that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Log the failure and leave the repository out.
    #[default]
    SkipFailed,
    /// Abort on the first failure.
    Strict,
}

impl IndexPolicy {
    /// Policy selected by the `--strict` flag.
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::SkipFailed }
    }
}

/// Runs every extraction stage for the repository at `path`.
///
/// # Errors
///
/// Returns the first fatal [`RepoError`]: the repository cannot be opened,
/// HEAD does not resolve, history cannot be walked or references cannot be
/// enumerated. Tree listing failures are recorded as issues instead.
pub fn extract(path: &Path) -> Result<Extraction, RepoError> {
    let repo = git::open(path)?;
    let head = git::head_commit(&repo, path)?;
    let snapshot = RepositorySnapshot::load(&repo, &head, path)?;

    let history = walk_history(&repo, &head, path)?;
    let mut issues = history.issues.clone();

    let files = match flatten_tree(&repo, &head, path) {
        Ok(entries) => Some(entries),
        Err(e) => {
            issues.push(Issue::FilesPage {
                reason: format!("{:#}", anyhow!(e)),
            });
            None
        }
    };

    let refs = classify_refs(&repo, path)?;
    issues.extend(refs.issues.iter().cloned());

    debug!(
        repo = %path.display(),
        commits = history.commits.len(),
        branches = refs.branches.len(),
        tags = refs.tags.len(),
        issues = issues.len(),
        "extracted repository"
    );

    Ok(Extraction {
        snapshot,
        history,
        files,
        refs,
        issues,
    })
}

/// Generates the log, files and refs pages of one repository into `sink`.
///
/// Recoverable issues are logged as warnings. Every page is attempted even
/// if an earlier one could not be stored.
///
/// # Errors
///
/// Returns error if extraction fails (nothing is written then) or if the
/// sink rejects a page.
pub fn build_repo_pages(path: &Path, sink: &mut impl PageSink) -> Result<RepoReport> {
    let extraction = extract(path)?;
    for issue in &extraction.issues {
        warn!(repo = %path.display(), %issue, "degraded output");
    }

    let fmt = Formatters::default();
    let mut written = Vec::with_capacity(PageKind::ALL.len());
    let mut first_failure = None;

    for kind in PageKind::ALL {
        let Some(page) = page_of(kind, &extraction) else {
            continue;
        };
        let ctx = PageContext::new(&extraction.snapshot, kind);
        let markup = pages::render(&page, &ctx, &fmt);

        match sink.write_page(kind.file_name(), markup) {
            Ok(()) => written.push(kind),
            Err(e) => {
                error!(page = kind.file_name(), error = %format!("{:#}", e), "failed to store page");
                first_failure.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_failure {
        return Err(e);
    }

    Ok(RepoReport {
        snapshot: extraction.snapshot,
        pages: written,
        issues: extraction.issues,
    })
}

fn page_of(kind: PageKind, extraction: &Extraction) -> Option<Page<'_>> {
    match kind {
        PageKind::Log => Some(Page::Log(&extraction.history.commits)),
        PageKind::Files => extraction.files.as_deref().map(Page::Files),
        PageKind::Refs => Some(Page::Refs {
            branches: &extraction.refs.branches,
            tags: &extraction.refs.tags,
        }),
    }
}

/// Reduced extraction producing one index row.
///
/// # Errors
///
/// Returns error if the repository cannot be opened or has no HEAD.
pub fn index_entry(path: &Path) -> Result<IndexEntry, RepoError> {
    let repo = git::open(path)?;
    let head = git::head_commit(&repo, path)?;
    let snapshot = RepositorySnapshot::load(&repo, &head, path)?;
    let last_commit = git::commit_record(&head, path)?;

    Ok(IndexEntry {
        name: snapshot.stripped_name().to_string(),
        description: snapshot.description().to_string(),
        owner: snapshot.owner().to_string(),
        last_commit_time: last_commit.author_time(),
        landing_page_url: IndexEntry::landing_page(snapshot.stripped_name(), snapshot.readme()),
    })
}

/// Builds index rows for `paths`, in input order.
///
/// # Errors
///
/// With [`IndexPolicy::Strict`], returns the first repository error.
/// [`IndexPolicy::SkipFailed`] never fails; unreadable repositories are
/// logged and left out.
pub fn build_index<P: AsRef<Path>>(
    paths: &[P],
    policy: IndexPolicy,
) -> Result<Vec<IndexEntry>, RepoError> {
    let mut entries = Vec::with_capacity(paths.len());

    for path in paths {
        match index_entry(path.as_ref()) {
            Ok(entry) => entries.push(entry),
            Err(e) => match policy {
                IndexPolicy::Strict => return Err(e),
                IndexPolicy::SkipFailed => {
                    let repo = e.path().display().to_string();
                    warn!(%repo, error = %format!("{:#}", anyhow!(e)), "skipping repository");
                }
            },
        }
    }

    Ok(entries)
}

/// Renders the index document for `paths`.
///
/// # Errors
///
/// See [`build_index`].
pub fn render_index<P: AsRef<Path>>(paths: &[P], policy: IndexPolicy) -> Result<String> {
    let entries = build_index(paths, policy)?;
    Ok(pages::index::render(&entries, &Formatters::default()).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_missing_repository_writes_nothing() {
        // Arrange
        let temp_dir = tempfile::tempdir().expect("Should create temp directory");
        let mut sink = MemorySink::new();

        // Act
        let result = build_repo_pages(temp_dir.path(), &mut sink);

        // Assert
        let err = result.expect_err("Plain directory is not a repository");
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::NotAGitRepository { .. })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_index_policies_on_unreadable_repository() {
        let temp_dir = tempfile::tempdir().expect("Should create temp directory");
        let paths = [temp_dir.path()];

        let skipped = build_index(&paths, IndexPolicy::SkipFailed).expect("Should skip");
        let strict = build_index(&paths, IndexPolicy::Strict);

        assert!(skipped.is_empty());
        assert!(matches!(strict, Err(RepoError::NotAGitRepository { .. })));
    }

    #[test]
    fn test_default_policy_skips() {
        assert_eq!(IndexPolicy::default(), IndexPolicy::SkipFailed);
        assert_eq!(IndexPolicy::from_strict(false), IndexPolicy::SkipFailed);
        assert_eq!(IndexPolicy::from_strict(true), IndexPolicy::Strict);
    }
}
