//! Commit history walking with per-commit diff statistics.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::error::{Issue, RepoError, boxed};
use crate::git::{CommitRecord, DiffStat, commit_record};

/// Commit log of a repository, most recent first.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub commits: Vec<CommitRecord>,
    /// Commits whose diff statistic could not be computed.
    pub issues: Vec<Issue>,
}

/// Walks first-parent history from `head`, newest first.
///
/// The order is the traversal order of the walk and is never re-sorted.
/// Each commit is diffed against its first parent (the empty tree for a
/// root commit). A commit whose diff fails keeps zero statistics and is
/// reported in [`History::issues`]; the walk continues.
///
/// # Errors
///
/// Returns [`RepoError::History`] if the walk cannot start or an ancestor
/// cannot be read, and [`RepoError::CommitLookup`] if a commit object
/// cannot be decoded.
pub fn walk_history(
    repo: &gix::Repository,
    head: &gix::Commit<'_>,
    path: &Path,
) -> Result<History, RepoError> {
    let history_error = |source| RepoError::History {
        path: path.to_path_buf(),
        source,
    };

    let walk = repo
        .rev_walk([head.id])
        .first_parent_only()
        .all()
        .map_err(|e| history_error(boxed(e)))?;

    let mut history = History::default();
    for info in walk {
        let info = info.map_err(|e| history_error(boxed(e)))?;
        let commit = info.object().map_err(|e| RepoError::CommitLookup {
            path: path.to_path_buf(),
            id: info.id.to_string(),
            source: boxed(e),
        })?;

        let mut record = commit_record(&commit, path)?;
        match diff_stat(repo, &commit) {
            Ok(stat) => record.set_diff_stat(stat),
            Err(e) => history.issues.push(Issue::DiffStat {
                commit: record.hash().to_string(),
                reason: format!("{:#}", e),
            }),
        }
        history.commits.push(record);
    }

    debug!(
        repo = %path.display(),
        commits = history.commits.len(),
        "walked history"
    );
    Ok(history)
}

/// Computes the change statistic of `commit` against its first parent.
///
/// Binary files count as changed files without line counts.
///
/// # Errors
///
/// Returns error if either tree cannot be read or the diff fails.
pub fn diff_stat(repo: &gix::Repository, commit: &gix::Commit<'_>) -> Result<DiffStat> {
    let tree = commit.tree().context("Failed to read commit tree")?;

    let parent_tree = match commit.parent_ids().next() {
        Some(parent_id) => repo
            .find_commit(parent_id.detach())
            .context("Failed to read first parent")?
            .tree()
            .context("Failed to read first parent tree")?,
        None => repo.empty_tree(),
    };

    let stats = parent_tree
        .changes()
        .context("Failed to prepare tree diff")?
        .stats(&tree)
        .context("Failed to diff against first parent")?;

    Ok(DiffStat {
        files_changed: stats.files_changed as usize,
        lines_added: stats.lines_added as usize,
        lines_deleted: stats.lines_removed as usize,
    })
}
