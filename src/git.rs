//! Git repository operations.
//!
//! Thin adapter over `gix`: opening repositories, resolving HEAD and
//! converting commit objects into [`CommitRecord`]s. Everything above this
//! module works with crate types only.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use gix::bstr::ByteSlice;
use std::path::Path;

use crate::error::{RepoError, boxed};
use crate::format::trim_message;

/// Aggregate change statistic of a commit against its first parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub files_changed: usize,
    pub lines_added: usize,
    pub lines_deleted: usize,
}

/// Commit metadata as displayed on generated pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    hash: String,
    author_name: String,
    author_time: DateTime<FixedOffset>,
    message: String,
    diff_stat: DiffStat,
}

impl CommitRecord {
    /// Builds a record from already extracted values.
    ///
    /// The message is kept exactly as stored in the commit.
    pub fn new(
        hash: String,
        author_name: String,
        author_time: DateTime<FixedOffset>,
        message: &str,
        diff_stat: DiffStat,
    ) -> Self {
        Self {
            hash,
            author_name,
            author_time,
            message: message.to_string(),
            diff_stat,
        }
    }

    /// Full commit hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Author name.
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    /// Author timestamp in the author's recorded UTC offset.
    pub fn author_time(&self) -> DateTime<FixedOffset> {
        self.author_time
    }

    /// Commit message without its trailing newline.
    pub fn message(&self) -> &str {
        trim_message(&self.message)
    }

    /// Commit message as stored in the commit object.
    pub fn raw_message(&self) -> &str {
        &self.message
    }

    /// Change statistic against the first parent.
    pub fn diff_stat(&self) -> DiffStat {
        self.diff_stat
    }

    pub(crate) fn set_diff_stat(&mut self, diff_stat: DiffStat) {
        self.diff_stat = diff_stat;
    }
}

/// Opens the bare or working repository at `path`.
///
/// A `.git` entry inside `path` is opened directly, so work trees whose
/// directory name ends in `.git` are not mistaken for bare repositories.
///
/// # Errors
///
/// Returns [`RepoError::NotAGitRepository`] if no repository can be
/// opened at the path.
pub fn open(path: &Path) -> Result<gix::Repository, RepoError> {
    let dot_git = path.join(".git");
    let git_dir = if dot_git.exists() { dot_git.as_path() } else { path };

    gix::open(git_dir).map_err(|e| RepoError::NotAGitRepository {
        path: path.to_path_buf(),
        source: boxed(e),
    })
}

/// Resolves HEAD to its commit.
///
/// # Errors
///
/// Returns [`RepoError::NoHead`] for unborn branches or dangling HEADs,
/// which is the case for any repository without commits.
pub fn head_commit<'repo>(
    repo: &'repo gix::Repository,
    path: &Path,
) -> Result<gix::Commit<'repo>, RepoError> {
    repo.head_commit().map_err(|e| RepoError::NoHead {
        path: path.to_path_buf(),
        source: boxed(e),
    })
}

/// Converts a commit object into a record with an empty diff statistic.
///
/// # Errors
///
/// Returns [`RepoError::CommitLookup`] if the commit cannot be decoded.
pub fn commit_record(commit: &gix::Commit<'_>, path: &Path) -> Result<CommitRecord, RepoError> {
    let lookup_error = |source| RepoError::CommitLookup {
        path: path.to_path_buf(),
        id: commit.id.to_string(),
        source,
    };

    let author = commit.author().map_err(|e| lookup_error(boxed(e)))?;
    let time = author.time().map_err(|e| lookup_error(boxed(e)))?;
    let message = commit.message_raw().map_err(|e| lookup_error(boxed(e)))?;

    Ok(CommitRecord::new(
        commit.id.to_string(),
        author.name.to_str_lossy().into_owned(),
        to_datetime(time.seconds, time.offset),
        &message.to_str_lossy(),
        DiffStat::default(),
    ))
}

/// Looks up `id` as a commit and converts it into a record.
pub(crate) fn find_commit_record(
    repo: &gix::Repository,
    id: gix::ObjectId,
    path: &Path,
) -> Result<CommitRecord, RepoError> {
    let commit = repo
        .find_commit(id)
        .map_err(|e| RepoError::CommitLookup {
            path: path.to_path_buf(),
            id: id.to_string(),
            source: boxed(e),
        })?;
    commit_record(&commit, path)
}

/// Converts git's seconds-plus-offset representation into a timestamp.
///
/// Offsets outside chrono's range fall back to UTC and out of range
/// seconds to the Unix epoch.
pub fn to_datetime(seconds: i64, offset_seconds: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(offset_seconds).unwrap_or_else(|| Utc.fix());
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .unwrap_or_default()
        .with_timezone(&offset)
}
