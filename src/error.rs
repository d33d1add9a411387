//! Error types for repository extraction.

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal errors that abort extraction for one repository.
///
/// Recoverable problems (a single commit's diff, a single ref, the tree
/// listing) are reported as [`Issue`] values instead.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("cannot derive a repository name from {}", path.display())]
    InvalidPath { path: PathBuf },

    #[error("{} is not a git repository", path.display())]
    NotAGitRepository {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("could not resolve HEAD in {}", path.display())]
    NoHead {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("could not read commit {id} in {}", path.display())]
    CommitLookup {
        path: PathBuf,
        id: String,
        #[source]
        source: BoxError,
    },

    #[error("could not walk history of {}", path.display())]
    History {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("could not read the tree of {}", path.display())]
    Tree {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("could not enumerate references of {}", path.display())]
    References {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl RepoError {
    /// Path of the repository the error originated from.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::InvalidPath { path }
            | Self::NotAGitRepository { path, .. }
            | Self::NoHead { path, .. }
            | Self::CommitLookup { path, .. }
            | Self::History { path, .. }
            | Self::Tree { path, .. }
            | Self::References { path, .. } => path,
        }
    }
}

/// Recoverable problem recorded while extracting a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// Diff against the first parent failed; stats fell back to zero.
    DiffStat { commit: String, reason: String },
    /// Reference could not be resolved and was dropped from its list.
    RefSkipped { name: String, reason: String },
    /// HEAD tree could not be listed; the files page was omitted.
    FilesPage { reason: String },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiffStat { commit, reason } => {
                write!(f, "diff stat for {} unavailable: {}", commit, reason)
            }
            Self::RefSkipped { name, reason } => {
                write!(f, "reference {} skipped: {}", name, reason)
            }
            Self::FilesPage { reason } => write!(f, "files page omitted: {}", reason),
        }
    }
}

pub(crate) fn boxed<E>(error: E) -> BoxError
where
    E: std::error::Error + Send + Sync + 'static,
{
    Box::new(error)
}
