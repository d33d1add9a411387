//! Repository level metadata: sidecar files and well-known HEAD files.

use gix::objs::tree::EntryKind;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::RepoError;
use crate::format::strip_extension;
use crate::git;

/// README candidates, in priority order.
pub const README_FILES: [&str; 4] = ["README", "readme", "README.md", "readme.md"];

/// License candidates, in priority order.
pub const LICENSE_FILES: [&str; 3] = ["LICENSE", "LICENSE.md", "COPYING"];

/// Submodule configuration file.
pub const SUBMODULES_FILE: &str = ".gitmodules";

/// Sidecar file holding the one-line repository description.
pub const DESCRIPTION_FILE: &str = "description";
/// Start of the description `git init` writes into new repositories.
pub const PLACEHOLDER_DESCRIPTION: &str = "Unnamed repository;";

/// Sidecar file holding the repository owner.
pub const OWNER_FILE: &str = "owner";
/// Sidecar file holding the canonical clone URL.
pub const URL_FILE: &str = "url";

/// Repository identity and metadata shared by all generated pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySnapshot {
    name: String,
    stripped_name: String,
    description: String,
    owner: String,
    clone_url: String,
    readme: Option<String>,
    license: Option<String>,
    submodules: Option<String>,
}

impl RepositorySnapshot {
    /// Builds the snapshot of an opened repository.
    ///
    /// Missing sidecar files leave the matching field empty.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::InvalidPath`] if no name can be derived from
    /// `path`.
    pub fn load(
        repo: &gix::Repository,
        head: &gix::Commit<'_>,
        path: &Path,
    ) -> Result<Self, RepoError> {
        let name = repository_name(path)?;
        let stripped_name = strip_extension(&name).to_string();

        let tree = match head.tree() {
            Ok(tree) => Some(tree),
            Err(e) => {
                debug!(repo = %path.display(), error = %e, "HEAD tree unreadable, skipping file detection");
                None
            }
        };
        let detect = |candidates: &[&str]| {
            tree.as_ref()
                .and_then(|tree| find_first_file(tree, candidates))
        };

        Ok(Self {
            stripped_name,
            description: read_description(repo, path),
            owner: read_sidecar(repo, path, OWNER_FILE),
            clone_url: read_sidecar(repo, path, URL_FILE),
            readme: detect(&README_FILES),
            license: detect(&LICENSE_FILES),
            submodules: detect(&[SUBMODULES_FILE]),
            name,
        })
    }

    /// Creates a snapshot from known values.
    pub fn new(
        name: String,
        description: String,
        owner: String,
        clone_url: String,
        readme: Option<String>,
        license: Option<String>,
        submodules: Option<String>,
    ) -> Self {
        Self {
            stripped_name: strip_extension(&name).to_string(),
            name,
            description,
            owner,
            clone_url,
            readme,
            license,
            submodules,
        }
    }

    /// Final component of the repository path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository name without its extension.
    pub fn stripped_name(&self) -> &str {
        &self.stripped_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Canonical clone URL, empty when unknown.
    pub fn clone_url(&self) -> &str {
        &self.clone_url
    }

    /// README path at HEAD.
    pub fn readme(&self) -> Option<&str> {
        self.readme.as_deref()
    }

    /// License path at HEAD.
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// Submodule configuration path at HEAD.
    pub fn submodules(&self) -> Option<&str> {
        self.submodules.as_deref()
    }
}

/// Opens the repository at `path` and builds its snapshot.
///
/// # Errors
///
/// Returns [`RepoError::NotAGitRepository`] if the path cannot be opened
/// and [`RepoError::NoHead`] if HEAD does not resolve to a commit.
pub fn load_snapshot(path: &Path) -> Result<RepositorySnapshot, RepoError> {
    let repo = git::open(path)?;
    let head = git::head_commit(&repo, path)?;
    RepositorySnapshot::load(&repo, &head, path)
}

/// Derives the repository name from the last component of its path.
///
/// # Errors
///
/// Returns [`RepoError::InvalidPath`] for paths without a final component,
/// such as `/`.
pub fn repository_name(path: &Path) -> Result<String, RepoError> {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or(RepoError::InvalidPath { path: resolved })
}

/// Reads a sidecar file, returning an empty string when it is absent.
///
/// The repository's git directory is searched first, then `path` itself,
/// so both bare repositories and work trees are supported. A single
/// trailing line ending is removed.
pub fn read_sidecar(repo: &gix::Repository, path: &Path, name: &str) -> String {
    let candidates: [PathBuf; 2] = [repo.path().join(name), path.join(name)];

    for candidate in &candidates {
        match fs::read_to_string(candidate) {
            Ok(content) => return strip_line_ending(&content).to_string(),
            Err(e) => {
                debug!(file = %candidate.display(), error = %e, "sidecar file not readable");
            }
        }
    }

    String::new()
}

/// Reads the description sidecar.
///
/// Git's placeholder text for new repositories counts as no description.
pub fn read_description(repo: &gix::Repository, path: &Path) -> String {
    let description = read_sidecar(repo, path, DESCRIPTION_FILE);
    if is_placeholder_description(&description) {
        debug!(repo = %path.display(), "ignoring placeholder description");
        return String::new();
    }
    description
}

fn is_placeholder_description(description: &str) -> bool {
    description.starts_with(PLACEHOLDER_DESCRIPTION)
}

fn strip_line_ending(content: &str) -> &str {
    let content = content.strip_suffix('\n').unwrap_or(content);
    content.strip_suffix('\r').unwrap_or(content)
}

/// Returns the first candidate that exists as a file in `tree`.
fn find_first_file(tree: &gix::Tree<'_>, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        let entry = tree.lookup_entry_by_path(candidate).ok().flatten()?;
        match entry.mode().kind() {
            EntryKind::Blob | EntryKind::BlobExecutable | EntryKind::Link => {
                Some((*candidate).to_string())
            }
            EntryKind::Tree | EntryKind::Commit => None,
        }
    })
}
