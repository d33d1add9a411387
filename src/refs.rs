//! Branch and tag classification.
//!
//! Every reference is sorted into branches or tags, and each one is
//! resolved to the commit shown for it on the refs page.

use anyhow::{Context, Result, anyhow};
use gix::ObjectId;
use gix::bstr::ByteSlice;
use gix::revision::walk::Sorting;
use gix::traverse::commit::simple::CommitTimeOrder;
use std::path::Path;
use tracing::debug;

use crate::error::{Issue, RepoError, boxed};
use crate::format::short_ref_name;
use crate::git::{CommitRecord, find_commit_record};

const BRANCH_PREFIX: &str = "refs/heads/";
const TAG_PREFIX: &str = "refs/tags/";

/// How a tag reference is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Points at a tag object that wraps the target commit.
    Annotated,
    /// Points directly at a commit.
    Lightweight,
}

/// Kind of a classified reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Branch,
    Tag(TagKind),
}

/// Branch or tag together with the commit displayed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    kind: RefKind,
    full_name: String,
    commit: CommitRecord,
}

impl ReferenceRecord {
    pub fn new(kind: RefKind, full_name: String, commit: CommitRecord) -> Self {
        Self {
            kind,
            full_name,
            commit,
        }
    }

    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// Fully qualified name, e.g. `refs/heads/main`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Display name, e.g. `main`.
    pub fn ref_name(&self) -> &str {
        short_ref_name(&self.full_name)
    }

    /// Representative commit.
    pub fn commit(&self) -> &CommitRecord {
        &self.commit
    }
}

/// Classified references in enumeration order.
#[derive(Debug, Clone, Default)]
pub struct RefSet {
    pub branches: Vec<ReferenceRecord>,
    pub tags: Vec<ReferenceRecord>,
    /// References dropped because they could not be resolved.
    pub issues: Vec<Issue>,
}

/// Reference namespace relevant for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Branch,
    Tag,
}

/// Returns the namespace of a fully qualified reference name.
///
/// Anything outside `refs/heads/` and `refs/tags/` (remotes, notes, stash,
/// `HEAD`) yields `None`.
pub fn namespace_of(full_name: &str) -> Option<Namespace> {
    if full_name.starts_with(BRANCH_PREFIX) {
        Some(Namespace::Branch)
    } else if full_name.starts_with(TAG_PREFIX) {
        Some(Namespace::Tag)
    } else {
        None
    }
}

/// Enumerates all references and classifies branches and tags.
///
/// Lists keep the enumeration order of the reference store; no secondary
/// sort is applied. Symbolic references and references outside the branch
/// and tag namespaces are ignored. A reference whose commit cannot be
/// resolved is dropped and reported in [`RefSet::issues`].
///
/// # Errors
///
/// Returns [`RepoError::References`] if the reference store cannot be
/// enumerated at all.
pub fn classify_refs(repo: &gix::Repository, path: &Path) -> Result<RefSet, RepoError> {
    let references_error = |source| RepoError::References {
        path: path.to_path_buf(),
        source,
    };

    let platform = repo
        .references()
        .map_err(|e| references_error(boxed(e)))?;
    let iter = platform.all().map_err(|e| references_error(boxed(e)))?;

    let mut set = RefSet::default();
    for reference in iter {
        let reference = match reference {
            Ok(reference) => reference,
            Err(e) => {
                set.issues.push(Issue::RefSkipped {
                    name: "<unreadable>".to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let full_name = reference.name().as_bstr().to_str_lossy().into_owned();
        let Some(namespace) = namespace_of(&full_name) else {
            continue;
        };
        let Some(target) = reference.target().try_id().map(|id| id.to_owned()) else {
            debug!(reference = %full_name, "skipping symbolic reference");
            continue;
        };

        let resolved = match namespace {
            Namespace::Branch => {
                resolve_tip(repo, target, path).map(|commit| (RefKind::Branch, commit))
            }
            Namespace::Tag => resolve_tag(repo, target, path),
        };

        match resolved {
            Ok((kind, commit)) => {
                debug!(reference = %full_name, ?kind, commit = commit.hash(), "classified reference");
                let record = ReferenceRecord::new(kind, full_name, commit);
                match kind {
                    RefKind::Branch => set.branches.push(record),
                    RefKind::Tag(_) => set.tags.push(record),
                }
            }
            Err(e) => set.issues.push(Issue::RefSkipped {
                name: full_name,
                reason: format!("{:#}", e),
            }),
        }
    }

    Ok(set)
}

/// Resolves a tag reference in two explicit steps.
///
/// First the target is probed as a tag object. A tag object makes the
/// reference annotated and its target commit is used. Any other object
/// makes it lightweight, resolved exactly like a branch.
fn resolve_tag(
    repo: &gix::Repository,
    target: ObjectId,
    path: &Path,
) -> Result<(RefKind, CommitRecord)> {
    match probe_tag(repo, target)? {
        Some(tagged) => {
            // One level of tag-of-tag indirection is followed.
            let tagged = probe_tag(repo, tagged)?.unwrap_or(tagged);
            let commit = find_commit_record(repo, tagged, path)
                .context("Annotated tag does not point to a commit")?;
            Ok((RefKind::Tag(TagKind::Annotated), commit))
        }
        None => {
            let commit = resolve_tip(repo, target, path)?;
            Ok((RefKind::Tag(TagKind::Lightweight), commit))
        }
    }
}

/// Returns the target of `id` if it names a tag object.
///
/// `Ok(None)` means the object exists but is not a tag.
///
/// # Errors
///
/// Returns error if the object cannot be read or the tag cannot be decoded.
pub fn probe_tag(repo: &gix::Repository, id: ObjectId) -> Result<Option<ObjectId>> {
    let object = repo
        .find_object(id)
        .with_context(|| format!("Failed to read object {}", id))?;

    if object.kind != gix::object::Kind::Tag {
        return Ok(None);
    }

    let tag = object
        .try_into_tag()
        .with_context(|| format!("Failed to read tag object {}", id))?;
    let target = tag
        .target_id()
        .with_context(|| format!("Failed to decode tag object {}", id))?;

    Ok(Some(target.detach()))
}

/// Resolves the newest commit of a commit-time ordered log from `target`.
fn resolve_tip(repo: &gix::Repository, target: ObjectId, path: &Path) -> Result<CommitRecord> {
    let mut log = repo
        .rev_walk([target])
        .sorting(Sorting::ByCommitTime(CommitTimeOrder::NewestFirst))
        .all()
        .with_context(|| format!("Failed to start log at {}", target))?;

    let newest = log
        .next()
        .ok_or_else(|| anyhow!("Log starting at {} is empty", target))?
        .with_context(|| format!("Failed to read log at {}", target))?;

    Ok(find_commit_record(repo, newest.id, path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{DiffStat, to_datetime};

    fn record(full_name: &str, kind: RefKind) -> ReferenceRecord {
        let commit = CommitRecord::new(
            "0123456789abcdef0123456789abcdef01234567".to_string(),
            "Alice".to_string(),
            to_datetime(1_234_567_890, 0),
            "tagged commit\n",
            DiffStat::default(),
        );
        ReferenceRecord::new(kind, full_name.to_string(), commit)
    }

    #[test]
    fn test_namespace_of_branches_and_tags() {
        assert_eq!(namespace_of("refs/heads/main"), Some(Namespace::Branch));
        assert_eq!(
            namespace_of("refs/heads/feature/login"),
            Some(Namespace::Branch)
        );
        assert_eq!(namespace_of("refs/tags/v1.0"), Some(Namespace::Tag));
    }

    #[test]
    fn test_namespace_of_ignores_other_refs() {
        assert_eq!(namespace_of("refs/remotes/origin/main"), None);
        assert_eq!(namespace_of("refs/notes/commits"), None);
        assert_eq!(namespace_of("refs/stash"), None);
        assert_eq!(namespace_of("HEAD"), None);
        assert_eq!(namespace_of("refs/headsets"), None);
    }

    #[test]
    fn test_reference_record_short_name() {
        // Arrange
        let branch = record("refs/heads/feature/login", RefKind::Branch);
        let tag = record("refs/tags/v2", RefKind::Tag(TagKind::Annotated));

        // Act & Assert
        assert_eq!(branch.ref_name(), "login");
        assert_eq!(branch.full_name(), "refs/heads/feature/login");
        assert_eq!(tag.ref_name(), "v2");
        assert_eq!(tag.kind(), RefKind::Tag(TagKind::Annotated));
        assert_eq!(tag.commit().message(), "tagged commit");
    }
}
