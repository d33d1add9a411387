//! Flat listing of every file reachable from a tree.

use gix::bstr::ByteSlice;
use gix::objs::tree::EntryKind;
use gix::traverse::tree::Recorder;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{RepoError, boxed};

/// File mode of a listed tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Regular,
    Executable,
    Symlink,
}

impl FileMode {
    /// Mode as stored in git trees.
    pub fn as_octal(self) -> &'static str {
        match self {
            Self::Regular => "100644",
            Self::Executable => "100755",
            Self::Symlink => "120000",
        }
    }

    /// Mode in `ls -l` notation.
    pub fn as_symbolic(self) -> &'static str {
        match self {
            Self::Regular => "-rw-r--r--",
            Self::Executable => "-rwxr-xr-x",
            Self::Symlink => "Lrwxrwxrwx",
        }
    }

    fn from_kind(kind: EntryKind) -> Option<Self> {
        match kind {
            EntryKind::Blob => Some(Self::Regular),
            EntryKind::BlobExecutable => Some(Self::Executable),
            EntryKind::Link => Some(Self::Symlink),
            EntryKind::Tree | EntryKind::Commit => None,
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbolic())
    }
}

/// File entry in a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    name: String,
    mode: FileMode,
    size_bytes: u64,
}

impl TreeEntry {
    pub fn new(name: String, mode: FileMode, size_bytes: u64) -> Self {
        Self {
            name,
            mode,
            size_bytes,
        }
    }

    /// Path relative to the tree root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Blob size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Lists every blob reachable from the tree of `commit`.
///
/// Directories are not listed themselves; their files appear with full
/// relative paths. Submodule entries are skipped as they are not blobs.
/// Entries keep the depth-first order of the traversal.
///
/// # Errors
///
/// Returns [`RepoError::Tree`] if the tree cannot be traversed or a blob
/// header cannot be read.
pub fn flatten_tree(
    repo: &gix::Repository,
    commit: &gix::Commit<'_>,
    path: &Path,
) -> Result<Vec<TreeEntry>, RepoError> {
    let tree_error = |source| RepoError::Tree {
        path: path.to_path_buf(),
        source,
    };

    let tree = commit.tree().map_err(|e| tree_error(boxed(e)))?;
    let mut recorder = Recorder::default();
    tree.traverse()
        .depthfirst(&mut recorder)
        .map_err(|e| tree_error(boxed(e)))?;

    let mut entries = Vec::with_capacity(recorder.records.len());
    for record in recorder.records {
        let Some(mode) = FileMode::from_kind(record.mode.kind()) else {
            continue;
        };
        let header = repo
            .find_header(record.oid)
            .map_err(|e| tree_error(boxed(e)))?;
        entries.push(TreeEntry::new(
            record.filepath.to_str_lossy().into_owned(),
            mode,
            header.size(),
        ));
    }

    debug!(repo = %path.display(), files = entries.len(), "flattened tree");
    Ok(entries)
}
