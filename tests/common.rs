//! Shared test utilities for integration tests.
//!
//! Provides helper functions for creating temporary git repositories and
//! performing common git operations used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Runs `git` with `args` inside `repo_path` and returns trimmed stdout.
///
/// # Errors
///
/// Returns error if git cannot be spawned or exits unsuccessfully
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Creates temporary git repository with test configuration.
///
/// The repository is on branch `main` and has user name and email
/// configured. Git's template files, including the placeholder
/// `description`, are left as `git init` wrote them.
///
/// # Returns
///
/// Temporary directory containing initialized git repository
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    init_repo(dir.path())?;
    Ok(dir)
}

/// Creates a repository in a directory called `name` below `parent`.
///
/// Useful where the repository name shows up in the output.
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_named_repo(parent: &Path, name: &str) -> Result<PathBuf> {
    let path = parent.join(name);
    fs::create_dir_all(&path)?;
    init_repo(&path)?;
    Ok(path)
}

fn init_repo(path: &Path) -> Result<()> {
    git(path, &["init", "--quiet"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    git(path, &["config", "tag.gpgsign", "false"])?;
    Ok(())
}

/// Commits staged changes and returns commit hash.
///
/// # Errors
///
/// Returns error if commit fails or hash cannot be retrieved
pub fn git_commit(repo_path: &Path, message: &str) -> Result<String> {
    git(repo_path, &["commit", "--quiet", "-m", message])?;
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Commits staged changes with fixed author and committer dates.
///
/// `date` uses git's internal format, e.g. `1234567890 +0000`.
///
/// # Errors
///
/// Returns error if commit fails or hash cannot be retrieved
pub fn git_commit_at(repo_path: &Path, message: &str, date: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["commit", "--quiet", "-m", message])
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "Git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    git(repo_path, &["rev-parse", "HEAD"])
}

/// Stages files in repository.
///
/// # Errors
///
/// Returns error if git add fails
pub fn git_add(repo_path: &Path, files: &[&str]) -> Result<()> {
    let mut args = vec!["add"];
    args.extend_from_slice(files);
    git(repo_path, &args)?;
    Ok(())
}

/// Creates a lightweight tag pointing at `target`.
///
/// # Errors
///
/// Returns error if git tag fails
pub fn git_tag(repo_path: &Path, name: &str, target: &str) -> Result<()> {
    git(repo_path, &["tag", name, target])?;
    Ok(())
}

/// Creates an annotated tag on `target` and returns the tag object hash.
///
/// # Errors
///
/// Returns error if git tag fails
pub fn git_annotated_tag(
    repo_path: &Path,
    name: &str,
    target: &str,
    message: &str,
) -> Result<String> {
    git(repo_path, &["tag", "-a", name, "-m", message, target])?;
    git(repo_path, &["rev-parse", &format!("refs/tags/{}", name)])
}

/// Writes `content` to `relative` inside the repository, creating parents.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_file(repo_path: &Path, relative: &str, content: &str) -> Result<()> {
    let path = repo_path.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Writes a sidecar metadata file into the repository's git directory.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_sidecar(repo_path: &Path, name: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(".git").join(name), content)?;
    Ok(())
}

/// Counts `needle` occurrences in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
