//! End-to-end tests for the gitssg binary.

mod common;

use anyhow::Result;
use common::{create_named_repo, create_test_repo, git_add, git_commit, write_file};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn gitssg(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_gitssg")).args(args).output()?)
}

fn path_str(path: &std::path::Path) -> &str {
    path.to_str().expect("Test path should be valid UTF8")
}

/// Tests `repo` writes the three pages into the output directory.
#[test]
fn test_repo_command_writes_pages() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "README", "hello\n")?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "initial commit")?;
    let output = TempDir::new()?;
    let out_dir = output.path().join("site");

    // Act
    let result = gitssg(&[
        "repo",
        path_str(repo.path()),
        "-o",
        path_str(&out_dir),
        "--with-style",
    ])?;

    // Assert
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    for name in ["log.html", "files.html", "refs.html", "style.css"] {
        assert!(out_dir.join(name).exists(), "{} should be written", name);
    }
    let log = fs::read_to_string(out_dir.join("log.html"))?;
    assert!(log.contains("initial commit"));
    assert!(log.contains(r#"<a href="file/README.html">README</a>"#));
    assert!(result.stdout.is_empty(), "repo writes nothing to stdout");
    Ok(())
}

/// Tests `repo` leaves out the stylesheet unless asked.
#[test]
fn test_repo_command_without_style() -> Result<()> {
    let repo = create_test_repo()?;
    write_file(repo.path(), "a.txt", "a\n")?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "a")?;
    let output = TempDir::new()?;

    let result = gitssg(&["repo", path_str(repo.path()), "-o", path_str(output.path())])?;

    assert!(result.status.success());
    assert!(output.path().join("log.html").exists());
    assert!(!output.path().join("style.css").exists());
    Ok(())
}

/// Tests `index` prints the index document to stdout.
#[test]
fn test_index_command_prints_document() -> Result<()> {
    // Arrange
    let parent = TempDir::new()?;
    let repo = create_named_repo(parent.path(), "project.git")?;
    write_file(&repo, "README.md", "# project\n")?;
    git_add(&repo, &["."])?;
    git_commit(&repo, "initial commit")?;

    // Act
    let result = gitssg(&["index", path_str(&repo)])?;

    // Assert
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout)?;
    assert!(stdout.starts_with("<!DOCTYPE html>"));
    assert!(stdout.contains(r#"<a href="project/README.md">project</a>"#));
    Ok(())
}

/// Tests fatal repository errors exit with status 1 and name the path.
#[test]
fn test_empty_repository_fails() -> Result<()> {
    let repo = create_test_repo()?;
    let output = TempDir::new()?;

    let result = gitssg(&["repo", path_str(repo.path()), "-o", path_str(output.path())])?;

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("HEAD"), "stderr: {}", stderr);
    assert!(!output.path().join("log.html").exists());
    Ok(())
}

/// Tests `index --strict` aborts on an unreadable repository.
#[test]
fn test_index_strict_fails_on_empty_repository() -> Result<()> {
    let repo = create_test_repo()?;

    let lenient = gitssg(&["index", path_str(repo.path())])?;
    let strict = gitssg(&["index", "--strict", path_str(repo.path())])?;

    assert!(lenient.status.success());
    assert_eq!(strict.status.code(), Some(1));
    Ok(())
}

/// Tests usage errors exit with clap's status 2.
#[test]
fn test_usage_errors() -> Result<()> {
    let no_verb = gitssg(&[])?;
    let unknown_verb = gitssg(&["publish", "."])?;
    let no_paths = gitssg(&["index"])?;

    assert_eq!(no_verb.status.code(), Some(2));
    assert_eq!(unknown_verb.status.code(), Some(2));
    assert_eq!(no_paths.status.code(), Some(2));
    assert!(!String::from_utf8_lossy(&no_paths.stderr).is_empty());
    Ok(())
}
