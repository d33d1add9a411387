//! Bundled stylesheet

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// File name of the stylesheet referenced by every page.
pub const STYLESHEET: &str = "style.css";

const STYLE: &str = include_str!("../assets/style.css");

/// Writes the bundled stylesheet into `dir`
///
/// Logo and favicon are referenced by the pages but not bundled.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn write_stylesheet(dir: &Path) -> Result<()> {
    let path = dir.join(STYLESHEET);
    fs::write(&path, STYLE)
        .with_context(|| format!("Failed to write stylesheet: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_stylesheet() {
        // Arrange
        let temp_dir = tempfile::tempdir().expect("Should create temp directory");

        // Act
        write_stylesheet(temp_dir.path()).expect("Should write stylesheet");

        // Assert
        let css = fs::read_to_string(temp_dir.path().join("style.css"))
            .expect("Should read stylesheet");
        assert!(css.contains("#content"));
        assert!(css.contains("td.num"));
    }
}
