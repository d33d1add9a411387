//! Destinations for rendered pages.

use anyhow::{Context, Result};
use maud::Markup;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Accepts rendered documents by file name.
pub trait PageSink {
    /// Stores `markup` under `name`, e.g. `log.html`.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be stored.
    fn write_page(&mut self, name: &str, markup: Markup) -> Result<()>;
}

/// Writes pages as files into a directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Creates the sink, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PageSink for DirSink {
    fn write_page(&mut self, name: &str, markup: Markup) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, markup.into_string())
            .with_context(|| format!("Failed to write page to {}", path.display()))?;
        info!(page = %path.display(), "generated");
        Ok(())
    }
}

/// Keeps pages in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pages: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document stored under `name`.
    pub fn page(&self, name: &str) -> Option<&str> {
        self.pages.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageSink for MemorySink {
    fn write_page(&mut self, name: &str, markup: Markup) -> Result<()> {
        self.pages.insert(name.to_string(), markup.into_string());
        Ok(())
    }
}
