use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use rowcore::Document;

/// The file-path association and plain load/save collaborator. The core
/// only needs "load lines", "serialize" and "write bytes to a path".
pub struct FileManager {
    current_path: Option<PathBuf>,
}

impl FileManager {
    pub fn new() -> Self {
        Self { current_path: None }
    }

    pub fn current_path(&self) -> Option<&PathBuf> {
        self.current_path.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.current_path.is_some()
    }

    /// Reads `path` into newline/carriage-return-stripped lines. The path
    /// is only associated after a successful read; an open failure is fatal
    /// for the caller.
    pub fn open_file(&mut self, path: PathBuf) -> Result<Vec<String>> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let lines = content.lines().map(str::to_string).collect();
        log::info!("opened {}", path.display());
        self.current_path = Some(path);
        Ok(lines)
    }

    /// Serializes the document and writes it to the associated path.
    /// Returns the number of lines written.
    ///
    /// The write is a plain one-shot `fs::write` with no rename-on-save, so
    /// a failure after truncation can lose data. Accepted limitation.
    pub fn save_file(&self, document: &Document) -> Result<usize> {
        let path = self
            .current_path
            .as_ref()
            .context("no file path associated")?;
        let text = document.rows_to_text();
        fs::write(path, text.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("saved {} ({} bytes)", path.display(), text.len());
        Ok(document.len())
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}
