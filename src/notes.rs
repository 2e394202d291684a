//! Append-only note log.
//!
//! One CRLF-terminated line per note. Nothing in the assistant ever edits
//! or deletes a recorded line.

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Handle to the note log file.
#[derive(Debug, Clone)]
pub struct NoteLog {
    path: PathBuf,
}

impl NoteLog {
    /// Create a handle; the file itself is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append exactly one note line, creating parent directories and the
    /// file as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be written.
    pub fn append(&self, note: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write!(file, "{note}\r\n")?;
        Ok(())
    }
}
