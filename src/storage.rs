//! Writing response bodies and the run summary to disk

use crate::error::{AppError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes pretty-printed JSON files into one output directory
#[derive(Debug, Clone)]
pub struct ResponseWriter {
    output_dir: PathBuf,
}

impl ResponseWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            AppError::io(format!("Failed to create output directory {}: {}", self.output_dir.display(), e))
        })
    }

    /// Serialize `data` with two-space indentation and write it to `file_name`
    ///
    /// Non-ASCII text is written as UTF-8, not escaped.
    pub fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, data: &T) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let mut content = serde_json::to_string_pretty(data)?;
        content.push('\n');
        fs::write(&path, content)
            .map_err(|e| AppError::io(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}
