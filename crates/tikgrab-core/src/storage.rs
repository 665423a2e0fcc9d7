//! Output directory management and atomic file writes.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory downloaded files are saved into. Created once at construction,
/// idempotently.
#[derive(Debug, Clone)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Create (if missing) and wrap the output directory.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write `data` to `<dir>/<filename>`, fully or not at all: the bytes go
    /// to a `.part` temp file first, then a rename publishes the result.
    pub fn write_atomic(&self, filename: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        let final_path = self.dir.join(filename);
        let temp_path = self.dir.join(format!("{filename}.part"));

        let mut file = fs::File::create(&temp_path)?;
        if let Err(e) = file.write_all(data).and_then(|()| file.sync_all()) {
            drop(file);
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        drop(file);

        if let Err(e) = fs::rename(&temp_path, &final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(final_path)
    }
}
