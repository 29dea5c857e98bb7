//! Saving rendered frames to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes one text file per step into a directory.
///
/// Files are named `<total_steps>.txt`, so frames from successive episodes
/// never overwrite each other.
#[derive(Debug, Clone)]
pub struct FrameWriter {
    dir: PathBuf,
}

impl FrameWriter {
    /// Create a writer for `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `frame` as `<total_steps>.txt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, total_steps: u64, frame: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{total_steps}.txt"));
        fs::write(&path, frame)?;
        Ok(path)
    }
}
