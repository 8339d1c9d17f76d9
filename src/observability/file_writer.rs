//! Rotating file writer with size-based rotation and backup retention.
//!
//! Trace files grow with every exported batch. The writer rotates the file
//! once it passes a size threshold and keeps a fixed number of backups.

use crate::domain::error::{GalleryError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// When the current file exceeds the size limit it is renamed to
/// `<name>.json.<unix_nanos>` and a fresh file is started. Backups beyond the
/// retention limit are removed, oldest first.
pub struct FileWriter {
    /// Path to the primary file.
    file_path: PathBuf,
    /// Size that triggers rotation.
    max_bytes: u64,
    /// Backups kept after rotation.
    max_backups: usize,
    /// Lazily-initialized file handle (opens on first write).
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default 10 MB limit and 3 backups.
    ///
    /// The file is not opened until the first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too large.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Io`] if rotating, opening, writing or flushing
    /// fails, or if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    fn rotate(&self) -> Result<()> {
        let suffix = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        let backup_path = self.file_path.with_extension(format!("json.{suffix}"));

        fs::rename(&self.file_path, &backup_path)?;
        self.remove_old_backups()
    }

    /// Keeps the newest `max_backups` files named `<stem>.json.*`.
    ///
    /// Individual deletion failures are ignored so one stuck file does not
    /// block the rest of the cleanup.
    fn remove_old_backups(&self) -> Result<()> {
        let parent_dir = self.file_path.parent().unwrap_or_else(|| Path::new("."));
        let file_stem = self
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| GalleryError::Config(format!("invalid trace file name: {}", self.file_path.display())))?;
        let prefix = format!("{file_stem}.json.");

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Suffixes are nanosecond timestamps of equal width, so names sort by age.
        backups.sort();
        let excess = backups.len().saturating_sub(self.max_backups);
        for old_backup in backups.iter().take(excess) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
