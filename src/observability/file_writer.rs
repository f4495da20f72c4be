//! Rotating file writer with size-based rotation and numbered backups.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files kept after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to a file and rotates it once it grows past the limit.
///
/// Rotation shifts `<file>.1` → `<file>.2` and so on, dropping anything past
/// [`MAX_BACKUP_FILES`], then moves the live file to `<file>.1`. The file is
/// opened lazily on the first write.
///
/// # Thread Safety
///
/// The handle sits behind a `Mutex`, so the exporter can share one writer
/// across threads even though the plugin itself is single-threaded.
///
/// # Example
///
/// ```rust,ignore
/// use std::path::PathBuf;
///
/// let writer = FileWriter::new(PathBuf::from("/data/bookfinder-otlp.json"));
/// writer.write_line("{\"resourceSpans\":[]}")?;
/// ```
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer that rotates at 10 MB.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Path to the log file (created if it doesn't exist)
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            writer: Mutex::new(None),
        }
    }

    /// Writes `line` plus a newline and flushes.
    ///
    /// The size check happens before the write, so a file may exceed the limit
    /// by one line before it is rotated.
    ///
    /// # Parameters
    ///
    /// * `line` - One JSON document without a trailing newline
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotation, opening or writing fails,
    /// or if the lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate_files()?;
        }

        let file = match writer.as_mut() {
            Some(file) => file,
            None => writer.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            ),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate_files(&self) -> io::Result<()> {
        let oldest = backup_path(&self.file_path, MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = backup_path(&self.file_path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.file_path, index + 1))?;
            }
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, backup_path(&self.file_path, 1))?;
        }
        Ok(())
    }
}

fn backup_path(file_path: &Path, index: usize) -> PathBuf {
    let mut name = file_path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
