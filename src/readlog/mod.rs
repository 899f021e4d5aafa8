//! Append-only read-state tracker.
//!
//! The backing store is a plain text file, one bare message ID per line,
//! read in full for every check. Checks are line-exact, so an ID that is a
//! substring of another (`12` inside `112`) never registers as read.
//! Failures surface as [`ForumError::ReadLog`] to the caller of the query;
//! they are not fatal to the process.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::app::{ForumError, Result};

/// Environment override for the backing file path.
pub const READLOG_FILE_ENV: &str = "PCXFORUM_READLOG_FILE";

const DEFAULT_FILE_NAME: &str = ".maniacread.log";

#[derive(Debug)]
pub struct ReadLog {
    path: PathBuf,
    // Serializes the check-then-append pair for concurrent callers.
    lock: Mutex<()>,
}

impl ReadLog {
    /// Open the read log at `path`, creating an empty file if absent.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| ForumError::ReadLog {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Open the read log at the default location: the `PCXFORUM_READLOG_FILE`
    /// environment variable, else `~/.maniacread.log`.
    pub fn open_default() -> Result<Self> {
        Self::new(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(READLOG_FILE_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir()
            .ok_or_else(|| ForumError::Config("could not determine home directory".into()))?;
        Ok(home.join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `id` has been marked read. The empty ID is never read.
    pub fn is_read(&self, id: &str) -> Result<bool> {
        if id.is_empty() {
            return Ok(false);
        }
        let contents = self.read_contents()?;
        Ok(contents.lines().any(|line| line.trim() == id))
    }

    /// Record `id` as read. Idempotent; marking twice leaves the log
    /// unchanged.
    pub fn mark_read(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Ok(());
        }

        let _guard = self.lock.lock().expect("read log lock poisoned");

        let contents = self.read_contents()?;
        if contents.lines().any(|line| line.trim() == id) {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.store_error(source))?;
        writeln!(file, "{}", id).map_err(|source| self.store_error(source))?;
        Ok(())
    }

    fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| self.store_error(source))
    }

    fn store_error(&self, source: std::io::Error) -> ForumError {
        ForumError::ReadLog {
            path: self.path.clone(),
            source,
        }
    }
}
