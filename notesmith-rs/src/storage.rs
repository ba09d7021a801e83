//! Storage backends for note files.

use crate::error::{NoteError, Result};
use crate::types::FileStat;
use chrono::{DateTime, Utc};
use glob::glob;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Byte-level access to a tree of note files.
///
/// Paths are relative to the storage root.
pub trait Storage: Send + Sync {
    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Replace (or create) a file with `content`.
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Markdown files under `prefix` (or everywhere), sorted by path.
    fn list_files(&self, prefix: Option<&Path>) -> Result<Vec<PathBuf>>;

    fn stat_file(&self, path: &Path) -> Result<FileStat>;

    fn delete_file(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> Result<bool>;
}

/// Reject paths that could escape the storage root.
pub fn validate_relative_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(NoteError::InvalidPath(path.to_path_buf()));
    }
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || path.is_absolute() {
        return Err(NoteError::InvalidPath(path.to_path_buf()));
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// Filesystem storage rooted at a vault directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Open storage at `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(NoteError::VaultNotFound(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &Path) -> Result<PathBuf> {
        validate_relative_path(path)?;
        Ok(self.root.join(path))
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Atomic write: write to a temp file next to `path`, then rename over it.
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| NoteError::InvalidPath(path.to_path_buf()))?;
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = parent.join(format!(
        ".{}.tmp.{}.{}",
        file_name,
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    fs::write(&temp_path, contents)?;

    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up temp file on failure
        let _ = fs::remove_file(&temp_path);
        NoteError::Io(e)
    })?;

    Ok(())
}

impl Storage for FsStorage {
    fn read_file(&self, path: &Path) -> Result<String> {
        let full_path = self.full_path(path)?;
        match fs::read(&full_path) {
            Ok(bytes) => Ok(String::from_utf8(bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(NoteError::NoteNotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let full_path = self.full_path(path)?;
        atomic_write(&full_path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote note");
        Ok(())
    }

    fn list_files(&self, prefix: Option<&Path>) -> Result<Vec<PathBuf>> {
        let base = match prefix {
            Some(prefix) if !prefix.as_os_str().is_empty() => self.full_path(prefix)?,
            _ => self.root.clone(),
        };
        let pattern = glob::Pattern::escape(&base.to_string_lossy()) + "/**/*.md";

        let mut notes = Vec::new();
        for entry in glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if !path.is_file() {
                        continue;
                    }
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        // Skip hidden files and directories
                        if !is_hidden(relative) {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    fn stat_file(&self, path: &Path) -> Result<FileStat> {
        let full_path = self.full_path(path)?;
        let meta = match fs::metadata(&full_path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(NoteError::NoteNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(FileStat {
            size: meta.len(),
            created_at: meta.created().ok().map(DateTime::<Utc>::from),
            modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
        })
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        let full_path = self.full_path(path)?;
        match fs::remove_file(&full_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(NoteError::NoteNotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(self.full_path(path)?.is_file())
    }
}
