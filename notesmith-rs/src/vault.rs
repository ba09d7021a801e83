//! Vault representation and operations.

use crate::config::Config;
use crate::error::{NoteError, Result};
use crate::lock::PathLocks;
use crate::note::Note;
use crate::patch::{self, PatchOperation, PatchTarget};
use crate::periodic::{self, Period};
use crate::search::{self, SearchOptions, SearchResult};
use crate::storage::{FsStorage, Storage, validate_relative_path};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// A folder of notes behind a [`Storage`] backend.
///
/// Every read-modify-write cycle on a path runs under that path's lock, so
/// concurrent edits through one `Vault` never lose each other's changes.
pub struct Vault<S: Storage = FsStorage> {
    storage: S,
    locks: PathLocks,
    config: Config,
}

impl Vault<FsStorage> {
    /// Open the vault rooted at `root`.
    pub fn open(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        Ok(Self::with_storage(FsStorage::new(root)?, config))
    }

    pub fn root(&self) -> &Path {
        self.storage.root()
    }
}

impl<S: Storage> Vault<S> {
    pub fn with_storage(storage: S, config: Config) -> Self {
        Self {
            storage,
            locks: PathLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Normalize a note path (add .md extension if needed) and validate it.
    pub fn normalize_note_path(&self, path: &str) -> Result<PathBuf> {
        let path = path.trim().trim_start_matches("./");
        let path = if path.ends_with(".md") {
            PathBuf::from(path)
        } else {
            PathBuf::from(format!("{}.md", path))
        };
        validate_relative_path(&path)?;
        Ok(path)
    }

    /// Check if a note exists.
    pub fn note_exists(&self, path: &Path) -> Result<bool> {
        self.storage.exists(path)
    }

    /// Load and parse a note.
    pub fn load_note(&self, path: &Path) -> Result<Note> {
        let content = self.storage.read_file(path)?;
        let stat = self.storage.stat_file(path)?;
        Ok(Note::parse(path, content).with_stat(stat))
    }

    /// List note paths, optionally below a folder.
    pub fn list_notes(&self, prefix: Option<&Path>) -> Result<Vec<PathBuf>> {
        self.storage.list_files(prefix)
    }

    /// Load every note in the vault. Unreadable notes are skipped.
    pub fn load_all(&self) -> Result<Vec<Note>> {
        let paths = self.list_notes(None)?;
        let mut notes = Vec::with_capacity(paths.len());
        for path in paths {
            match self.storage.read_file(&path) {
                Ok(content) => notes.push(Note::parse(path, content)),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping note"),
            }
        }
        Ok(notes)
    }

    /// Create a note; fails if it exists unless `overwrite` is set.
    pub fn create_note(&self, path: &Path, content: &str, overwrite: bool) -> Result<Note> {
        let _guard = self.locks.acquire(path);
        if !overwrite && self.storage.exists(path)? {
            return Err(NoteError::NoteAlreadyExists(path.to_path_buf()));
        }
        self.storage.write_file(path, content)?;
        tracing::info!(path = %path.display(), overwrite, "created note");
        Ok(Note::parse(path, content))
    }

    /// Append to the end of a note, creating it when absent.
    pub fn append_note(&self, path: &Path, content: &str) -> Result<Note> {
        let _guard = self.locks.acquire(path);
        let current = self.read_or_empty(path)?;
        let updated = patch::append_to_document(&current, content);
        self.storage.write_file(path, &updated)?;
        tracing::info!(path = %path.display(), bytes = content.len(), "appended to note");
        Ok(Note::parse(path, updated))
    }

    /// Apply a targeted patch to an existing note.
    pub fn patch_note(
        &self,
        path: &Path,
        target: &PatchTarget,
        operation: PatchOperation,
        content: &str,
    ) -> Result<Note> {
        let _guard = self.locks.acquire(path);
        let current = self.storage.read_file(path)?;
        let updated = patch::patch(&current, target, operation, content)?;
        self.storage.write_file(path, &updated)?;
        tracing::info!(path = %path.display(), %target, %operation, "patched note");
        Ok(Note::parse(path, updated))
    }

    /// Compute a patch without writing it.
    pub fn preview_patch(
        &self,
        path: &Path,
        target: &PatchTarget,
        operation: PatchOperation,
        content: &str,
    ) -> Result<String> {
        let current = self.storage.read_file(path)?;
        patch::patch(&current, target, operation, content)
    }

    /// Delete a note.
    pub fn delete_note(&self, path: &Path) -> Result<()> {
        let _guard = self.locks.acquire(path);
        self.storage.delete_file(path)?;
        tracing::info!(path = %path.display(), "deleted note");
        Ok(())
    }

    /// Search all notes.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        let corpus = self.load_all()?;
        Ok(search::search_with_options(query, &corpus, options))
    }

    /// Path of the periodic note covering `date`.
    pub fn periodic_path(&self, period: Period, date: NaiveDate) -> Result<PathBuf> {
        periodic::resolve_periodic_path(self.config.periodic.settings(period), period, date)
    }

    /// Append to the periodic note for `date` (today when `None`), creating it
    /// from the period's template when absent. The note is written once.
    pub fn append_periodic(
        &self,
        period: Period,
        date: Option<NaiveDate>,
        content: &str,
    ) -> Result<Note> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let path = self.periodic_path(period, date)?;

        let _guard = self.locks.acquire(&path);
        let current = if self.storage.exists(&path)? {
            self.storage.read_file(&path)?
        } else {
            tracing::info!(path = %path.display(), %period, "creating periodic note");
            self.periodic_template(period, &path, date)?
        };

        let updated = patch::append_to_document(&current, content);
        self.storage.write_file(&path, &updated)?;
        Ok(Note::parse(path, updated))
    }

    fn periodic_template(&self, period: Period, path: &Path, date: NaiveDate) -> Result<String> {
        let Some(template) = &self.config.periodic.settings(period).template else {
            return Ok(String::new());
        };
        let template_path = self.normalize_note_path(&template.to_string_lossy())?;
        match self.storage.read_file(&template_path) {
            Ok(body) => Ok(periodic::render_template(&body, path, date)),
            Err(NoteError::NoteNotFound(_)) => Err(NoteError::TemplateNotFound(template_path)),
            Err(e) => Err(e),
        }
    }

    fn read_or_empty(&self, path: &Path) -> Result<String> {
        match self.storage.read_file(path) {
            Ok(content) => Ok(content),
            Err(NoteError::NoteNotFound(_)) => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}
