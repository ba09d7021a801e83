//! Per-path mutual exclusion for read-modify-write cycles.

use parking_lot::{ArcMutexGuard, Mutex, RawMutex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Slot = Arc<Mutex<()>>;

/// Lazily created locks keyed by note path.
///
/// An entry lives only while some guard for it is held (or waited on).
#[derive(Debug, Default)]
pub struct PathLocks {
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock for `path` is held.
    pub fn acquire(&self, path: &Path) -> PathGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock();
            slots
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        let guard = slot.lock_arc();
        PathGuard {
            locks: self,
            path: path.to_path_buf(),
            guard: Some(guard),
        }
    }

    /// Number of paths with a live lock entry.
    pub fn active(&self) -> usize {
        self.slots.lock().len()
    }
}

/// Holds the lock for one path; releases it on drop.
pub struct PathGuard<'a> {
    locks: &'a PathLocks,
    path: PathBuf,
    guard: Option<ArcMutexGuard<RawMutex, ()>>,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        let mut slots = self.locks.slots.lock();
        if let Some(guard) = self.guard.take() {
            let slot = ArcMutexGuard::mutex(&guard).clone();
            drop(guard);
            // The map and this clone are the only owners left.
            if Arc::strong_count(&slot) == 2 {
                slots.remove(&self.path);
            }
        }
    }
}
