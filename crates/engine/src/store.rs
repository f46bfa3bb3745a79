//! Persistence boundary for the entry collection.
//!
//! The whole collection is the unit of storage: it is loaded once when the
//! engine is built and overwritten after every mutation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{FinancialEntry, ResultEngine};

/// Whole-collection snapshot storage.
pub trait EntryStore {
    /// Returns the stored collection, or an empty one when nothing usable is
    /// stored.
    fn load_all(&self) -> ResultEngine<Vec<FinancialEntry>>;

    /// Replaces the stored collection with `entries`.
    fn save_all(&mut self, entries: &[FinancialEntry]) -> ResultEngine<()>;
}

/// Stores the collection as a pretty-printed JSON array in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for JsonFileStore {
    /// A missing file is an empty collection. A file that does not parse is
    /// logged and also treated as empty; the next save overwrites it.
    fn load_all(&self) -> ResultEngine<Vec<FinancialEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no snapshot at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Vec<FinancialEntry>>(&content) {
            Ok(entries) => {
                tracing::debug!(
                    "loaded {} entries from {}",
                    entries.len(),
                    self.path.display()
                );
                Ok(entries)
            }
            Err(err) => {
                tracing::warn!(
                    "failed to parse snapshot {}: {err}; starting empty",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&mut self, entries: &[FinancialEntry]) -> ResultEngine<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-memory store, used by tests and by callers that do not persist.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Vec<FinancialEntry>,
    saves: usize,
}

impl MemoryStore {
    /// A store whose snapshot already holds `entries`.
    pub fn with_entries(entries: Vec<FinancialEntry>) -> Self {
        Self { entries, saves: 0 }
    }

    pub fn entries(&self) -> &[FinancialEntry] {
        &self.entries
    }

    /// Number of `save_all` calls so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl EntryStore for MemoryStore {
    fn load_all(&self) -> ResultEngine<Vec<FinancialEntry>> {
        Ok(self.entries.clone())
    }

    fn save_all(&mut self, entries: &[FinancialEntry]) -> ResultEngine<()> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}
