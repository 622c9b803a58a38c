//! Durable key-value storage for the saved game.
//!
//! A snapshot is two entries: the puzzle word and the guess history, each
//! encoded as JSON. A snapshot missing either entry, or with an entry that
//! fails to decode, reads back as no saved game.

use crate::error::StoreError;
use crate::{debug_log, info_log};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const PUZZLE_WORD_KEY: &str = "puzzle_word";
pub const GUESS_HISTORY_KEY: &str = "guess_history";

const SAVE_DIR_NAME: &str = "word-scramble";
const SAVE_FILE_NAME: &str = "save.json";

/// Named string entries that survive a restart.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Writes several entries as one unit. If any write fails, the entries
    /// already written by this call get their previous values back.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut written: Vec<(&str, Option<String>)> = Vec::new();
        for &(key, value) in entries {
            let previous = self.get(key).ok().flatten();
            if let Err(e) = self.set(key, value) {
                for (key, previous) in written.into_iter().rev() {
                    let restored = match previous {
                        Some(old) => self.set(key, &old),
                        None => self.remove(key),
                    };
                    if let Err(undo) = restored {
                        log::warn!("Failed to restore '{key}' after a failed write: {undo}");
                    }
                }
                return Err(e);
            }
            written.push((key, previous));
        }
        Ok(())
    }

    /// Removes every key in `keys`, carrying on past failures. Returns the
    /// first error seen.
    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in keys {
            if let Err(e) = self.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// The game as written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub puzzle_word: String,
    pub guess_history: Vec<String>,
}

/// Default location of the save file, if the platform has a data directory.
pub fn default_save_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(SAVE_DIR_NAME).join(SAVE_FILE_NAME))
}

pub fn save_snapshot<S: KeyValueStore + ?Sized>(
    store: &mut S,
    state: &PersistedState,
) -> Result<(), StoreError> {
    let word = serde_json::to_string(&state.puzzle_word)?;
    let history = serde_json::to_string(&state.guess_history)?;
    store.set_many(&[
        (PUZZLE_WORD_KEY, word.as_str()),
        (GUESS_HISTORY_KEY, history.as_str()),
    ])
}

/// Reads the snapshot back. Any failure counts as "no saved game".
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> Option<PersistedState> {
    let read = |key: &str| match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            debug_log!("load_snapshot() - Failed to read '{}': {}", key, e);
            None
        }
    };
    let word = read(PUZZLE_WORD_KEY)?;
    let history = read(GUESS_HISTORY_KEY)?;

    let puzzle_word: String = match serde_json::from_str(&word) {
        Ok(w) => w,
        Err(e) => {
            debug_log!("load_snapshot() - Bad puzzle word entry: {}", e);
            return None;
        }
    };
    let guess_history: Vec<String> = match serde_json::from_str(&history) {
        Ok(h) => h,
        Err(e) => {
            debug_log!("load_snapshot() - Bad guess history entry: {}", e);
            return None;
        }
    };
    if puzzle_word.is_empty() {
        return None;
    }
    Some(PersistedState {
        puzzle_word,
        guess_history,
    })
}

/// Removes the puzzle word first: once it is gone the snapshot reads as
/// absent even if removing the history fails.
pub fn clear_snapshot<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove_many(&[PUZZLE_WORD_KEY, GUESS_HISTORY_KEY])
}

/// In-process store. Nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All entries kept in one JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling, so a
/// crash mid-write leaves the previous file in place and `set_many` lands
/// all of its entries or none.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like `read_all`, but a corrupt file is treated as empty so that the
    /// next write replaces it.
    fn read_all_lenient(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_all() {
            Err(StoreError::Json(e)) => {
                log::warn!(
                    "Ignoring malformed save file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        info_log!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all_lenient()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.remove_many(&[key])
    }

    fn set_many(&mut self, new_entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut entries = self.read_all_lenient()?;
        for &(key, value) in new_entries {
            entries.insert(key.to_string(), value.to_string());
        }
        self.write_all(&entries)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        let mut entries = self.read_all_lenient()?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() != before {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
