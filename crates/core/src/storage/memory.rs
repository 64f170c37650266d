use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::errors::PersistenceError;
use crate::models::holding::Holding;

use super::format::{self, DEFAULT_KEY};
use super::traits::PersistenceAdapter;

/// In-process key → text store. Useful for embedding and tests.
#[derive(Debug)]
pub struct MemoryStorage {
    key: String,
    slots: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slots: Mutex::new(HashMap::new()),
            writes: Mutex::new(0),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw text currently stored under this adapter's key.
    pub fn raw(&self) -> Option<String> {
        self.slots().get(&self.key).cloned()
    }

    /// Overwrite the slot with arbitrary text (e.g., to simulate corruption).
    pub fn put_raw(&self, text: impl Into<String>) {
        self.slots().insert(self.key.clone(), text.into());
    }

    pub fn clear(&self) {
        self.slots().remove(&self.key);
    }

    /// Number of successful `save` calls.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still usable.
        self.slots.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceAdapter for MemoryStorage {
    fn save(&self, holdings: &[Holding]) -> Result<(), PersistenceError> {
        let text = format::encode(holdings)?;
        self.slots().insert(self.key.clone(), text);
        *self.writes.lock().unwrap_or_else(|p| p.into_inner()) += 1;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Holding>, PersistenceError> {
        let text = self.raw().ok_or(PersistenceError::NotFound)?;
        format::decode(&text)
    }
}
