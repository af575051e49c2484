use super::backend::PersistenceAdapter;
use crate::error::{ArchiveError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the archive is
/// single-threaded, so the trait can keep `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `save` fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make every following `load` fail.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Store a raw blob, bypassing serialization.
    pub fn insert_raw(&self, key: &str, blob: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl PersistenceAdapter for MemBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(ArchiveError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ArchiveError::Store("Simulated write error".to_string()));
        }
        self.insert_raw(key, blob);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
