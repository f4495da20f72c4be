//! In-memory slot for sessions without a data directory.
//!
//! Clones share the same cell, so a caller can keep a handle to inspect what the
//! favorites store wrote after handing it a boxed clone.

use crate::domain::error::Result;
use crate::storage::backend::FavoritesSlot;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    cell: Arc<Mutex<Cell>>,
}

#[derive(Debug, Default)]
struct Cell {
    value: Option<String>,
    writes: usize,
}

impl MemorySlot {
    /// Number of completed writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cell> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FavoritesSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.lock().value.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        let mut cell = self.lock();
        cell.value = Some(contents.to_string());
        cell.writes += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
