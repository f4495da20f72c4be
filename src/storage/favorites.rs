//! The saved-books list.
//!
//! Ordered most-recently-added first and unique by key. The full list is written
//! back to its slot after every change; a failed write is logged and otherwise
//! ignored, so the in-memory list is always the source of truth for the session.

use crate::domain::error::{BookfinderError, Result};
use crate::domain::BookRecord;
use crate::storage::backend::FavoritesSlot;

/// Favorites list bound to a persistence slot.
#[derive(Debug)]
pub struct FavoritesStore {
    slot: Box<dyn FavoritesSlot>,
    books: Vec<BookRecord>,
}

impl FavoritesStore {
    /// Loads the list from `slot`.
    ///
    /// An absent slot yields an empty list. So does an unreadable or corrupt one,
    /// with a warning; the next mutation overwrites it.
    pub fn load(slot: Box<dyn FavoritesSlot>) -> Self {
        let _span = tracing::info_span!("favorites_load", slot = %slot.name()).entered();

        let books = match Self::read_books(slot.as_ref()) {
            Ok(books) => books,
            Err(e) => {
                tracing::warn!(error = %e, "favorites unreadable, starting empty");
                Vec::new()
            }
        };

        tracing::info!(count = books.len(), "favorites loaded");
        Self { slot, books }
    }

    fn read_books(slot: &dyn FavoritesSlot) -> Result<Vec<BookRecord>> {
        let Some(contents) = slot.read()? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&contents)
            .map_err(|e| BookfinderError::Storage(format!("failed to parse favorites: {e}")))
    }

    /// Saves `book` at the front of the list unless its key is already saved.
    pub fn add(&mut self, book: BookRecord) {
        if self.is_favorited(&book.key) {
            tracing::debug!(key = %book.key, "already a favorite");
            return;
        }

        tracing::info!(key = %book.key, title = %book.title, "adding favorite");
        self.books.insert(0, book);
        self.persist();
    }

    /// Drops the book with `key`, if saved.
    pub fn remove(&mut self, key: &str) {
        let before = self.books.len();
        self.books.retain(|book| book.key != key);

        if self.books.len() == before {
            tracing::debug!(key, "not a favorite, nothing to remove");
            return;
        }

        tracing::info!(key, "removed favorite");
        self.persist();
    }

    /// Adds the book if absent, removes it otherwise. Returns the new status.
    pub fn toggle(&mut self, book: &BookRecord) -> bool {
        if self.is_favorited(&book.key) {
            self.remove(&book.key);
            false
        } else {
            self.add(book.clone());
            true
        }
    }

    #[must_use]
    pub fn is_favorited(&self, key: &str) -> bool {
        self.books.iter().any(|book| book.key == key)
    }

    #[must_use]
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.books)
            .map_err(|e| BookfinderError::Storage(format!("failed to serialize favorites: {e}")))
            .and_then(|json| self.slot.write(&json));

        if let Err(e) = result {
            tracing::warn!(error = %e, slot = %self.slot.name(), "failed to persist favorites");
        }
    }
}
