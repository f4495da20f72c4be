//! Local persistence for saved books.
//!
//! # Modules
//!
//! - `backend`: Slot trait abstraction for persistence backends
//! - `json`: File-backed slot with atomic writes
//! - `memory`: In-memory slot used when persistence is disabled
//! - `favorites`: The favorites list and its persistence policy

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;

pub use backend::FavoritesSlot;
pub use favorites::FavoritesStore;
pub use json::JsonFileSlot;
pub use memory::MemorySlot;

/// Slot holding the favorites list.
pub const FAVORITES_SLOT: &str = "bf_favorites_v1";
