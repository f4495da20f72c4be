//! Persistence slot abstraction.
//!
//! The favorites list lives in a single named slot holding one serialized document.
//! [`FavoritesSlot`] is deliberately as small as a key-value cell: read the whole
//! value, overwrite the whole value. Encoding is the caller's business.

use crate::domain::error::Result;

/// A single named, overwritable value.
///
/// # Implementations
///
/// - [`JsonFileSlot`](crate::storage::JsonFileSlot): one file in the data directory,
///   written atomically
///
/// # Examples
///
/// ```no_run
/// use bookfinder::storage::{FavoritesSlot, JsonFileSlot};
///
/// let mut slot = JsonFileSlot::new("/data", "bf_favorites_v1");
/// slot.write("[]")?;
/// assert_eq!(slot.read()?.as_deref(), Some("[]"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait FavoritesSlot: std::fmt::Debug + Send {
    /// Returns the stored value, or `Ok(None)` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored value in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not complete. Implementations must leave
    /// the previous value intact in that case.
    fn write(&mut self, contents: &str) -> Result<()>;

    /// Slot name, for logs.
    fn name(&self) -> &str;
}
