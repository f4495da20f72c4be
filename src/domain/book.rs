//! Book record domain model.
//!
//! A [`BookRecord`] is the normalized representation of one search result or one
//! saved favorite. Records are built once from a search response document and never
//! mutated afterwards; identity is the Open Library work key (e.g. `/works/OL45883W`).

use serde::{Deserialize, Serialize};

/// Text shown in place of an empty author list.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Glyph shown in place of a missing first-publish year.
pub const MISSING_YEAR: &str = "—";

/// Normalized book record.
///
/// Serialized with the Open Library field names so that the favorites slot stays
/// readable next to raw API output:
///
/// ```json
/// {
///   "key": "/works/OL893415W",
///   "title": "Dune",
///   "author_name": ["Frank Herbert"],
///   "first_publish_year": 1965,
///   "cover_i": 11481354
/// }
/// ```
///
/// Absent optionals are omitted on write and default to `None` on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Opaque identifier, also the path of the record on openlibrary.org.
    pub key: String,

    /// Work title.
    #[serde(default)]
    pub title: String,

    /// Author names in the order the endpoint returned them.
    #[serde(rename = "author_name", default)]
    pub authors: Vec<String>,

    /// Year of first publication, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,

    /// Numeric cover identifier, if the work has a cover.
    #[serde(rename = "cover_i", default, skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<i64>,
}

impl BookRecord {
    /// Creates a record with no authors, year, or cover.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::BookRecord;
    ///
    /// let book = BookRecord::new("/works/OL1W", "Emma");
    /// assert!(book.authors.is_empty());
    /// assert_eq!(book.authors_display(), "Unknown");
    /// ```
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            authors: Vec::new(),
            first_publish_year: None,
            cover_id: None,
        }
    }

    /// Author names joined with `", "`, or [`UNKNOWN_AUTHOR`] when the list is empty.
    #[must_use]
    pub fn authors_display(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// First-publish year as text, or [`MISSING_YEAR`] when absent.
    #[must_use]
    pub fn year_display(&self) -> String {
        self.first_publish_year
            .map_or_else(|| MISSING_YEAR.to_string(), |year| year.to_string())
    }

    /// Medium-size cover image URL derived from the cover id.
    ///
    /// Returns `None` when the record has no cover, in which case the view shows a
    /// placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::BookRecord;
    ///
    /// let mut book = BookRecord::new("/works/OL1W", "Emma");
    /// assert_eq!(book.cover_url("https://covers.openlibrary.org/b/id"), None);
    ///
    /// book.cover_id = Some(42);
    /// assert_eq!(
    ///     book.cover_url("https://covers.openlibrary.org/b/id").as_deref(),
    ///     Some("https://covers.openlibrary.org/b/id/42-M.jpg"),
    /// );
    /// ```
    #[must_use]
    pub fn cover_url(&self, cover_endpoint: &str) -> Option<String> {
        self.cover_id
            .map(|id| format!("{}/{id}-M.jpg", cover_endpoint.trim_end_matches('/')))
    }

    /// External page for this record, built by appending the key to the site root.
    #[must_use]
    pub fn record_url(&self, record_base_url: &str) -> String {
        format!("{}{}", record_base_url.trim_end_matches('/'), self.key)
    }
}
