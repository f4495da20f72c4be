//! Wire format of the search endpoint and its mapping into [`BookRecord`].
//!
//! The endpoint returns loosely-shaped documents: any field except the key may be
//! missing. Decoding is tolerant (every field has a serde default) and the mapping
//! into a fully-typed record is done explicitly by [`BookRecord::from_doc`].

use crate::domain::BookRecord;
use serde::Deserialize;

/// Top-level search response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResponse {
    /// Total number of matches across all pages.
    #[serde(rename = "numFound", default)]
    pub num_found: u64,

    /// Documents on the requested page (at most 100).
    #[serde(default)]
    pub docs: Vec<RawDoc>,
}

/// One document as returned by the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDoc {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub cover_i: Option<i64>,
}

/// One decoded page of results, before client-side filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    /// Total matches reported by the endpoint.
    pub num_found: u64,
    /// Mapped records in endpoint order.
    pub books: Vec<BookRecord>,
}

impl BookRecord {
    /// Maps a raw document into a record.
    ///
    /// Default policy per field:
    ///
    /// | field                | when missing          |
    /// |----------------------|-----------------------|
    /// | `key`                | document is dropped   |
    /// | `title`              | empty string          |
    /// | `author_name`        | empty list            |
    /// | `first_publish_year` | `None`                |
    /// | `cover_i`            | `None`                |
    ///
    /// A document with an empty key is treated the same as a missing one.
    #[must_use]
    pub fn from_doc(doc: RawDoc) -> Option<Self> {
        let key = doc.key.filter(|key| !key.is_empty())?;
        Some(Self {
            key,
            title: doc.title.unwrap_or_default(),
            authors: doc.author_name.unwrap_or_default(),
            first_publish_year: doc.first_publish_year,
            cover_id: doc.cover_i,
        })
    }
}

impl From<RawSearchResponse> for SearchPage {
    fn from(raw: RawSearchResponse) -> Self {
        let doc_count = raw.docs.len();
        let books: Vec<BookRecord> = raw.docs.into_iter().filter_map(BookRecord::from_doc).collect();

        if books.len() < doc_count {
            tracing::debug!(
                dropped = doc_count - books.len(),
                "skipped documents without a key"
            );
        }

        Self {
            num_found: raw.num_found,
            books,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_take_documented_defaults() {
        let raw: RawSearchResponse = serde_json::from_str(
            r#"{"numFound": 1, "docs": [{"key": "/works/OL1W", "title": "Emma"}]}"#,
        )
        .unwrap();
        let page = SearchPage::from(raw);

        assert_eq!(page.num_found, 1);
        assert_eq!(page.books.len(), 1);
        let book = &page.books[0];
        assert_eq!(book.title, "Emma");
        assert!(book.authors.is_empty());
        assert_eq!(book.first_publish_year, None);
        assert_eq!(book.cover_id, None);
    }

    #[test]
    fn documents_without_key_are_dropped() {
        let raw: RawSearchResponse = serde_json::from_str(
            r#"{"numFound": 3, "docs": [
                {"title": "no key"},
                {"key": "", "title": "empty key"},
                {"key": "/works/OL2W", "title": "kept", "author_name": ["A"], "cover_i": 7}
            ]}"#,
        )
        .unwrap();
        let page = SearchPage::from(raw);

        assert_eq!(page.books.len(), 1);
        assert_eq!(page.books[0].key, "/works/OL2W");
        assert_eq!(page.books[0].cover_id, Some(7));
        assert_eq!(page.num_found, 3);
    }

    #[test]
    fn missing_count_and_docs_decode_as_empty_page() {
        let raw: RawSearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(SearchPage::from(raw), SearchPage::default());
    }
}
