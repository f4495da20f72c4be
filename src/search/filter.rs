//! Client-side author and year filters.
//!
//! Filters run once per accepted fetch, over that page's records only. They are not
//! re-applied when the filter text changes afterwards.

use crate::domain::BookRecord;

/// Filter texts captured when a fetch is dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against all author names.
    pub author: String,
    /// Exact decimal year.
    pub year: String,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(author: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            year: year.into(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.author.is_empty() && self.year.is_empty()
    }

    /// Whether a single record passes both filters.
    #[must_use]
    pub fn matches(&self, book: &BookRecord) -> bool {
        self.author_matches(book) && self.year_matches(book)
    }

    fn author_matches(&self, book: &BookRecord) -> bool {
        if self.author.is_empty() {
            return true;
        }
        book.authors
            .join(" ")
            .to_lowercase()
            .contains(&self.author.to_lowercase())
    }

    // A record with no year never passes a non-empty year filter.
    fn year_matches(&self, book: &BookRecord) -> bool {
        if self.year.is_empty() {
            return true;
        }
        book.first_publish_year
            .is_some_and(|year| year.to_string() == self.year)
    }
}

/// Keeps the records that pass `criteria`, preserving order.
#[must_use]
pub fn apply(books: Vec<BookRecord>, criteria: &FilterCriteria) -> Vec<BookRecord> {
    if criteria.is_empty() {
        return books;
    }
    books.into_iter().filter(|book| criteria.matches(book)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(key: &str, authors: &[&str], year: Option<i32>) -> BookRecord {
        let mut book = BookRecord::new(key, key);
        book.authors = authors.iter().map(|a| (*a).to_string()).collect();
        book.first_publish_year = year;
        book
    }

    fn sample() -> Vec<BookRecord> {
        vec![
            book("/works/A", &["Jane Austen"], Some(1813)),
            book("/works/B", &["Leo Tolstoy"], Some(1869)),
            book("/works/C", &[], None),
        ]
    }

    #[test]
    fn empty_criteria_keep_everything() {
        assert_eq!(apply(sample(), &FilterCriteria::default()).len(), 3);
    }

    #[test]
    fn author_filter_is_case_insensitive_substring() {
        let kept = apply(sample(), &FilterCriteria::new("AUSTEN", ""));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key, "/works/A");
    }

    #[test]
    fn author_filter_spans_joined_names() {
        let books = vec![book("/works/D", &["Ann Smith", "Bob Jones"], None)];
        assert_eq!(apply(books, &FilterCriteria::new("smith bob", "")).len(), 1);
    }

    #[test]
    fn filters_are_conjunctive() {
        assert_eq!(
            apply(sample(), &FilterCriteria::new("tolstoy", "1813")).len(),
            0
        );
        assert_eq!(apply(sample(), &FilterCriteria::new("austen", "1813")).len(), 1);

        let same_year = vec![
            book("/works/A", &["Jane Austen"], Some(1813)),
            book("/works/T", &["Leo Tolstoy"], Some(1813)),
        ];
        assert_eq!(apply(same_year.clone(), &FilterCriteria::new("", "1813")).len(), 2);
        assert_eq!(apply(same_year.clone(), &FilterCriteria::new("austen", "")).len(), 1);
        let kept = apply(same_year, &FilterCriteria::new("austen", "1813"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key, "/works/A");
    }

    #[test]
    fn missing_year_never_matches_year_filter() {
        let kept = apply(sample(), &FilterCriteria::new("", "1869"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key, "/works/B");
    }

    #[test]
    fn year_match_is_exact_string() {
        assert!(apply(sample(), &FilterCriteria::new("", "181")).is_empty());
        assert!(apply(sample(), &FilterCriteria::new("", " 1813")).is_empty());
    }
}
