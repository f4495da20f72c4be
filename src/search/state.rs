//! Transient result state shown by the search view.

use super::filter::{self, FilterCriteria};
use super::response::SearchPage;
use crate::domain::BookRecord;

/// Displayed results plus the filter inputs; never persisted.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub total_found: u64,
    /// Records of the last accepted page, after filtering.
    pub results: Vec<BookRecord>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub author_filter: String,
    pub year_filter: String,
}

impl SearchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current filter inputs, taken when a fetch is dispatched.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.author_filter.clone(), self.year_filter.clone())
    }

    /// Empties results after the query was cleared. Filter inputs are kept.
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.total_found = 0;
        self.last_error = None;
        self.loading = false;
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.last_error = None;
    }

    /// Publishes an accepted page filtered with the criteria captured at dispatch.
    pub fn apply_page(&mut self, page: SearchPage, criteria: &FilterCriteria) {
        self.total_found = page.num_found;
        self.results = filter::apply(page.books, criteria);
        self.loading = false;
    }

    /// Records a failed fetch. Previously displayed results stay on screen.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.loading = false;
    }

    /// Resets both filter inputs without touching results.
    pub fn clear_filters(&mut self) {
        self.author_filter.clear();
        self.year_filter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(num_found: u64, keys: &[&str]) -> SearchPage {
        SearchPage {
            num_found,
            books: keys.iter().map(|k| BookRecord::new(*k, *k)).collect(),
        }
    }

    #[test]
    fn accepted_page_replaces_results_and_clears_loading() {
        let mut state = SearchState::new();
        state.begin_fetch();
        state.apply_page(page(120, &["/works/A", "/works/B"]), &FilterCriteria::default());

        assert!(!state.loading);
        assert_eq!(state.total_found, 120);
        assert_eq!(state.results.len(), 2);

        state.apply_page(page(120, &["/works/C"]), &FilterCriteria::default());
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].key, "/works/C");
    }

    #[test]
    fn error_keeps_previous_results() {
        let mut state = SearchState::new();
        state.apply_page(page(1, &["/works/A"]), &FilterCriteria::default());
        state.begin_fetch();
        state.apply_error("HTTP 500");

        assert_eq!(state.last_error.as_deref(), Some("HTTP 500"));
        assert_eq!(state.results.len(), 1);
        assert!(!state.loading);

        state.begin_fetch();
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn clearing_results_keeps_filters() {
        let mut state = SearchState::new();
        state.author_filter = "austen".to_string();
        state.apply_page(page(5, &["/works/A"]), &FilterCriteria::default());
        state.clear_results();

        assert!(state.results.is_empty());
        assert_eq!(state.total_found, 0);
        assert_eq!(state.author_filter, "austen");
    }

    #[test]
    fn clear_filters_leaves_results_alone() {
        let mut state = SearchState::new();
        state.author_filter = "x".to_string();
        state.year_filter = "1900".to_string();
        state.apply_page(page(1, &["/works/A"]), &FilterCriteria::default());
        state.clear_filters();

        assert!(state.criteria().is_empty());
        assert_eq!(state.results.len(), 1);
    }
}
