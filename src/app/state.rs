//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin.
//! It owns every piece of session state: the query controller, the displayed search
//! results, the favorites store, and UI focus. View models are computed on demand
//! from it and never stored.
//!
//! # State Components
//!
//! - **Controller**: Query text, page, debounce and request sequencing
//! - **Search**: Results of the last accepted fetch and the filter inputs
//! - **Favorites**: Saved books, persisted on every change
//! - **Pending filters**: Filter snapshot taken when the in-flight fetch was sent
//! - **Focus / View Mode**: Keybinding interpretation and which list is shown
//!
//! # Example
//!
//! ```rust
//! use bookfinder::AppState;
//!
//! let state = AppState::default();
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.tabs.len(), 2);
//! ```

use super::actions::Action;
use super::modes::{InputFocus, ViewMode};
use crate::domain::BookRecord;
use crate::search::{pagination, FetchTicket, FilterCriteria, QueryController, SearchClient, SearchState};
use crate::storage::{FavoritesStore, MemorySlot};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Banner, BannerKind, BookCard, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo,
    PaginationInfo, SearchBarInfo, TabInfo, UIViewModel, CARD_HEIGHT, CHROME_ROWS,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Placeholder shown for books without a cover.
pub const NO_COVER: &str = "No cover";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Endpoint configuration for requests and links.
    pub client: SearchClient,

    /// Owner of the query text and current page.
    pub controller: QueryController,

    /// Displayed search results and filter inputs.
    pub search: SearchState,

    /// Saved books.
    pub favorites: FavoritesStore,

    /// Which list is displayed.
    pub view_mode: ViewMode,

    /// Which widget receives key input.
    pub focus: InputFocus,

    /// Zero-based index of the selected card in the displayed list.
    ///
    /// Clamped after every change to the list; wraps during navigation.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// One-off message, e.g. a failed link open. Cleared by the next fetch.
    pub notice: Option<String>,

    /// Request id and filter snapshot of the in-flight fetch.
    pending: Option<(u64, FilterCriteria)>,
}

impl Default for AppState {
    /// State with default endpoints and an in-memory favorites slot.
    fn default() -> Self {
        Self::new(
            SearchClient::default(),
            FavoritesStore::load(Box::new(MemorySlot::default())),
            Theme::default(),
        )
    }
}

impl AppState {
    /// Creates a new application state, focused on the empty query field.
    #[must_use]
    pub fn new(client: SearchClient, favorites: FavoritesStore, theme: Theme) -> Self {
        Self {
            client,
            controller: QueryController::new(),
            search: SearchState::new(),
            favorites,
            view_mode: ViewMode::Search,
            focus: InputFocus::Query,
            selected_index: 0,
            theme,
            notice: None,
            pending: None,
        }
    }

    /// Books in the currently displayed list.
    #[must_use]
    pub fn visible_books(&self) -> &[BookRecord] {
        match self.view_mode {
            ViewMode::Search => &self.search.results,
            ViewMode::Favorites => self.favorites.books(),
        }
    }

    #[must_use]
    pub fn selected_book(&self) -> Option<&BookRecord> {
        self.visible_books().get(self.selected_index)
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the selection inside the displayed list after it shrank.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_books().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
    }

    /// Turns a controller ticket into a host request.
    ///
    /// Captures the filter inputs as they are now; the response will be filtered
    /// with this snapshot regardless of later edits.
    pub fn dispatch(&mut self, ticket: FetchTicket) -> Action {
        let request = self
            .client
            .build_request(&ticket.query, ticket.page, ticket.request_id);

        self.pending = Some((ticket.request_id, self.search.criteria()));
        self.search.begin_fetch();
        self.notice = None;

        Action::Fetch(request)
    }

    /// Applies a host response if it answers the latest request.
    ///
    /// Returns whether anything changed.
    pub fn complete_search(&mut self, request_id: u64, status: u16, body: &[u8]) -> bool {
        let _span = tracing::debug_span!("complete_search", request_id, status).entered();

        if !self.controller.accept(request_id) {
            return false;
        }

        let criteria = match self.pending.take() {
            Some((id, criteria)) if id == request_id => criteria,
            _ => FilterCriteria::default(),
        };

        match self.client.parse_response(status, body) {
            Ok(page) => {
                tracing::info!(
                    num_found = page.num_found,
                    docs = page.books.len(),
                    "search results received"
                );
                self.search.apply_page(page, &criteria);
                if self.view_mode == ViewMode::Search {
                    self.selected_index = 0;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.search.apply_error(e.to_string());
            }
        }

        true
    }

    /// Drops results after the query was blanked.
    pub fn clear_search(&mut self) {
        self.pending = None;
        self.search.clear_results();
        self.clamp_selection();
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate how many cards fit after subtracting UI chrome
    /// 2. Center window around selected index (selected index at midpoint)
    /// 3. Adjust window if near start/end to maximize visible items
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let books = self.visible_books();

        let capacity = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let mut visible_start = self.selected_index.saturating_sub(capacity / 2);
        let visible_end = (visible_start + capacity).min(books.len());
        if visible_end - visible_start.min(visible_end) < capacity && books.len() >= capacity {
            visible_start = visible_end.saturating_sub(capacity);
        }
        let visible_start = visible_start.min(visible_end);

        let matcher = self.highlight_query().map(|q| (SkimMatcherV2::default(), q));

        let cards = books[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, book)| {
                let highlight = matcher.as_ref().map(|(m, q)| (m, q.as_str()));
                self.compute_card(book, visible_start + relative_idx, highlight)
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.controller.query().to_string(),
                is_focused: self.focus == InputFocus::Query,
            },
            filter_bar: self.compute_filter_bar(),
            banner: self.compute_banner(),
            cards,
            pagination: self.compute_pagination(),
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(),
        }
    }

    // Titles are highlighted against the query of the fetch that produced them,
    // not the text currently being typed.
    fn highlight_query(&self) -> Option<String> {
        if self.view_mode != ViewMode::Search {
            return None;
        }
        self.controller
            .last_dispatched_query()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
    }

    fn compute_card(
        &self,
        book: &BookRecord,
        absolute_idx: usize,
        highlight: Option<(&SkimMatcherV2, &str)>,
    ) -> BookCard {
        let year = match self.view_mode {
            ViewMode::Search => Some(book.year_display()),
            ViewMode::Favorites => None,
        };

        BookCard {
            title: book.title.clone(),
            authors: book.authors_display(),
            year,
            cover: book
                .cover_url(self.client.cover_endpoint())
                .unwrap_or_else(|| NO_COVER.to_string()),
            link: book.record_url(self.client.record_base_url()),
            is_favorite: self.favorites.is_favorited(&book.key),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges: highlight
                .map_or_else(Vec::new, |(m, q)| compute_highlight_ranges(&book.title, q, m)),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: " Book Finder ".to_string(),
            tabs: vec![
                TabInfo {
                    label: " Search ".to_string(),
                    is_active: self.view_mode == ViewMode::Search,
                },
                TabInfo {
                    label: format!(" Favorites ({}) ", self.favorites.len()),
                    is_active: self.view_mode == ViewMode::Favorites,
                },
            ],
        }
    }

    fn compute_filter_bar(&self) -> Option<FilterBarInfo> {
        (self.view_mode == ViewMode::Search).then(|| FilterBarInfo {
            author: self.search.author_filter.clone(),
            year: self.search.year_filter.clone(),
            author_focused: self.focus == InputFocus::AuthorFilter,
            year_focused: self.focus == InputFocus::YearFilter,
        })
    }

    fn compute_banner(&self) -> Option<Banner> {
        if let Some(notice) = &self.notice {
            return Some(Banner {
                kind: BannerKind::Notice,
                message: notice.clone(),
            });
        }
        if self.view_mode != ViewMode::Search {
            return None;
        }
        if self.search.loading {
            return Some(Banner {
                kind: BannerKind::Loading,
                message: "Loading...".to_string(),
            });
        }
        self.search.last_error.as_ref().map(|error| Banner {
            kind: BannerKind::Error,
            message: format!("Error: {error}"),
        })
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        if self.view_mode != ViewMode::Search || self.search.total_found == 0 {
            return None;
        }
        let page = self.controller.page();
        Some(PaginationInfo {
            page,
            total_pages: pagination::total_pages(self.search.total_found),
            has_prev: pagination::prev_page(page).is_some(),
            has_next: pagination::next_page(page, self.search.total_found).is_some(),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.visible_books().is_empty() {
            return None;
        }

        let (message, subtitle) = match self.view_mode {
            ViewMode::Favorites => (
                "No favorites yet.",
                "Press f on a search result to save it",
            ),
            ViewMode::Search if self.search.loading => return None,
            ViewMode::Search if self.controller.query().trim().is_empty() => (
                "Search Open Library by title",
                "Start typing; results appear after a short pause",
            ),
            ViewMode::Search => (
                "No matching books",
                "Try another title, or clear the filters and search again",
            ),
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.focus, self.view_mode) {
            (InputFocus::Query, _) => {
                "Type a title  Enter: search  Tab: next field  Esc: results  Ctrl+x: clear filters"
            }
            (InputFocus::AuthorFilter | InputFocus::YearFilter, _) => {
                "Type to filter  Enter: search  Tab: next field  Esc: results  Ctrl+x: clear filters"
            }
            (InputFocus::Results, ViewMode::Search) => {
                "j/k: move  h/l: page  f: save  o: open  /: query  a/y: filters  c: clear  v: favorites  q: quit"
            }
            (InputFocus::Results, ViewMode::Favorites) => {
                "j/k: move  d: remove  o: open  /: query  v: search  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Coalesces fuzzy match indices of `query` in `text` into `(start, end)` ranges.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
