//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::ui::viewmodel::UIViewModel;
//! use bookfinder::AppState;
//!
//! let state = AppState::default();
//! let vm: UIViewModel = state.compute_viewmodel(40, 100);
//! assert!(vm.cards.is_empty());
//! assert!(vm.empty_state.is_some());
//! ```

/// Lines taken by one rendered card, including its separator.
pub const CARD_HEIGHT: usize = 5;

/// Rows taken by everything except the cards: blank line, header, border,
/// search box (3), filter bar, banner, pagination, border, footer, and one
/// spare line at the bottom.
pub const CHROME_ROWS: usize = 12;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title and view tabs.
    pub header: HeaderInfo,

    /// Query input box.
    pub search_bar: SearchBarInfo,

    /// Author/year inputs; absent in the favorites view.
    pub filter_bar: Option<FilterBarInfo>,

    /// Loading or error line.
    pub banner: Option<Banner>,

    /// Visible window of cards.
    pub cards: Vec<BookCard>,

    /// Page controls; absent when nothing was found or in the favorites view.
    pub pagination: Option<PaginationInfo>,

    /// Shown instead of cards when the list is empty.
    pub empty_state: Option<EmptyState>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub tabs: Vec<TabInfo>,
}

/// One view tab in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    /// Tab text, including the favorites count where relevant.
    pub label: String,
    pub is_active: bool,
}

/// Query input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_focused: bool,
}

/// Filter inputs and which one has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub author: String,
    pub year: String,
    pub author_focused: bool,
    pub year_focused: bool,
}

/// Severity of a banner line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Loading,
    Error,
    Notice,
}

/// Single-line status message above the cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

/// Display information for one book.
///
/// Every text field is ready to print; placeholders for missing data are already
/// substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,

    /// Joined author names, or `Unknown`.
    pub authors: String,

    /// Year text; `None` in the favorites view, which has no year line.
    pub year: Option<String>,

    /// Cover image URL, or the `No cover` placeholder.
    pub cover: String,

    /// External record page.
    pub link: String,

    pub is_favorite: bool,
    pub is_selected: bool,

    /// Character ranges of `title` to highlight.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No favorites yet.").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
