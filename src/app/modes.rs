//! Focus and view mode state types.
//!
//! # State Machine
//!
//! Input focus is on one of three text fields or on the result list. Text fields
//! take character input; the result list takes single-key commands.
//!
//! View modes control what the result list shows:
//! - **Search**: the last accepted result page
//! - **Favorites**: every saved book

/// Which widget receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    /// Title query field. Edits are debounced into a fetch.
    Query,

    /// Author filter field. Applied to the next fetch only.
    AuthorFilter,

    /// Year filter field. Applied to the next fetch only.
    YearFilter,

    /// Result or favorites list.
    ///
    /// Accepts j/k for movement, h/l for paging, f to toggle a favorite, o to open.
    Results,
}

impl InputFocus {
    /// Whether characters typed now edit a text field.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        !matches!(self, Self::Results)
    }

    /// Next focus in Tab order: query, author, year, results, query.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Query => Self::AuthorFilter,
            Self::AuthorFilter => Self::YearFilter,
            Self::YearFilter => Self::Results,
            Self::Results => Self::Query,
        }
    }
}

/// Which list is displayed.
///
/// Switching never fetches and never clears either list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Search results with filters and pagination.
    Search,

    /// Saved books, most recently added first.
    Favorites,
}

impl ViewMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Search => Self::Favorites,
            Self::Favorites => Self::Search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_cycles_through_every_focus() {
        let mut focus = InputFocus::Query;
        let mut seen = vec![focus];
        for _ in 0..3 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![
                InputFocus::Query,
                InputFocus::AuthorFilter,
                InputFocus::YearFilter,
                InputFocus::Results
            ]
        );
        assert_eq!(focus.next(), InputFocus::Query);
    }
}
