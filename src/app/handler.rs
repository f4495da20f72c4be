//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! host callbacks, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `PrevPage`, `NextPage`
//! - **Input**: `Char`, `Backspace`, `Submit`, `ClearFilters`
//! - **Focus / View**: `FocusNext`, `FocusQuery`, `Escape`, `ShowFavorites`, ...
//! - **Favorites**: `ToggleFavorite`, `RemoveFavorite`, `OpenSelected`
//! - **Host**: `TimerElapsed`, `SearchCompleted`, `PermissionsResult`, `OpenFailed`
//!
//! # Example
//!
//! ```rust
//! use bookfinder::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (render, actions) = handle_event(&mut state, &Event::Char('d'))?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::ScheduleDebounce { seconds: 0.5 }]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::modes::{InputFocus, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::search::{pagination, QueryChange};

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane. Pending and in-flight searches keep running.
    CloseFocus,

    /// Appends a character to the focused text field.
    Char(char),
    /// Removes the last character from the focused text field.
    Backspace,
    /// Fetches page 1 of the current query immediately.
    Submit,

    /// Cycles focus query, author, year, results.
    FocusNext,
    FocusQuery,
    FocusAuthorFilter,
    FocusYearFilter,
    /// Leaves a text field for the result list.
    Escape,
    /// Empties both filter fields. Takes effect on the next fetch.
    ClearFilters,

    PrevPage,
    NextPage,

    /// Saves the selected book, or removes it if already saved.
    ToggleFavorite,
    /// Removes the selected book from favorites.
    RemoveFavorite,
    /// Opens the selected book's record page.
    OpenSelected,

    ShowSearch,
    ShowFavorites,
    ToggleView,

    /// One debounce timer elapsed.
    TimerElapsed,

    /// The host answered a search request.
    SearchCompleted {
        /// Request id echoed back in the response context.
        request_id: u64,
        /// HTTP status.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// Reports whether the requested host permissions were granted.
    PermissionsResult {
        granted: bool,
    },

    /// The opener command failed.
    OpenFailed {
        /// Error output of the command.
        error: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether the UI should re-render, and the actions to execute in sequence.
///
/// # Errors
///
/// Fetch failures are not errors here: they are recorded in the search state and
/// shown in the error banner.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Char(c) => Ok(edit_focused_field(state, |text| text.push(*c))),
        Event::Backspace => Ok(edit_focused_field(state, |text| {
            text.pop();
        })),
        Event::Submit => match state.controller.submit() {
            Some(ticket) => Ok((true, vec![state.dispatch(ticket)])),
            None => {
                tracing::debug!("blank query, nothing to submit");
                Ok((false, vec![]))
            }
        },
        Event::FocusNext => {
            if state.view_mode == ViewMode::Favorites {
                return Ok((false, vec![]));
            }
            state.focus = state.focus.next();
            Ok((true, vec![]))
        }
        Event::FocusQuery => Ok(focus_field(state, InputFocus::Query)),
        Event::FocusAuthorFilter => Ok(focus_field(state, InputFocus::AuthorFilter)),
        Event::FocusYearFilter => Ok(focus_field(state, InputFocus::YearFilter)),
        Event::Escape => {
            state.focus = InputFocus::Results;
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.search.clear_filters();
            Ok((true, vec![]))
        }
        Event::PrevPage => {
            let target = pagination::prev_page(state.controller.page());
            Ok(change_page(state, target))
        }
        Event::NextPage => {
            let target = pagination::next_page(state.controller.page(), state.search.total_found);
            Ok(change_page(state, target))
        }
        Event::ToggleFavorite => {
            let Some(book) = state.selected_book().cloned() else {
                return Ok((false, vec![]));
            };
            state.favorites.toggle(&book);
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::RemoveFavorite => {
            let Some(key) = state.selected_book().map(|book| book.key.clone()) else {
                return Ok((false, vec![]));
            };
            if !state.favorites.is_favorited(&key) {
                return Ok((false, vec![]));
            }
            state.favorites.remove(&key);
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(book) = state.selected_book() else {
                return Ok((false, vec![]));
            };
            let url = book.record_url(state.client.record_base_url());
            tracing::debug!(url = %url, "opening record");
            Ok((false, vec![Action::OpenLink { url }]))
        }
        Event::ShowSearch => Ok(show_view(state, ViewMode::Search)),
        Event::ShowFavorites => Ok(show_view(state, ViewMode::Favorites)),
        Event::ToggleView => {
            let view_mode = state.view_mode.toggled();
            Ok(show_view(state, view_mode))
        }
        Event::TimerElapsed => match state.controller.on_timer() {
            Some(ticket) => Ok((true, vec![state.dispatch(ticket)])),
            None => Ok((false, vec![])),
        },
        Event::SearchCompleted {
            request_id,
            status,
            body,
        } => {
            let changed = state.complete_search(*request_id, *status, body);
            state.clamp_selection();
            Ok((changed, vec![]))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::info!("permissions granted");
                Ok((false, vec![]))
            } else {
                tracing::warn!("permissions denied - searches and links will not work");
                state.notice = Some("Permissions denied: web access is required to search".to_string());
                Ok((true, vec![]))
            }
        }
        Event::OpenFailed { error } => {
            tracing::warn!(error = %error, "opener command failed");
            state.notice = Some(format!("Could not open link: {}", error.trim()));
            Ok((true, vec![]))
        }
    }
}

/// Applies `edit` to whichever text field has focus.
///
/// Query edits go through the controller, which either arms a debounced fetch or
/// reports the query as cleared. Filter edits only change the stored text.
fn edit_focused_field(state: &mut AppState, edit: impl FnOnce(&mut String)) -> (bool, Vec<Action>) {
    match state.focus {
        InputFocus::Query => {
            let mut query = state.controller.query().to_string();
            edit(&mut query);
            tracing::trace!(query = %query, "query updated");

            match state.controller.set_query(query) {
                QueryChange::Cleared => {
                    state.clear_search();
                    (true, vec![])
                }
                QueryChange::Scheduled { seconds } => (true, vec![Action::ScheduleDebounce { seconds }]),
            }
        }
        InputFocus::AuthorFilter => {
            edit(&mut state.search.author_filter);
            (true, vec![])
        }
        InputFocus::YearFilter => {
            edit(&mut state.search.year_filter);
            (true, vec![])
        }
        InputFocus::Results => (false, vec![]),
    }
}

// Filter fields only exist in the search view, so focusing one switches to it.
fn focus_field(state: &mut AppState, focus: InputFocus) -> (bool, Vec<Action>) {
    if state.view_mode == ViewMode::Favorites && focus != InputFocus::Query {
        show_view(state, ViewMode::Search);
    }
    state.focus = focus;
    (true, vec![])
}

fn change_page(state: &mut AppState, target: Option<u32>) -> (bool, Vec<Action>) {
    if state.view_mode != ViewMode::Search || state.search.total_found == 0 {
        return (false, vec![]);
    }
    let Some(page) = target else {
        tracing::debug!(page = state.controller.page(), "already at the edge of the result pages");
        return (false, vec![]);
    };

    match state.controller.change_page(page) {
        Some(ticket) => (true, vec![state.dispatch(ticket)]),
        None => {
            tracing::debug!("query edited since last fetch, ignoring page change");
            (false, vec![])
        }
    }
}

fn show_view(state: &mut AppState, view_mode: ViewMode) -> (bool, Vec<Action>) {
    if state.view_mode == view_mode {
        return (false, vec![]);
    }
    state.view_mode = view_mode;
    state.selected_index = 0;
    if view_mode == ViewMode::Favorites {
        state.focus = InputFocus::Results;
    }
    (true, vec![])
}

/// Logs events without dumping response bodies.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::SearchCompleted {
                request_id, status, body,
            } => write!(f, "SearchCompleted(id={request_id}, status={status}, {} bytes)", body.len()),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookRecord;

    fn type_query(state: &mut AppState, text: &str) -> Vec<Action> {
        let mut actions = vec![];
        for c in text.chars() {
            let (_, mut more) = handle_event(state, &Event::Char(c)).unwrap();
            actions.append(&mut more);
        }
        actions
    }

    fn fetch_of(actions: &[Action]) -> &crate::search::SearchRequest {
        match actions {
            [Action::Fetch(request)] => request,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, request_id: u64, body: &str) {
        handle_event(
            state,
            &Event::SearchCompleted {
                request_id,
                status: 200,
                body: body.as_bytes().to_vec(),
            },
        )
        .unwrap();
    }

    #[test]
    fn typing_schedules_a_timer_per_keystroke_and_fetches_once() {
        let mut state = AppState::default();
        let scheduled = type_query(&mut state, "dune");
        assert_eq!(scheduled.len(), 4);

        let mut fetches = vec![];
        for _ in 0..4 {
            let (_, actions) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
            fetches.extend(actions);
        }
        let request = fetch_of(&fetches);
        assert_eq!(request.query, "dune");
        assert_eq!(request.page, 1);
        assert!(state.search.loading);
    }

    #[test]
    fn backspacing_to_empty_clears_without_fetching() {
        let mut state = AppState::default();
        type_query(&mut state, "d");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let id = fetch_of(&actions).request_id;
        respond(&mut state, id, r#"{"numFound": 1, "docs": [{"key": "/works/A"}]}"#);
        assert_eq!(state.search.results.len(), 1);

        let (_, actions) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(actions.is_empty());
        assert!(state.search.results.is_empty());
        assert_eq!(state.search.total_found, 0);
        assert_eq!(state.controller.page(), 1);

        let (_, actions) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn filter_typing_does_not_fetch() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::FocusAuthorFilter).unwrap();
        let actions = type_query(&mut state, "austen");
        assert!(actions.is_empty());
        assert_eq!(state.search.author_filter, "austen");

        handle_event(&mut state, &Event::FocusNext).unwrap();
        type_query(&mut state, "1813");
        assert_eq!(state.search.year_filter, "1813");

        handle_event(&mut state, &Event::ClearFilters).unwrap();
        assert!(state.search.author_filter.is_empty());
        assert!(state.search.year_filter.is_empty());
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut state = AppState::default();
        assert_eq!(handle_event(&mut state, &Event::Submit).unwrap(), (false, vec![]));
    }

    #[test]
    fn paging_is_clamped_to_available_pages() {
        let mut state = AppState::default();
        type_query(&mut state, "dune");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let id = fetch_of(&actions).request_id;
        respond(&mut state, id, r#"{"numFound": 120, "docs": [{"key": "/works/A"}]}"#);

        let (_, actions) = handle_event(&mut state, &Event::PrevPage).unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        let request = fetch_of(&actions);
        assert_eq!(request.page, 2);
        let id = request.request_id;
        respond(&mut state, id, r#"{"numFound": 120, "docs": [{"key": "/works/B"}]}"#);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.controller.page(), 2);
    }

    #[test]
    fn toggle_favorite_saves_and_removes_selected_book() {
        let mut state = AppState::default();
        state.search.results = vec![BookRecord::new("/works/A", "A")];
        state.focus = InputFocus::Results;

        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(state.favorites.is_favorited("/works/A"));

        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn removing_in_favorites_view_clamps_selection() {
        let mut state = AppState::default();
        state.favorites.add(BookRecord::new("/works/A", "A"));
        state.favorites.add(BookRecord::new("/works/B", "B"));
        handle_event(&mut state, &Event::ShowFavorites).unwrap();
        assert_eq!(state.focus, InputFocus::Results);

        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::RemoveFavorite).unwrap();
        assert_eq!(state.favorites.len(), 1);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn switching_views_neither_fetches_nor_clears() {
        let mut state = AppState::default();
        state.search.results = vec![BookRecord::new("/works/A", "A")];

        let (_, actions) = handle_event(&mut state, &Event::ToggleView).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.view_mode, ViewMode::Favorites);

        handle_event(&mut state, &Event::ToggleView).unwrap();
        assert_eq!(state.search.results.len(), 1);
    }

    #[test]
    fn open_selected_emits_record_link() {
        let mut state = AppState::default();
        state.search.results = vec![BookRecord::new("/works/OL45883W", "A")];

        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenLink {
                url: "https://openlibrary.org/works/OL45883W".to_string()
            }]
        );
    }

    #[test]
    fn closing_keeps_in_flight_request() {
        let mut state = AppState::default();
        type_query(&mut state, "dune");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let id = fetch_of(&actions).request_id;

        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);

        respond(&mut state, id, r#"{"numFound": 1, "docs": [{"key": "/works/A"}]}"#);
        assert_eq!(state.search.results.len(), 1);
        assert!(!state.search.loading);
    }

    #[test]
    fn closing_during_debounce_still_fetches() {
        let mut state = AppState::default();
        let actions = type_query(&mut state, "dune");
        handle_event(&mut state, &Event::Escape).unwrap();
        handle_event(&mut state, &Event::CloseFocus).unwrap();

        let mut fetched = vec![];
        for _ in actions.iter().filter(|a| matches!(a, Action::ScheduleDebounce { .. })) {
            let (_, mut more) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
            fetched.append(&mut more);
        }

        assert_eq!(fetched.len(), 1);
        assert_eq!(fetch_of(&fetched).query, "dune");
        assert!(state.search.loading);
    }

    #[test]
    fn show_search_and_show_favorites_select_view() {
        let mut state = AppState::default();
        let (render, _) = handle_event(&mut state, &Event::ShowFavorites).unwrap();
        assert!(render);
        assert_eq!(state.view_mode, ViewMode::Favorites);
        assert_eq!(state.focus, InputFocus::Results);

        let (render, _) = handle_event(&mut state, &Event::ShowSearch).unwrap();
        assert!(render);
        assert_eq!(state.view_mode, ViewMode::Search);

        let (render, _) = handle_event(&mut state, &Event::ShowSearch).unwrap();
        assert!(!render);
    }

    #[test]
    fn denied_permissions_surface_a_notice() {
        let mut state = AppState::default();
        let (render, _) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(render);
        assert!(state.notice.is_some());
    }
}
