//! End-to-end flows through `handle_event`, driving the state machine the way
//! the plugin shim does.

use bookfinder::{
    handle_event, initialize, Action, AppState, Config, Event, InputFocus, SearchRequest, ViewMode,
};
use serde_json::json;
use tempfile::TempDir;

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).expect("event handled").1
}

fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
    text.chars().flat_map(|c| send(state, Event::Char(c))).collect()
}

fn fetches(actions: &[Action]) -> Vec<SearchRequest> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::Fetch(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

/// Fires one timer per scheduled debounce and collects the resulting fetches.
fn settle(state: &mut AppState, actions: &[Action]) -> Vec<SearchRequest> {
    let timers = actions
        .iter()
        .filter(|a| matches!(a, Action::ScheduleDebounce { .. }))
        .count();
    (0..timers)
        .flat_map(|_| fetches(&send(state, Event::TimerElapsed)))
        .collect()
}

fn dune_page(num_found: u64, count: usize, offset: usize) -> Vec<u8> {
    let docs: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "key": format!("/works/OL{}W", offset + i),
                "title": format!("Dune {}", offset + i),
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965,
                "cover_i": 1000 + offset + i,
            })
        })
        .collect();
    serde_json::to_vec(&json!({ "numFound": num_found, "docs": docs })).unwrap()
}

fn complete(state: &mut AppState, request: &SearchRequest, body: Vec<u8>) {
    send(
        state,
        Event::SearchCompleted {
            request_id: request.request_id,
            status: 200,
            body,
        },
    );
}

#[test]
fn test_dune_scenario_pages_through_results() {
    let mut state = AppState::default();

    let actions = type_text(&mut state, "dune");
    let requests = settle(&mut state, &actions);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].page, 1);
    assert!(requests[0].url.ends_with("?title=dune&page=1"));
    assert!(state.search.loading);

    complete(&mut state, &requests[0], dune_page(120, 100, 0));
    assert!(!state.search.loading);
    assert_eq!(state.search.total_found, 120);
    assert_eq!(state.search.results.len(), 100);

    let vm = state.compute_viewmodel(40, 80);
    let pagination = vm.pagination.expect("pagination shown");
    assert_eq!((pagination.page, pagination.total_pages), (1, 2));
    assert!(!pagination.has_prev);
    assert!(pagination.has_next);

    send(&mut state, Event::Escape);
    assert_eq!(state.focus, InputFocus::Results);

    let next = fetches(&send(&mut state, Event::NextPage));
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].page, 2);
    assert_eq!(next[0].query, "dune");

    complete(&mut state, &next[0], dune_page(120, 20, 100));
    assert_eq!(state.controller.page(), 2);
    assert_eq!(state.search.results.len(), 20);
    assert_eq!(state.search.results[0].key, "/works/OL100W");

    // Already on the last page.
    assert!(fetches(&send(&mut state, Event::NextPage)).is_empty());

    let prev = fetches(&send(&mut state, Event::PrevPage));
    assert_eq!(prev[0].page, 1);
}

#[test]
fn test_rapid_typing_sends_one_request_for_final_text() {
    let mut state = AppState::default();

    let mut actions = type_text(&mut state, "war");
    actions.extend(send(&mut state, Event::Backspace));
    actions.extend(type_text(&mut state, "r and peace"));

    let requests = settle(&mut state, &actions);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "war and peace");
    assert!(requests[0].url.contains("title=war%20and%20peace"));
    assert_eq!(requests[0].page, 1);
}

#[test]
fn test_stale_response_is_dropped() {
    let mut state = AppState::default();

    let actions = type_text(&mut state, "dune");
    let old = settle(&mut state, &actions);
    let actions = type_text(&mut state, " messiah");
    let new = settle(&mut state, &actions);
    assert_eq!(old.len(), 1);
    assert_eq!(new.len(), 1);

    complete(&mut state, &new[0], dune_page(1, 1, 500));
    complete(&mut state, &old[0], dune_page(120, 100, 0));

    assert_eq!(state.search.total_found, 1);
    assert_eq!(state.search.results[0].key, "/works/OL500W");
}

#[test]
fn test_clearing_query_resets_without_network() {
    let mut state = AppState::default();

    let actions = type_text(&mut state, "dune");
    let requests = settle(&mut state, &actions);
    complete(&mut state, &requests[0], dune_page(120, 100, 0));

    let mut actions = vec![];
    for _ in 0..4 {
        actions.extend(send(&mut state, Event::Backspace));
    }
    assert!(fetches(&actions).is_empty());
    assert!(settle(&mut state, &actions).is_empty());
    assert!(state.search.results.is_empty());
    assert_eq!(state.search.total_found, 0);
    assert_eq!(state.controller.page(), 1);
}

#[test]
fn test_filters_apply_to_fetched_page() {
    let mut state = AppState::default();

    send(&mut state, Event::FocusAuthorFilter);
    type_text(&mut state, "austen");
    send(&mut state, Event::FocusYearFilter);
    type_text(&mut state, "1813");
    send(&mut state, Event::FocusQuery);
    type_text(&mut state, "pride");

    let requests = fetches(&send(&mut state, Event::Submit));
    assert_eq!(requests.len(), 1);

    let body = serde_json::to_vec(&json!({
        "numFound": 3,
        "docs": [
            { "key": "/works/A", "title": "Pride and Prejudice", "author_name": ["Jane Austen"], "first_publish_year": 1813 },
            { "key": "/works/B", "title": "Pride of Emma", "author_name": ["Jane Austen"], "first_publish_year": 1815 },
            { "key": "/works/C", "title": "Pride in Russia", "author_name": ["Leo Tolstoy"], "first_publish_year": 1813 },
        ]
    }))
    .unwrap();
    complete(&mut state, &requests[0], body);

    assert_eq!(state.search.total_found, 3);
    let keys: Vec<_> = state.search.results.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, ["/works/A"]);
}

#[test]
fn test_failed_fetch_shows_error_and_keeps_results() {
    let mut state = AppState::default();

    let actions = type_text(&mut state, "dune");
    let requests = settle(&mut state, &actions);
    complete(&mut state, &requests[0], dune_page(120, 100, 0));

    let retry = fetches(&send(&mut state, Event::Submit));
    send(
        &mut state,
        Event::SearchCompleted {
            request_id: retry[0].request_id,
            status: 503,
            body: b"unavailable".to_vec(),
        },
    );

    assert!(!state.search.loading);
    assert!(state.search.last_error.is_some());
    assert_eq!(state.search.results.len(), 100);
}

#[test]
fn test_favorites_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: temp_dir.path().to_string_lossy().into_owned(),
        ..Config::default()
    };

    let mut state = initialize(&config);
    let actions = type_text(&mut state, "dune");
    let requests = settle(&mut state, &actions);
    complete(&mut state, &requests[0], dune_page(120, 100, 0));

    send(&mut state, Event::Escape);
    send(&mut state, Event::ToggleFavorite);
    send(&mut state, Event::KeyDown);
    send(&mut state, Event::ToggleFavorite);
    assert_eq!(state.favorites.len(), 2);

    let restarted = initialize(&config);
    let keys: Vec<_> = restarted.favorites.books().iter().map(|b| b.key.as_str()).collect();
    // Most recently added first.
    assert_eq!(keys, ["/works/OL1W", "/works/OL0W"]);
}

#[test]
fn test_remove_in_favorites_view() {
    let mut state = AppState::default();
    let actions = type_text(&mut state, "dune");
    let requests = settle(&mut state, &actions);
    complete(&mut state, &requests[0], dune_page(3, 3, 0));

    send(&mut state, Event::Escape);
    send(&mut state, Event::ToggleFavorite);
    send(&mut state, Event::ToggleView);
    assert_eq!(state.view_mode, ViewMode::Favorites);
    assert_eq!(state.visible_books().len(), 1);

    send(&mut state, Event::RemoveFavorite);
    assert!(state.favorites.is_empty());
    assert!(state.compute_viewmodel(40, 80).empty_state.is_some());
}

#[test]
fn test_open_selected_builds_record_link() {
    let mut state = AppState::default();
    let actions = type_text(&mut state, "dune");
    let requests = settle(&mut state, &actions);
    complete(&mut state, &requests[0], dune_page(1, 1, 7));

    let actions = send(&mut state, Event::OpenSelected);
    assert_eq!(
        actions,
        vec![Action::OpenLink {
            url: "https://openlibrary.org/works/OL7W".to_string()
        }]
    );
}
