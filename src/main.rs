//! Zellij plugin wrapper and entry point.
//!
//! The only place that talks to the Zellij host. Host events are translated
//! into library [`Event`]s, handed to [`handle_event`], and the returned
//! [`Action`]s are executed here.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, restore favorites
//! 2. **Permissions**: Request `WebAccess` and `RunCommands`
//! 3. **Subscribe**: Key, Timer, `WebRequestResult`, `RunCommandResult`,
//!    `PermissionRequestResult`
//! 4. **Update**: Map events, delegate to the library, execute actions
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Timer` → `Event::TimerElapsed`
//! - `WebRequestResult` → `Event::SearchCompleted` (request id from context)
//! - `RunCommandResult` of the opener with non-zero exit → `Event::OpenFailed`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move selection down / up
//!
//! While typing in the query, author or year field:
//! - Characters edit the field, `Backspace` deletes
//! - `Enter`: Search now
//! - `Tab`: Next field
//! - `Esc`: Focus results
//! - `Ctrl+x`: Clear filters
//!
//! With the results focused:
//! - `j`/`k`/`Down`/`Up`: Move selection
//! - `h`/`l`/`Left`/`Right`: Previous / next page
//! - `f`/`Space`: Toggle favorite
//! - `o`/`Enter`: Open record link
//! - `/`, `a`, `y`: Focus query, author, year
//! - `c`: Clear filters
//! - `v`: Toggle search / favorites view
//! - `1` / `2`: Show search / favorites view
//! - `d`/`x`: Remove favorite (favorites view)
//! - `q`/`Esc`: Close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookfinder::{handle_event, Action, Config, Event, InputFocus, SearchRequest};

register_plugin!(State);

/// Context key marking `run_command` calls made to open a link.
const OPEN_CONTEXT_KEY: &str = "bookfinder_open";

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: bookfinder::AppState,

    /// Command used to open record links.
    opener: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookfinder::AppState::default(),
            opener: bookfinder::DEFAULT_OPENER.to_string(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookfinder::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            search_endpoint = %config.search_endpoint,
            data_dir = %config.data_dir,
            "parsed configuration"
        );
        self.app = bookfinder::initialize(&config);
        self.opener.clone_from(&config.opener);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!(favorites = self.app.favorites.len(), "plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::TimerElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result_event(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events based on the focused field.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('x') => Some(Event::ClearFilters),
                _ => None,
            };
        }

        if self.app.focus.is_typing() {
            return Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Enter => Event::Submit,
                BareKey::Tab => Event::FocusNext,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        debug_assert_eq!(self.app.focus, InputFocus::Results);
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Char('f' | ' ') => Event::ToggleFavorite,
            BareKey::Enter | BareKey::Char('o') => Event::OpenSelected,
            BareKey::Char('/') => Event::FocusQuery,
            BareKey::Char('a') => Event::FocusAuthorFilter,
            BareKey::Char('y') => Event::FocusYearFilter,
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('v') => Event::ToggleView,
            BareKey::Char('1') => Event::ShowSearch,
            BareKey::Char('2') => Event::ShowFavorites,
            BareKey::Char('d' | 'x') => Event::RemoveFavorite,
            BareKey::Tab => Event::FocusNext,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a finished web request to a search completion.
    ///
    /// Requests without our request id in the context are not ours.
    fn map_web_result_event(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(request_id) = SearchRequest::request_id_from(context) else {
            tracing::debug!(status, "ignoring web response without request id");
            return None;
        };
        tracing::debug!(status, request_id, body_len = body.len(), "web request result");
        Some(Event::SearchCompleted {
            request_id,
            status,
            body,
        })
    }

    /// Maps the opener's exit status; success needs no state change.
    fn map_command_result_event(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        if !context.contains_key(OPEN_CONTEXT_KEY) || exit_code == Some(0) {
            return None;
        }

        let stderr = String::from_utf8_lossy(stderr);
        let error = match (exit_code, stderr.trim()) {
            (_, message) if !message.is_empty() => message.to_string(),
            (Some(code), _) => format!("opener exited with status {code}"),
            (None, _) => "opener was terminated".to_string(),
        };
        tracing::warn!(exit_code = ?exit_code, error = %error, "opening link failed");
        Some(Event::OpenFailed { error })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                hide_self();
            }
            Action::ScheduleDebounce { seconds } => {
                set_timeout(*seconds);
            }
            Action::Fetch(request) => {
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    Vec::new(),
                    request.context(),
                );
            }
            Action::OpenLink { url } => {
                let mut context = BTreeMap::new();
                context.insert(OPEN_CONTEXT_KEY.to_string(), url.clone());
                run_command(&[self.opener.as_str(), url.as_str()], context);
            }
        }
    }
}
