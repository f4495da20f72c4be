//! Bookfinder: a Zellij plugin for searching Open Library by title.
//!
//! Bookfinder provides:
//! - Debounced title search against the Open Library search API
//! - Client-side author and first-publish-year filters
//! - Paged results (100 per page) with Prev / Next navigation
//! - A favorites list persisted as JSON in the plugin data directory

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │  Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search Layer  │   │ Storage Layer │
//! │ (ui/)         │   │ (search/)     │   │ (storage/)    │
//! │ - Rendering   │   │ - Debounce    │   │ - Favorites   │
//! │ - Theming     │   │ - Client      │   │ - JSON slot   │
//! │ - Components  │   │ - Filters     │   │ - Slot trait  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Book model (domain/book)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never talks to the Zellij host itself. [`handle_event`]
//! mutates [`AppState`] and returns [`Action`]s (schedule a timer, issue a
//! web request, open a link, close the pane) which the shim executes. Host
//! results come back in as [`Event`]s.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookfinder.wasm" {
//!         theme "catppuccin-mocha"
//!         data_dir "/data"
//!         opener "xdg-open"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookfinder::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//!
//! for c in "dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//!
//! // One timer per keystroke; only the last one fires the fetch.
//! let mut fetches = 0;
//! for _ in 0..4 {
//!     let (_, actions) = handle_event(&mut state, &Event::TimerElapsed)?;
//!     fetches += actions.iter().filter(|a| matches!(a, Action::Fetch(_))).count();
//! }
//! assert_eq!(fetches, 1);
//! # Ok::<(), bookfinder::BookfinderError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputFocus, ViewMode};
pub use domain::{BookRecord, BookfinderError, Result};
pub use search::{SearchClient, SearchRequest};
pub use storage::{FavoritesStore, JsonFileSlot, MemorySlot, FAVORITES_SLOT};
pub use ui::Theme;

use search::client::{DEFAULT_COVER_ENDPOINT, DEFAULT_RECORD_BASE_URL, DEFAULT_SEARCH_ENDPOINT};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Command used to open record links when `opener` is not configured.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/bookfinder.wasm" {
///     search_endpoint "https://openlibrary.org/search.json"
///     cover_endpoint "https://covers.openlibrary.org/b/id"
///     record_base_url "https://openlibrary.org"
///     data_dir "/data"
///     opener "xdg-open"
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Open Library search endpoint.
    pub search_endpoint: String,

    /// Cover image endpoint; `/{cover_i}-M.jpg` is appended.
    pub cover_endpoint: String,

    /// Base URL that record keys (`/works/...`) are appended to.
    pub record_base_url: String,

    /// Directory for the favorites file and traces.
    ///
    /// `~` expands to `/host`. An empty value keeps favorites in memory only
    /// and disables trace export. Default: `/data`
    pub data_dir: String,

    /// Command used to open record links. Default: `xdg-open`
    pub opener: String,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            cover_endpoint: DEFAULT_COVER_ENDPOINT.to_string(),
            record_base_url: DEFAULT_RECORD_BASE_URL.to_string(),
            data_dir: infrastructure::get_data_dir().to_string_lossy().into_owned(),
            opener: DEFAULT_OPENER.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or blank values fall back to the defaults, except `data_dir`
    /// where a present but blank value disables persistence.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookfinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("opener".to_string(), "open".to_string());
    /// map.insert("data_dir".to_string(), "~/.bookfinder".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.opener, "open");
    /// assert_eq!(config.search_endpoint, "https://openlibrary.org/search.json");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            search_endpoint: value("search_endpoint").unwrap_or(defaults.search_endpoint),
            cover_endpoint: value("cover_endpoint").unwrap_or(defaults.cover_endpoint),
            record_base_url: value("record_base_url").unwrap_or(defaults.record_base_url),
            data_dir: config
                .get("data_dir")
                .map_or(defaults.data_dir, |v| v.trim().to_string()),
            opener: value("opener").unwrap_or(defaults.opener),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// The data directory with `~` expanded, or `None` when persistence is off.
    #[must_use]
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        infrastructure::resolve_data_dir(&self.data_dir)
    }

    /// Builds the search client from the configured endpoints.
    #[must_use]
    pub fn search_client(&self) -> SearchClient {
        SearchClient::new(
            self.search_endpoint.trim_end_matches('?'),
            self.cover_endpoint.trim_end_matches('/'),
            self.record_base_url.trim_end_matches('/'),
        )
    }

    /// Loads the configured theme, falling back to the default on failure.
    ///
    /// `theme_file` wins over `theme_name`.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Initializes the plugin state from configuration.
///
/// Loads the theme, builds the search client and restores favorites from
/// `<data_dir>/bf_favorites_v1.json`. Absent or corrupt favorites start an
/// empty list. Tracing is initialized separately by the shim via
/// [`observability::init_tracing`].
///
/// ```rust
/// use bookfinder::{initialize, Config};
///
/// let config = Config {
///     data_dir: String::new(),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert!(state.favorites.is_empty());
/// assert!(state.search.results.is_empty());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing bookfinder plugin");

    let favorites = match config.resolved_data_dir() {
        Some(dir) => FavoritesStore::load(Box::new(JsonFileSlot::new(dir, FAVORITES_SLOT))),
        None => {
            tracing::info!("no data directory configured, favorites kept in memory");
            FavoritesStore::load(Box::new(MemorySlot::default()))
        }
    };

    AppState::new(config.search_client(), favorites, config.load_theme())
}
