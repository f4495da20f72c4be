//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these in sequence against the Zellij host API.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::Action;
//!
//! let actions = vec![
//!     Action::ScheduleDebounce { seconds: 0.5 },
//!     Action::OpenLink { url: "https://openlibrary.org/works/OL1W".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::search::SearchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Starts one host timer; its expiry comes back as a timer event.
    ScheduleDebounce {
        /// Delay in seconds.
        seconds: f64,
    },

    /// Issues a GET through the host, carrying the request id as context.
    Fetch(SearchRequest),

    /// Opens a record page with the configured opener command.
    OpenLink {
        /// Absolute URL of the record.
        url: String,
    },
}
