//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the plugin's own data directory is mounted at `/data`
//! and the host filesystem (the directory Zellij was started from) at `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_data_dir};
