//! Domain layer for the Bookfinder plugin.
//!
//! Core types independent of Zellij APIs and of the search endpoint's wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book record model and its display/URL helpers

pub mod book;
pub mod error;

pub use book::{BookRecord, MISSING_YEAR, UNKNOWN_AUTHOR};
pub use error::{BookfinderError, Result};
