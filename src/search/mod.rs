//! Title search against the Open Library endpoint.
//!
//! # Organization
//!
//! - [`client`]: Request composition and response decoding
//! - [`response`]: Wire format and record mapping
//! - [`controller`]: Debounce, pagination trigger, and response sequencing
//! - [`filter`]: Client-side author/year filters
//! - [`pagination`]: Page arithmetic
//! - [`state`]: Displayed results

pub mod client;
pub mod controller;
pub mod filter;
pub mod pagination;
pub mod response;
pub mod state;

pub use client::{SearchClient, SearchRequest};
pub use controller::{FetchTicket, QueryChange, QueryController, QUIET_PERIOD};
pub use filter::FilterCriteria;
pub use pagination::{total_pages, PAGE_SIZE};
pub use response::{RawDoc, RawSearchResponse, SearchPage};
pub use state::SearchState;
