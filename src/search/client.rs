//! Request composition and response decoding for the search endpoint.
//!
//! The client never performs I/O itself. [`SearchClient::build_request`] produces a
//! [`SearchRequest`] that the plugin shim hands to the host's `web_request`, and the
//! host's reply comes back through [`SearchClient::parse_response`].

use super::response::{RawSearchResponse, SearchPage};
use crate::domain::{BookfinderError, Result};
use std::collections::BTreeMap;

/// Default search endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";

/// Default cover image endpoint.
pub const DEFAULT_COVER_ENDPOINT: &str = "https://covers.openlibrary.org/b/id";

/// Default site root for record links.
pub const DEFAULT_RECORD_BASE_URL: &str = "https://openlibrary.org";

/// Context key carrying the request id through the host round-trip.
pub const REQUEST_ID_KEY: &str = "request_id";

/// One composed GET request, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Fully-encoded request URL.
    pub url: String,
    /// Sequence number used to discard out-of-order responses.
    pub request_id: u64,
    /// Query text as typed (untrimmed).
    pub query: String,
    /// 1-based page number.
    pub page: u32,
}

impl SearchRequest {
    /// Correlation context echoed back by the host with the response.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(REQUEST_ID_KEY.to_string(), self.request_id.to_string());
        context
    }

    /// Reads the request id back out of a response context.
    #[must_use]
    pub fn request_id_from(context: &BTreeMap<String, String>) -> Option<u64> {
        context.get(REQUEST_ID_KEY)?.parse().ok()
    }
}

/// Endpoint configuration for building requests and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClient {
    search_endpoint: String,
    cover_endpoint: String,
    record_base_url: String,
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new(
            DEFAULT_SEARCH_ENDPOINT,
            DEFAULT_COVER_ENDPOINT,
            DEFAULT_RECORD_BASE_URL,
        )
    }
}

impl SearchClient {
    #[must_use]
    pub fn new(
        search_endpoint: impl Into<String>,
        cover_endpoint: impl Into<String>,
        record_base_url: impl Into<String>,
    ) -> Self {
        Self {
            search_endpoint: search_endpoint.into(),
            cover_endpoint: cover_endpoint.into(),
            record_base_url: record_base_url.into(),
        }
    }

    #[must_use]
    pub fn cover_endpoint(&self) -> &str {
        &self.cover_endpoint
    }

    #[must_use]
    pub fn record_base_url(&self) -> &str {
        &self.record_base_url
    }

    /// Composes `GET {endpoint}?title={query}&page={page}`.
    ///
    /// The query is percent-encoded as-is; callers are expected to have rejected
    /// blank queries already.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::search::SearchClient;
    ///
    /// let request = SearchClient::default().build_request("the hobbit", 2, 7);
    /// assert_eq!(
    ///     request.url,
    ///     "https://openlibrary.org/search.json?title=the%20hobbit&page=2"
    /// );
    /// assert_eq!(request.request_id, 7);
    /// ```
    #[must_use]
    pub fn build_request(&self, query: &str, page: u32, request_id: u64) -> SearchRequest {
        let url = format!(
            "{}?title={}&page={page}",
            self.search_endpoint,
            urlencoding::encode(query)
        );
        tracing::debug!(request_id, page, url = %url, "composed search request");
        SearchRequest {
            url,
            request_id,
            query: query.to_string(),
            page,
        }
    }

    /// Decodes a host response into a [`SearchPage`].
    ///
    /// # Errors
    ///
    /// - [`BookfinderError::Network`] for any status outside 200..300
    /// - [`BookfinderError::Parse`] if the body is not a search result document
    pub fn parse_response(&self, status: u16, body: &[u8]) -> Result<SearchPage> {
        if !(200..300).contains(&status) {
            return Err(BookfinderError::Network { status });
        }

        let raw: RawSearchResponse =
            serde_json::from_slice(body).map_err(|e| BookfinderError::Parse(e.to_string()))?;

        Ok(SearchPage::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_percent_encoded() {
        let client = SearchClient::default();
        let request = client.build_request("war & peace?", 1, 1);
        assert_eq!(
            request.url,
            "https://openlibrary.org/search.json?title=war%20%26%20peace%3F&page=1"
        );
    }

    #[test]
    fn custom_endpoint_is_used_verbatim() {
        let client = SearchClient::new("http://localhost:8080/s", "c", "r");
        let request = client.build_request("dune", 3, 9);
        assert_eq!(request.url, "http://localhost:8080/s?title=dune&page=3");
        assert_eq!(request.page, 3);
        assert_eq!(request.query, "dune");
    }

    #[test]
    fn context_round_trips_request_id() {
        let request = SearchClient::default().build_request("dune", 1, 42);
        assert_eq!(SearchRequest::request_id_from(&request.context()), Some(42));
        assert_eq!(SearchRequest::request_id_from(&BTreeMap::new()), None);
    }

    #[test]
    fn non_success_status_is_a_network_error() {
        let err = SearchClient::default()
            .parse_response(503, b"{}")
            .unwrap_err();
        assert!(matches!(err, BookfinderError::Network { status: 503 }));
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = SearchClient::default()
            .parse_response(200, b"<html>")
            .unwrap_err();
        assert!(matches!(err, BookfinderError::Parse(_)));
    }

    #[test]
    fn successful_body_yields_page() {
        let body = br#"{"numFound": 2, "docs": [
            {"key": "/works/OL1W", "title": "Pride and Prejudice", "author_name": ["Jane Austen"], "first_publish_year": 1813},
            {"key": "/works/OL2W", "title": "War and Peace"}
        ]}"#;
        let page = SearchClient::default().parse_response(200, body).unwrap();
        assert_eq!(page.num_found, 2);
        assert_eq!(page.books[0].first_publish_year, Some(1813));
        assert!(page.books[1].authors.is_empty());
    }
}
