//! Query text, page, and the debounce/sequence bookkeeping around them.
//!
//! Host timers cannot be cancelled, so debouncing counts outstanding timers instead:
//! every edit arms a fetch and schedules one more timer, and only the timer that
//! brings the count back to zero may fire the fetch. Every dispatched fetch gets a
//! fresh request id and only the most recent id is accepted back.

use std::time::Duration;

/// Delay between the last edit and the debounced fetch.
pub const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Outcome of editing the query text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryChange {
    /// Query is blank: the caller clears the displayed results and issues nothing.
    Cleared,
    /// A fetch is armed; the caller schedules a host timer of `seconds`.
    Scheduled { seconds: f64 },
}

/// A fetch the caller must dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub request_id: u64,
    pub query: String,
    pub page: u32,
}

/// Owns the query text and the current page.
#[derive(Debug, Clone)]
pub struct QueryController {
    query: String,
    page: u32,
    pending_timers: u32,
    armed: bool,
    next_request_id: u64,
    latest_request_id: Option<u64>,
    last_dispatched_query: Option<String>,
}

impl Default for QueryController {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            pending_timers: 0,
            armed: false,
            next_request_id: 0,
            latest_request_id: None,
            last_dispatched_query: None,
        }
    }
}

impl QueryController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Query text of the most recently dispatched fetch.
    #[must_use]
    pub fn last_dispatched_query(&self) -> Option<&str> {
        self.last_dispatched_query.as_deref()
    }

    /// Replaces the query text.
    ///
    /// Any armed fetch is superseded. A blank query also forgets the in-flight
    /// request so that its late response is dropped.
    pub fn set_query(&mut self, text: impl Into<String>) -> QueryChange {
        self.query = text.into();

        if self.query.trim().is_empty() {
            self.reset();
            self.page = 1;
            tracing::debug!("query cleared");
            return QueryChange::Cleared;
        }

        self.armed = true;
        self.pending_timers += 1;
        QueryChange::Scheduled {
            seconds: QUIET_PERIOD.as_secs_f64(),
        }
    }

    /// Accounts for one elapsed debounce timer.
    ///
    /// Returns a page-1 fetch only when this was the last outstanding timer and a
    /// fetch is still armed.
    pub fn on_timer(&mut self) -> Option<FetchTicket> {
        self.pending_timers = self.pending_timers.saturating_sub(1);
        if self.pending_timers > 0 || !self.armed {
            return None;
        }

        self.armed = false;
        self.page = 1;
        Some(self.dispatch())
    }

    /// Fetches page 1 immediately, skipping the quiet period.
    ///
    /// Returns `None` for a blank query.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.armed = false;
        self.page = 1;
        Some(self.dispatch())
    }

    /// Moves to `page` and re-fetches, but only while the query is unchanged since
    /// the last dispatched fetch.
    pub fn change_page(&mut self, page: u32) -> Option<FetchTicket> {
        if page == 0 || self.last_dispatched_query.as_deref() != Some(self.query.as_str()) {
            return None;
        }

        self.page = page;
        Some(self.dispatch())
    }

    /// Whether a response for `request_id` should be applied.
    ///
    /// Accepting a response completes the request; a second response with the same
    /// id is rejected.
    pub fn accept(&mut self, request_id: u64) -> bool {
        if self.latest_request_id == Some(request_id) {
            self.latest_request_id = None;
            true
        } else {
            tracing::debug!(
                request_id,
                latest = ?self.latest_request_id,
                "dropping stale search response"
            );
            false
        }
    }

    /// Disarms the pending fetch and forgets the in-flight request.
    ///
    /// Host timers already scheduled still elapse; they stay counted so a later edit
    /// is not fired early by them.
    pub fn reset(&mut self) {
        self.armed = false;
        self.latest_request_id = None;
    }

    fn dispatch(&mut self) -> FetchTicket {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_request_id = Some(request_id);
        self.last_dispatched_query = Some(self.query.clone());

        tracing::info!(request_id, page = self.page, query = %self.query, "dispatching search");

        FetchTicket {
            request_id,
            query: self.query.clone(),
            page: self.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(controller: &mut QueryController, text: &str) -> usize {
        let mut scheduled = 0;
        let mut buffer = String::new();
        for c in text.chars() {
            buffer.push(c);
            if let QueryChange::Scheduled { .. } = controller.set_query(buffer.clone()) {
                scheduled += 1;
            }
        }
        scheduled
    }

    #[test]
    fn burst_of_edits_fires_exactly_one_fetch() {
        let mut controller = QueryController::new();
        let scheduled = type_text(&mut controller, "dune");
        assert_eq!(scheduled, 4);

        let fired: Vec<FetchTicket> = (0..scheduled).filter_map(|_| controller.on_timer()).collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].query, "dune");
        assert_eq!(fired[0].page, 1);
    }

    #[test]
    fn quiet_period_is_half_a_second() {
        let mut controller = QueryController::new();
        assert_eq!(
            controller.set_query("a"),
            QueryChange::Scheduled { seconds: 0.5 }
        );
    }

    #[test]
    fn clearing_disarms_and_resets_page() {
        let mut controller = QueryController::new();
        controller.set_query("dune");
        let ticket = controller.submit().unwrap();
        controller.accept(ticket.request_id);
        let page_two = controller.change_page(2).unwrap();

        assert_eq!(controller.set_query("   "), QueryChange::Cleared);
        assert_eq!(controller.page(), 1);
        assert!(!controller.accept(page_two.request_id));
        assert_eq!(controller.on_timer(), None);
    }

    #[test]
    fn submit_bypasses_debounce_and_disarms_it() {
        let mut controller = QueryController::new();
        controller.set_query("dune");
        let ticket = controller.submit().unwrap();
        assert_eq!(ticket.page, 1);
        assert_eq!(controller.on_timer(), None);
    }

    #[test]
    fn blank_submit_does_nothing() {
        let mut controller = QueryController::new();
        controller.set_query(" ");
        assert_eq!(controller.submit(), None);
    }

    #[test]
    fn page_change_requires_unchanged_query() {
        let mut controller = QueryController::new();
        controller.set_query("dune");
        assert_eq!(controller.change_page(2), None);

        controller.on_timer().unwrap();
        let ticket = controller.change_page(2).unwrap();
        assert_eq!((ticket.query.as_str(), ticket.page), ("dune", 2));

        controller.set_query("dune messiah");
        assert_eq!(controller.change_page(3), None);
        assert_eq!(controller.page(), 2);
    }

    #[test]
    fn only_latest_response_is_accepted() {
        let mut controller = QueryController::new();
        controller.set_query("dune");
        let first = controller.submit().unwrap();
        let second = controller.change_page(2).unwrap();

        assert!(!controller.accept(first.request_id));
        assert!(controller.accept(second.request_id));
        assert!(!controller.accept(second.request_id));
    }

    #[test]
    fn late_response_after_clear_is_dropped() {
        let mut controller = QueryController::new();
        controller.set_query("dune");
        let ticket = controller.submit().unwrap();
        controller.set_query("");
        assert!(!controller.accept(ticket.request_id));
    }

    #[test]
    fn reset_disarms_pending_fetch() {
        let mut controller = QueryController::new();
        controller.set_query("dune");
        controller.reset();
        assert_eq!(controller.on_timer(), None);
    }

    #[test]
    fn timers_from_before_a_clear_still_delay_the_next_fetch() {
        let mut controller = QueryController::new();
        controller.set_query("d");
        controller.set_query("");
        controller.set_query("e");

        assert_eq!(controller.on_timer(), None);
        let ticket = controller.on_timer().unwrap();
        assert_eq!(ticket.query, "e");
    }
}
