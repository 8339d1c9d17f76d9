//! Search session controller.
//!
//! [`SearchSession`] owns the query, the page cursor, the accumulated results
//! and the request status. It decides when a fetch must be issued and folds
//! completed fetches back into its state, reporting outcomes through an injected
//! [`NotificationSink`].
//!
//! # State Machine
//!
//! ```text
//!            submit_query            complete_fetch(Ok, ≥1)
//!   Idle ───────────────▶ Pending ─────────────────────────▶ Resolved
//!                           ▲  │                                │
//!            submit_query   │  │ complete_fetch(Err | Ok, 0)    │ load_more
//!   Rejected ───────────────┘  ▼                                │
//!      ▲                    Rejected                            │
//!      └────────────── Pending ◀────────────────────────────────┘
//! ```
//!
//! Every transition into `Pending` produces exactly one [`FetchRequest`]; every
//! completed fetch emits at most one notification.
//!
//! # Stale Responses
//!
//! Each request carries a monotonically increasing `request_id`. Only the
//! response to the most recently issued request is applied; anything older is
//! dropped, so overlapping queries cannot interleave their pages.

use crate::api::{FetchError, SearchPage, PAGE_SIZE};
use crate::app::notifications::{NotificationKind, NotificationSink};
use crate::domain::ImageRecord;

/// Shown when a fetch succeeds with zero records.
pub const NO_RESULTS_MESSAGE: &str =
    "Sorry, there are no images matching your search query. Please try again.";

/// Shown when a blank query is submitted.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

/// Lifecycle of the most recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// No query submitted yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Pending,
    /// The last fetch returned at least one record.
    Resolved,
    /// The last fetch failed or returned nothing.
    Rejected,
}

/// A fetch the runtime must perform on behalf of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub query: String,
    pub page: u32,
    pub request_id: u64,
}

/// Search state for one plugin instance.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    page: u32,
    results: Vec<ImageRecord>,
    total_available: u32,
    status: RequestStatus,
    request_id: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            results: Vec::new(),
            total_available: 0,
            status: RequestStatus::Idle,
            request_id: 0,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn results(&self) -> &[ImageRecord] {
        &self.results
    }

    #[must_use]
    pub const fn total_available(&self) -> u32 {
        self.total_available
    }

    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Id of the most recently issued request (0 before the first fetch).
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Starts a new search for `text`.
    ///
    /// The text is trimmed first. Submitting the current query again is a no-op;
    /// submitting a blank query emits an error notification instead of fetching.
    /// Otherwise the page cursor resets to 1, accumulated results are cleared,
    /// and the first page is requested.
    pub fn submit_query(
        &mut self,
        text: &str,
        sink: &mut dyn NotificationSink,
    ) -> Option<FetchRequest> {
        let text = text.trim();

        if text.is_empty() {
            sink.notify(EMPTY_QUERY_MESSAGE, NotificationKind::Error);
            return None;
        }

        if text == self.query {
            tracing::debug!(query = %text, "query unchanged, skipping fetch");
            return None;
        }

        tracing::debug!(query = %text, previous = %self.query, "new search submitted");

        self.query = text.to_string();
        self.page = 1;
        self.results.clear();
        self.total_available = 0;

        Some(self.begin_fetch())
    }

    /// Returns `true` when another page exists and the last fetch succeeded.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.status == RequestStatus::Resolved
            && u64::from(self.page) * u64::from(PAGE_SIZE) < u64::from(self.total_available)
    }

    /// Requests the next page.
    ///
    /// The caller is expected to check [`can_load_more`](Self::can_load_more)
    /// first, as the grid only offers "load more" in that case.
    pub fn load_more(&mut self) -> FetchRequest {
        self.page += 1;
        tracing::debug!(query = %self.query, page = self.page, "loading next page");
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.status = RequestStatus::Pending;
        self.request_id += 1;
        FetchRequest {
            query: self.query.clone(),
            page: self.page,
            request_id: self.request_id,
        }
    }

    /// Applies the outcome of request `request_id`.
    ///
    /// Returns `false` without touching state when the response belongs to a
    /// request that has been superseded.
    pub fn complete_fetch(
        &mut self,
        request_id: u64,
        outcome: Result<SearchPage, FetchError>,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        if request_id != self.request_id || self.status != RequestStatus::Pending {
            tracing::debug!(
                request_id = request_id,
                current_request_id = self.request_id,
                "discarding stale search response"
            );
            return false;
        }

        match outcome {
            Ok(page) if page.records.is_empty() => {
                tracing::debug!(query = %self.query, page = self.page, "search returned no records");
                sink.notify(NO_RESULTS_MESSAGE, NotificationKind::Error);
                self.status = RequestStatus::Rejected;
            }
            Ok(page) => {
                self.total_available = page.total_available;

                let room = (self.total_available as usize).saturating_sub(self.results.len());
                let received = page.records.len();
                self.results.extend(page.records.into_iter().take(room));

                tracing::debug!(
                    query = %self.query,
                    page = self.page,
                    received = received,
                    accumulated = self.results.len(),
                    total_available = self.total_available,
                    "search page applied"
                );

                if self.page == 1 {
                    sink.notify(
                        &format!("Hooray! We found {} images.", self.total_available),
                        NotificationKind::Info,
                    );
                }
                self.status = RequestStatus::Resolved;
            }
            Err(e) => {
                tracing::debug!(query = %self.query, page = self.page, error = %e, "search failed");
                sink.notify(&e.to_string(), NotificationKind::Error);
                self.status = RequestStatus::Rejected;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        messages: Vec<(String, NotificationKind)>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&mut self, message: &str, kind: NotificationKind) {
            self.messages.push((message.to_string(), kind));
        }
    }

    fn record(id: u64) -> ImageRecord {
        ImageRecord {
            id,
            thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
            full_size_url: format!("https://cdn.example/{id}_1280.jpg"),
            tags: format!("tag{id}"),
            width: 640,
            height: 480,
            user: String::new(),
        }
    }

    fn page(ids: std::ops::Range<u64>, total: u32) -> SearchPage {
        SearchPage {
            records: ids.map(record).collect(),
            total_available: total,
        }
    }

    #[test]
    fn test_identical_query_fetches_once() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        assert!(session.submit_query("cats", &mut sink).is_some());
        assert!(session.submit_query("cats", &mut sink).is_none());
        assert!(session.submit_query("  cats ", &mut sink).is_none());
        assert_eq!(session.request_id(), 1);
        assert!(sink.messages.is_empty());
    }

    #[test]
    fn test_blank_query_is_rejected_without_fetch() {
        let mut session = SearchSession::new();
        let mut first = RecordingSink::default();
        assert!(session.submit_query("", &mut first).is_none());
        assert_eq!(first.messages.len(), 1);

        session.submit_query("cats", &mut RecordingSink::default());

        let mut sink = RecordingSink::default();
        assert!(session.submit_query("   ", &mut sink).is_none());
        assert_eq!(session.query(), "cats");
        assert_eq!(sink.messages, vec![(EMPTY_QUERY_MESSAGE.to_string(), NotificationKind::Error)]);
    }

    #[test]
    fn test_single_page_scenario() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        let request = session.submit_query("cats", &mut sink).unwrap();
        assert_eq!(request, FetchRequest { query: "cats".into(), page: 1, request_id: 1 });
        assert_eq!(session.status(), RequestStatus::Pending);

        assert!(session.complete_fetch(request.request_id, Ok(page(1..3, 2)), &mut sink));

        assert_eq!(session.results(), &[record(1), record(2)]);
        assert_eq!(session.status(), RequestStatus::Resolved);
        assert_eq!(
            sink.messages,
            vec![("Hooray! We found 2 images.".to_string(), NotificationKind::Info)]
        );
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_load_more_appends_next_page() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        let first = session.submit_query("dogs", &mut sink).unwrap();
        session.complete_fetch(first.request_id, Ok(page(0..12, 45)), &mut sink);
        assert!(session.can_load_more());

        let second = session.load_more();
        assert_eq!(second.page, 2);
        assert_eq!(second.query, "dogs");
        session.complete_fetch(second.request_id, Ok(page(12..24, 45)), &mut sink);

        assert_eq!(session.results().len(), 24);
        assert_eq!(session.total_available(), 45);
        assert_eq!(session.results()[12].id, 12);
        assert_eq!(sink.messages.len(), 1, "only page 1 announces the total");
        assert!(session.can_load_more());
    }

    #[test]
    fn test_empty_page_keeps_previous_results() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        let first = session.submit_query("owls", &mut sink).unwrap();
        session.complete_fetch(first.request_id, Ok(page(0..12, 30)), &mut sink);
        let before = session.results().to_vec();

        let second = session.load_more();
        sink.messages.clear();
        session.complete_fetch(second.request_id, Ok(page(0..0, 30)), &mut sink);

        assert_eq!(session.results(), before.as_slice());
        assert_eq!(session.status(), RequestStatus::Rejected);
        assert_eq!(sink.messages, vec![(NO_RESULTS_MESSAGE.to_string(), NotificationKind::Error)]);
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_transport_failure_rejects_with_detail() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        let request = session.submit_query("cats", &mut sink).unwrap();
        session.complete_fetch(
            request.request_id,
            Err(FetchError::Transport("connection reset".into())),
            &mut sink,
        );

        assert_eq!(session.status(), RequestStatus::Rejected);
        assert_eq!(sink.messages.len(), 1);
        assert_eq!(sink.messages[0].1, NotificationKind::Error);
        assert!(sink.messages[0].0.contains("connection reset"));
    }

    #[test]
    fn test_new_query_resets_accumulation() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        let first = session.submit_query("cats", &mut sink).unwrap();
        session.complete_fetch(first.request_id, Ok(page(0..12, 40)), &mut sink);
        session.load_more();

        let fresh = session.submit_query("dogs", &mut sink).unwrap();
        assert_eq!(fresh.page, 1);
        assert_eq!(session.page(), 1);
        assert!(session.results().is_empty());
        assert_eq!(session.total_available(), 0);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        let cats = session.submit_query("cats", &mut sink).unwrap();
        let dogs = session.submit_query("dogs", &mut sink).unwrap();

        assert!(!session.complete_fetch(cats.request_id, Ok(page(0..5, 5)), &mut sink));
        assert!(session.results().is_empty());
        assert_eq!(session.status(), RequestStatus::Pending);
        assert!(sink.messages.is_empty());

        assert!(session.complete_fetch(dogs.request_id, Ok(page(100..103, 3)), &mut sink));
        assert_eq!(session.results()[0].id, 100);
    }

    #[test]
    fn test_results_never_exceed_total() {
        let mut session = SearchSession::new();
        let mut sink = RecordingSink::default();

        let request = session.submit_query("cats", &mut sink).unwrap();
        session.complete_fetch(request.request_id, Ok(page(0..12, 5)), &mut sink);

        assert_eq!(session.results().len(), 5);
    }
}
