//! The browser controller.
//!
//! `Browser` owns the state and decides what happens on each user action,
//! timer expiry and service response. It performs no I/O itself: every method
//! returns the [`Effect`]s the runtime has to carry out, which keeps the
//! transitions testable without a clock or a server.

use crate::state::{BrowserState, Listing, View};
use tracing::debug;

/// Identity of an issued query; only the latest one is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Identity of an armed debounce timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

/// A query the runtime must send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub id: RequestId,
    pub view: View,
    /// Search cap, sent only for searches
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(QueryRequest),
    /// Start the debounce timer, replacing any live one
    ArmDebounce(DebounceTicket),
    CancelDebounce,
}

#[derive(Debug)]
pub struct Browser {
    state: BrowserState,
    /// Search field text, updated on every keystroke
    input: String,
    /// Page shown when not searching; survives a search
    page: u32,
    search_limit: usize,
    next_request: u64,
    latest_request: Option<RequestId>,
    next_ticket: u64,
    armed: Option<DebounceTicket>,
}

impl Browser {
    pub fn new(search_limit: usize) -> Self {
        Self {
            state: BrowserState::Loading {
                target: View::Paged { page: 1 },
                previous: None,
            },
            input: String::new(),
            page: 1,
            search_limit,
            next_request: 0,
            latest_request: None,
            next_ticket: 0,
            armed: None,
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last viewed page number
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }

    pub fn is_searching(&self) -> bool {
        self.state.view().is_search()
    }

    /// Whether a debounce timer is armed
    pub fn search_pending(&self) -> bool {
        self.armed.is_some()
    }

    /// Initial load of the first page
    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.transition(View::Paged { page: self.page })]
    }

    /// The search field now reads `text`
    pub fn type_text(&mut self, text: &str) -> Vec<Effect> {
        self.input = text.to_string();

        if text.trim().is_empty() {
            let mut effects = Vec::new();
            if self.armed.take().is_some() {
                effects.push(Effect::CancelDebounce);
            }
            if self.is_searching() {
                effects.push(self.transition(View::Paged { page: self.page }));
            }
            return effects;
        }

        let ticket = DebounceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.armed = Some(ticket);
        vec![Effect::ArmDebounce(ticket)]
    }

    /// A debounce timer fired
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Vec<Effect> {
        if self.armed != Some(ticket) {
            debug!(ticket = ?ticket, "Ignoring superseded debounce timer");
            return Vec::new();
        }
        self.armed = None;

        let query = self.input.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let view = View::Search {
            query: query.to_string(),
        };
        vec![self.transition(view)]
    }

    /// Explicit "clear search": back to the last viewed page
    pub fn clear_search(&mut self) -> Vec<Effect> {
        self.input.clear();

        let mut effects = Vec::new();
        if self.armed.take().is_some() {
            effects.push(Effect::CancelDebounce);
        }
        if self.is_searching() {
            effects.push(self.transition(View::Paged { page: self.page }));
        }
        effects
    }

    /// Unbounded: the service serves page 1 past the end
    pub fn next_page(&mut self) -> Vec<Effect> {
        if self.is_searching() {
            return Vec::new();
        }
        let page = self.page.saturating_add(1);
        vec![self.transition(View::Paged { page })]
    }

    pub fn prev_page(&mut self) -> Vec<Effect> {
        if self.is_searching() || self.page <= 1 {
            return Vec::new();
        }
        let page = self.page - 1;
        vec![self.transition(View::Paged { page })]
    }

    /// Apply the outcome of a query. Returns false when the response was stale.
    pub fn apply_response(&mut self, id: RequestId, result: Result<Listing, String>) -> bool {
        if self.latest_request != Some(id) {
            debug!(request = ?id, latest = ?self.latest_request, "Discarding stale response");
            return false;
        }
        self.latest_request = None;

        let state = std::mem::replace(
            &mut self.state,
            BrowserState::Loading {
                target: View::Paged { page: self.page },
                previous: None,
            },
        );

        self.state = match result {
            Ok(listing) => BrowserState::Ready(listing),
            Err(reason) => BrowserState::Failed {
                target: state.view(),
                previous: state.into_listing(),
                reason,
            },
        };
        true
    }

    /// Enter the loading state for `view` and emit its query
    fn transition(&mut self, view: View) -> Effect {
        if let View::Paged { page } = view {
            self.page = page;
        }

        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.latest_request = Some(id);

        let state = std::mem::replace(
            &mut self.state,
            BrowserState::Loading {
                target: view.clone(),
                previous: None,
            },
        );
        self.state = BrowserState::Loading {
            target: view.clone(),
            previous: state.into_listing(),
        };

        debug!(request = ?id, view = ?view, "Issuing query");
        Effect::Fetch(QueryRequest {
            id,
            view,
            limit: self.search_limit,
        })
    }
}
