//! Browser state.
//!
//! One value describes what the browser is showing, so "searching while
//! paging" or "results without a query" cannot be represented.

use shared::MangaEntry;

/// What the browser is asking the service for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Paged { page: u32 },
    Search { query: String },
}

impl View {
    pub fn is_search(&self) -> bool {
        matches!(self, View::Search { .. })
    }
}

/// A completed answer from the service
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Paged {
        page: u32,
        entries: Vec<MangaEntry>,
    },
    Searching {
        query: String,
        results: Vec<MangaEntry>,
        total: usize,
        limited: bool,
    },
}

impl Listing {
    pub fn entries(&self) -> &[MangaEntry] {
        match self {
            Listing::Paged { entries, .. } => entries,
            Listing::Searching { results, .. } => results,
        }
    }

    pub fn view(&self) -> View {
        match self {
            Listing::Paged { page, .. } => View::Paged { page: *page },
            Listing::Searching { query, .. } => View::Search {
                query: query.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserState {
    /// A query for `target` is in flight; `previous` is kept but not shown
    Loading {
        target: View,
        previous: Option<Listing>,
    },
    Ready(Listing),
    /// The query for `target` failed; `previous` stays on screen
    Failed {
        target: View,
        previous: Option<Listing>,
        reason: String,
    },
}

impl BrowserState {
    /// The view the browser is in, whether or not its data has arrived
    pub fn view(&self) -> View {
        match self {
            BrowserState::Loading { target, .. } | BrowserState::Failed { target, .. } => {
                target.clone()
            }
            BrowserState::Ready(listing) => listing.view(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, BrowserState::Loading { .. })
    }

    /// The listing that would be displayed, ignoring the loading indicator
    pub fn listing(&self) -> Option<&Listing> {
        match self {
            BrowserState::Ready(listing) => Some(listing),
            BrowserState::Loading { previous, .. } | BrowserState::Failed { previous, .. } => {
                previous.as_ref()
            }
        }
    }

    /// Consume the state, keeping whatever listing it carried
    pub fn into_listing(self) -> Option<Listing> {
        match self {
            BrowserState::Ready(listing) => Some(listing),
            BrowserState::Loading { previous, .. } | BrowserState::Failed { previous, .. } => {
                previous
            }
        }
    }
}
