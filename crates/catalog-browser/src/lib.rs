//! Terminal browser for the manga catalog.
//!
//! This library provides the pieces of the interactive client:
//! - `api`: HTTP client for the catalog query service
//! - `browser`: the state machine deciding what to fetch and when
//! - `debounce`: the cancelable search timer
//! - `render`: plain-text screen rendering
//! - `runtime`: the event loop tying input, timers and fetches together

pub mod api;
pub mod browser;
pub mod debounce;
pub mod render;
pub mod runtime;
pub mod state;

pub use api::{CatalogClient, FetchError};
pub use browser::{Browser, Effect, QueryRequest, RequestId};
pub use debounce::Debouncer;
pub use runtime::{Runtime, UserAction};
pub use state::{BrowserState, Listing, View};
