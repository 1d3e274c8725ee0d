//! Catalog Query Service.
//!
//! Serves `GET /api/manga` over a static JSON dataset of manga pages.
//!
//! - **`dataset`**: reading the array-of-pages file, fresh on every request.
//! - **`query`**: page lookup with first-page fallback and capped, case-insensitive search.
//! - **`handlers`**: the axum handler and its state.
//! - **`error`**: data failures and their HTTP mapping.

pub mod dataset;
pub mod error;
pub mod handlers;
pub mod query;

pub use dataset::{Dataset, DatasetSource, RawPage};
pub use error::CatalogError;
pub use handlers::AppState;
pub use query::{CatalogQuery, QueryParams, QueryResult, DEFAULT_SEARCH_LIMIT};

use axum::routing::get;
use axum::Router;

/// Build the HTTP router for the query service
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/manga", get(handlers::handle_query))
        .with_state(state)
}
