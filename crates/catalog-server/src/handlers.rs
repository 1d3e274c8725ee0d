use crate::dataset::DatasetSource;
use crate::error::CatalogError;
use crate::query::{CatalogQuery, QueryParams, QueryResult};
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

/// Shared by every request; holds no mutable state
#[derive(Debug, Clone)]
pub struct AppState {
    pub source: Arc<DatasetSource>,
    pub default_limit: usize,
}

impl AppState {
    pub fn new(source: DatasetSource, default_limit: usize) -> Self {
        Self {
            source: Arc::new(source),
            default_limit,
        }
    }
}

/// `GET /api/manga`
///
/// The query string is taken as plain pairs so repeated or unknown keys never
/// reject the request.
pub async fn handle_query(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<QueryResult>, CatalogError> {
    let params = QueryParams::from_pairs(pairs);
    let query = CatalogQuery::from_params(&params, state.default_limit);
    let dataset = state.source.load().await?;

    let result = query.execute(dataset)?;
    match (&query, &result) {
        (CatalogQuery::Search { query, limit }, QueryResult::Search(found)) => {
            tracing::info!(
                query = %query,
                limit = limit,
                total = found.total,
                limited = found.limited,
                "Search served"
            );
        }
        (CatalogQuery::Page { requested }, QueryResult::Page(page)) => {
            tracing::info!(requested = ?requested, entries = page.len(), "Page served");
        }
        _ => {}
    }

    Ok(Json(result))
}
