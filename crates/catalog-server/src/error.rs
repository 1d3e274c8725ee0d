//! Errors raised while answering a catalog query.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorBody;
use std::path::PathBuf;
use thiserror::Error;

/// Message returned to clients for any data failure
pub const DATA_UNAVAILABLE_MESSAGE: &str = "Failed to fetch manga data";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record the search filter cannot read (no string `title`, non-string genres)
    #[error("malformed entry {index} in dataset: {source}")]
    Entry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error fetching manga data");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: DATA_UNAVAILABLE_MESSAGE.to_string(),
            }),
        )
            .into_response()
    }
}
