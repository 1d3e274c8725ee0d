//! Data models for the catalog.
//!
//! These types are shared between the query service, which reads them from the
//! dataset file, and the browser, which receives them over HTTP.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single manga as stored in the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MangaEntry {
    pub title: String,

    #[serde(default)]
    pub cover_url: String,

    /// Absent or null in some source records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,

    /// Any other fields of the source record, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MangaEntry {
    /// Create an entry with no extra fields
    pub fn new(title: impl Into<String>, cover_url: impl Into<String>, genres: Vec<String>) -> Self {
        Self {
            title: title.into(),
            cover_url: cover_url.into(),
            genres: Some(genres),
            extra: Map::new(),
        }
    }

    /// Genre list, empty when the record has none
    pub fn genres(&self) -> &[String] {
        self.genres.as_deref().unwrap_or(&[])
    }
}

/// Response body of a search query.
///
/// The service fills `results` with the raw dataset records; clients read them
/// back as [`MangaEntry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults<T = MangaEntry> {
    /// At most `limit` matches, in dataset order
    pub results: Vec<T>,
    /// Number of matches before capping
    pub total: usize,
    /// Whether `results` was cut short
    pub limited: bool,
}

impl<T> SearchResults<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            limited: false,
        }
    }
}

/// Error body returned by the query service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
