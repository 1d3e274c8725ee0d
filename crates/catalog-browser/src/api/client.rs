//! Catalog service client.
//!
//! Failures are reported once and never retried; the browser keeps showing
//! whatever it had before.

use super::types::PageBody;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{MangaEntry, SearchResults};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Client for `GET /api/manga`
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// HTTP client
    client: Client,
    /// Base URL of the query service, without trailing slash
    base_url: String,
}

impl CatalogClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("catalog-browser/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> Result<T, FetchError> {
        let url = format!("{}/api/manga", self.base_url);
        debug!(url = %url, params = ?params, "Making catalog request");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(url = %url, status = %status, body = %body, "Catalog request failed");
            return Err(FetchError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch one page of the catalog (1-based)
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<MangaEntry>, FetchError> {
        let body: PageBody = self.get(&[("page", page.to_string())]).await?;
        Ok(body.into_entries())
    }

    /// Search titles and genres, capped at `limit` results
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchResults, FetchError> {
        self.get(&[("query", query.to_string()), ("limit", limit.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_server, SAMPLE_DATASET};

    #[tokio::test]
    async fn test_client_creation_trims_base_url() {
        let client = CatalogClient::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let server = spawn_server(SAMPLE_DATASET).await;
        let client = CatalogClient::new(&server.url, Duration::from_secs(5)).unwrap();

        let entries = client.fetch_page(2).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Monster");

        // Past the end falls back to the first page
        let fallback = client.fetch_page(9).await.unwrap();
        assert_eq!(fallback, client.fetch_page(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_search() {
        let server = spawn_server(SAMPLE_DATASET).await;
        let client = CatalogClient::new(&server.url, Duration::from_secs(5)).unwrap();

        let found = client.search("action", 100).await.unwrap();
        let titles: Vec<&str> = found.results.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Naruto", "Bleach"]);
        assert_eq!(found.total, 2);
        assert!(!found.limited);

        let capped = client.search("action", 1).await.unwrap();
        assert_eq!(capped.results.len(), 1);
        assert_eq!(capped.total, 2);
        assert!(capped.limited);
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let server = spawn_server(SAMPLE_DATASET).await;
        std::fs::remove_file(&server.dataset_path).unwrap();
        let client = CatalogClient::new(&server.url, Duration::from_secs(5)).unwrap();

        match client.fetch_page(1).await {
            Err(FetchError::Status { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body.contains("Failed to fetch manga data"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CatalogClient::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        assert!(matches!(
            client.search("naruto", 10).await,
            Err(FetchError::Transport(_))
        ));
    }
}
