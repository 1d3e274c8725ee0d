//! HTTP access to the catalog query service.

pub mod client;
pub mod types;

pub use client::{CatalogClient, FetchError};
pub use types::*;
