//! Shared library for the manga catalog workspace.
//!
//! This crate provides common functionality used by the query service and
//! the terminal browser:
//! - Catalog data model (entries, search results, error body)
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
