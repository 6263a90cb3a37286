//! Edition catalog loading
//!
//! The catalog supplies the list of edition definitions for one build run.
//! [`JsonCatalog`] reads them from a JSON file; [`StaticCatalog`] serves a
//! fixed in-memory list, which is useful for embedding and tests.
//!
//! The catalog itself does not enforce non-emptiness; that check is a
//! pipeline-level precondition and lives in the orchestrator.

use crate::config::EditionDefinition;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Source of edition definitions for a build run
#[async_trait]
pub trait EditionCatalog: Send + Sync {
    /// Load all edition definitions, in publication order.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the underlying definition source is
    /// missing or malformed.
    async fn load_definitions(&self) -> Result<Vec<EditionDefinition>>;
}

/// Catalog backed by a JSON file containing an array of edition
/// definitions.
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    /// Create a catalog reading from the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EditionCatalog for JsonCatalog {
    async fn load_definitions(&self) -> Result<Vec<EditionDefinition>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Config {
                message: format!(
                    "failed to read catalog file {}: {}",
                    self.path.display(),
                    e
                ),
                key: Some("catalog_path".to_string()),
            })?;

        let editions: Vec<EditionDefinition> =
            serde_json::from_str(&content).map_err(|e| Error::Config {
                message: format!(
                    "malformed catalog file {}: {}",
                    self.path.display(),
                    e
                ),
                key: Some("catalog_path".to_string()),
            })?;

        debug!(
            path = %self.path.display(),
            count = editions.len(),
            "loaded edition definitions"
        );
        Ok(editions)
    }
}

/// Catalog serving a fixed list of definitions from memory
pub struct StaticCatalog {
    editions: Vec<EditionDefinition>,
}

impl StaticCatalog {
    /// Create a catalog from an in-memory list of definitions
    pub fn new(editions: Vec<EditionDefinition>) -> Self {
        Self { editions }
    }
}

#[async_trait]
impl EditionCatalog for StaticCatalog {
    async fn load_definitions(&self) -> Result<Vec<EditionDefinition>> {
        Ok(self.editions.clone())
    }
}
