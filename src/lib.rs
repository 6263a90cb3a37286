//! # pressfeed
//!
//! Feed-driven edition build pipeline for static news pages.
//!
//! An **edition** is a named output page built from one or more RSS/Atom
//! feeds. One build run loads the edition catalog, fetches every feed of
//! every edition, filters and renders the accumulated posts to HTML, writes
//! one artifact per edition into a distribution directory, and finally
//! synchronizes the distribution directory to its destination.
//!
//! Failure handling is the interesting part: a feed that cannot be fetched
//! is logged and skipped, while a config, render, write, or sync failure
//! aborts the whole run. Callers see only a binary outcome; the logs carry
//! the detail.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pressfeed::{Config, run_build};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         catalog_path: "./editions.json".into(),
//!         dist_dir: "./dist".into(),
//!         ..Default::default()
//!     };
//!
//!     let message = run_build(&config).await?;
//!     println!("{}", message);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Edition catalog loading
pub mod catalog;
/// Configuration and edition data model
pub mod config;
/// Error types
pub mod error;
/// Feed fetching and parsing
pub mod fetch;
/// Post filtering and normalization
pub mod filter;
/// Build orchestration (the pipeline core)
pub mod pipeline;
/// Template rendering
pub mod render;
/// Artifact storage and synchronization
pub mod store;

// Re-export commonly used types
pub use catalog::{EditionCatalog, JsonCatalog, StaticCatalog};
pub use config::{Config, EditionDefinition, FilterRules};
pub use error::{Error, Result};
pub use fetch::{FeedFetcher, HttpFetcher, Post};
pub use filter::filter_posts;
pub use pipeline::{BUILD_SUCCEEDED, BuildPipeline};
pub use render::{EDITION_TEMPLATE, EditionContext, TemplateRenderer, TeraRenderer};
pub use store::{ArtifactStore, FsStore};

/// Helper function to run one build with the default collaborators.
///
/// Wires a [`JsonCatalog`], [`HttpFetcher`], [`TeraRenderer`], and
/// [`FsStore`] from `config` and executes a single run.
///
/// # Errors
/// Returns [`Error::BuildFailed`] if any fatal phase of the run fails, or
/// a setup error if the collaborators cannot be constructed.
pub async fn run_build(config: &Config) -> Result<&'static str> {
    let pipeline = BuildPipeline::from_config(config)?;
    pipeline.run().await
}
