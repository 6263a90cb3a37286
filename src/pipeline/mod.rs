//! Build orchestration
//!
//! [`BuildPipeline`] drives one build run: load the edition catalog, then
//! for each edition fetch its feeds, filter the accumulated posts, render
//! the edition page, and write it to the store; finally synchronize the
//! store once. Two result-handling strategies are in play and kept
//! structurally separate:
//!
//! - **collect-and-continue** for the fetch sub-phase
//!   ([`BuildPipeline::fetch_all_feeds`]): a failing feed is logged at info
//!   level and contributes zero posts, and can never abort the run;
//! - **fail-fast** for everything else: a config, render, write, or sync
//!   failure logs at error level and ends the run immediately, skipping
//!   any remaining editions and the sync phase.
//!
//! At the run boundary every fatal category collapses into the opaque
//! [`Error::BuildFailed`]; the caller only sees "Build succeeded" or
//! "Build failed", and must consult the logs for the cause.

use crate::catalog::{EditionCatalog, JsonCatalog};
use crate::config::{Config, EditionDefinition, FilterRules};
use crate::error::{Error, Result};
use crate::fetch::{FeedFetcher, HttpFetcher, Post};
use crate::filter::filter_posts;
use crate::render::{EDITION_TEMPLATE, EditionContext, TemplateRenderer, TeraRenderer};
use crate::store::{ArtifactStore, FsStore};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Success message reported at the run boundary
pub const BUILD_SUCCEEDED: &str = "Build succeeded";

/// The build orchestrator
///
/// Collaborators are injected as trait objects so each can be substituted
/// with a test double; [`BuildPipeline::from_config`] wires up the default
/// implementations.
pub struct BuildPipeline {
    catalog: Arc<dyn EditionCatalog>,
    fetcher: Arc<dyn FeedFetcher>,
    renderer: Arc<dyn TemplateRenderer>,
    store: Arc<dyn ArtifactStore>,
    filter: FilterRules,
}

impl BuildPipeline {
    /// Create a pipeline from explicit collaborators
    pub fn new(
        catalog: Arc<dyn EditionCatalog>,
        fetcher: Arc<dyn FeedFetcher>,
        renderer: Arc<dyn TemplateRenderer>,
        store: Arc<dyn ArtifactStore>,
        filter: FilterRules,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            renderer,
            store,
            filter,
        }
    }

    /// Create a pipeline with the default collaborators: a JSON file
    /// catalog, an HTTP fetcher, a Tera renderer, and a filesystem store.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or the templates fail to
    /// initialize.
    pub fn from_config(config: &Config) -> Result<Self> {
        let renderer: Arc<dyn TemplateRenderer> = match &config.templates_dir {
            Some(dir) => Arc::new(TeraRenderer::from_dir(dir)?),
            None => Arc::new(TeraRenderer::with_default_template()?),
        };

        Ok(Self {
            catalog: Arc::new(JsonCatalog::new(config.catalog_path.clone())),
            fetcher: Arc::new(HttpFetcher::new(config.fetch_timeout)?),
            renderer,
            store: Arc::new(FsStore::new(
                config.dist_dir.clone(),
                config.sync_dir.clone(),
            )),
            filter: config.filter.clone(),
        })
    }

    /// Execute one build run.
    ///
    /// Returns [`BUILD_SUCCEEDED`] when every phase completes. Any fatal
    /// failure is logged with its category and returned as the opaque
    /// [`Error::BuildFailed`]; per-feed fetch failures are logged and
    /// absorbed.
    ///
    /// # Errors
    /// Returns [`Error::BuildFailed`] if the catalog is missing or empty,
    /// an edition fails to render or write, or the final sync fails.
    pub async fn run(&self) -> Result<&'static str> {
        match self.execute().await {
            Ok(()) => {
                info!("build run completed");
                Ok(BUILD_SUCCEEDED)
            }
            // Detail stays in the logs; the caller gets the generic signal
            Err(_) => Err(Error::BuildFailed),
        }
    }

    async fn execute(&self) -> Result<()> {
        let editions = self.load_definitions().await?;

        for edition in &editions {
            let posts = self.fetch_all_feeds(edition).await;
            self.build_edition(edition, posts).await?;
        }

        self.sync_editions().await
    }

    /// Load phase. Fails on a malformed or empty catalog; nothing is
    /// fetched, rendered, or synced before this check passes.
    async fn load_definitions(&self) -> Result<Vec<EditionDefinition>> {
        let editions = match self.catalog.load_definitions().await {
            Ok(editions) => editions,
            Err(e) => {
                error!(category = e.category(), error = %e, "config error");
                return Err(e);
            }
        };

        if editions.is_empty() {
            let e = Error::Config {
                message: "no editions defined".to_string(),
                key: None,
            };
            error!(category = e.category(), error = %e, "config error");
            return Err(e);
        }

        debug!(count = editions.len(), "editions to build");
        Ok(editions)
    }

    /// Fetch sub-phase: collect-and-continue over the edition's feeds, in
    /// declared order. A failing feed contributes zero posts; this method
    /// cannot fail.
    async fn fetch_all_feeds(&self, edition: &EditionDefinition) -> Vec<Post> {
        let mut posts = Vec::new();

        for feed in &edition.feeds {
            match self.fetcher.fetch_latest(feed).await {
                Ok(latest) => {
                    debug!(feed = %feed, count = latest.len(), "fetched feed");
                    posts.extend(latest);
                }
                Err(e) => {
                    // Tracked but never propagated
                    info!(feed = %feed, error = %e, "fetch error, skipping feed");
                }
            }
        }

        posts
    }

    /// Build sub-phase: filter, render, write. Fail-fast; any error here
    /// ends the whole run.
    async fn build_edition(&self, edition: &EditionDefinition, posts: Vec<Post>) -> Result<()> {
        let result = self.render_and_write(edition, posts).await;

        if let Err(e) = &result {
            error!(
                edition = %edition.key,
                category = e.category(),
                error = %e,
                "build error"
            );
        }
        result
    }

    async fn render_and_write(&self, edition: &EditionDefinition, posts: Vec<Post>) -> Result<()> {
        let items = filter_posts(posts, &self.filter);
        debug!(edition = %edition.key, items = items.len(), "rendering edition");

        let html = self.renderer.build_template(
            EDITION_TEMPLATE,
            &EditionContext {
                name: &edition.name,
                items: &items,
            },
        )?;

        self.store.write_dist_file(&edition.key, &html).await
    }

    /// Sync phase: one call, strictly after every edition has been
    /// written. Fail-fast.
    async fn sync_editions(&self) -> Result<()> {
        if let Err(e) = self.store.sync_dist_files().await {
            error!(category = e.category(), error = %e, "sync error");
            return Err(e);
        }
        Ok(())
    }
}
