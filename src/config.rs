//! Configuration types for pressfeed

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// One named edition: a published output page built from one or more feeds.
///
/// Definitions are loaded once per run by the
/// [`EditionCatalog`](crate::catalog::EditionCatalog) and are read-only to
/// the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionDefinition {
    /// Unique key, used as the storage key for the rendered artifact
    pub key: String,

    /// Display name, passed to the template as `name`
    pub name: String,

    /// Feed URLs, fetched in declared order
    #[serde(default)]
    pub feeds: Vec<String>,
}

/// Filter rules applied to the accumulated posts of an edition before
/// rendering.
///
/// Include patterns use OR logic (at least one must match); exclude
/// patterns override includes. Patterns match against title plus
/// description. Order of surviving posts is preserved.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Regex patterns; if non-empty, a post must match at least one
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns; a post matching any of these is dropped
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Keep at most this many posts after filtering (None = unlimited)
    #[serde(default)]
    pub max_items: Option<usize>,
}

/// Pipeline configuration
///
/// All fields have sensible defaults so `Config::default()` builds a
/// working pipeline rooted in the current directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON edition catalog (default: "./editions.json")
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Directory containing Tera templates; None uses the built-in
    /// edition template
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,

    /// Distribution directory rendered artifacts are written to
    /// (default: "./dist")
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Directory the distribution directory is mirrored to during the
    /// sync phase; None makes sync a no-op
    #[serde(default)]
    pub sync_dir: Option<PathBuf>,

    /// Per-request timeout for feed fetches (default: 30 seconds)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: Duration,

    /// Post filter rules applied to every edition
    #[serde(default)]
    pub filter: FilterRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            templates_dir: None,
            dist_dir: default_dist_dir(),
            sync_dir: None,
            fetch_timeout: default_fetch_timeout(),
            filter: FilterRules::default(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./editions.json")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("./dist")
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(30)
}
