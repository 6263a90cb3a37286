//! Feed fetching
//!
//! [`HttpFetcher`] retrieves a feed over HTTP and parses it, trying RSS 2.0
//! first and falling back to Atom. Fetching a feed is the only pipeline
//! step whose failure is recoverable: the orchestrator logs it and moves on
//! to the next feed.

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// One item retrieved from a feed
#[derive(Clone, Debug, Serialize)]
pub struct Post {
    /// Item title
    pub title: String,

    /// Item link/URL
    pub link: Option<String>,

    /// Unique identifier (GUID for RSS, id for Atom). Falls back to the
    /// link, then the title, when the feed carries no explicit identifier.
    pub guid: String,

    /// Publication date
    pub pub_date: Option<DateTime<Utc>>,

    /// Item description or summary
    pub description: Option<String>,
}

/// Fetches the latest items for one feed reference
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch and parse the latest posts of `feed`, in feed order.
    ///
    /// # Errors
    /// Returns [`Error::Fetch`] on network failure, non-success HTTP
    /// status, or if the body parses as neither RSS nor Atom.
    async fn fetch_latest(&self, feed: &str) -> Result<Vec<Post>>;
}

/// HTTP feed fetcher with RSS-then-Atom parsing
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("pressfeed feed reader")
            .build()
            .map_err(|e| Error::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn parse_as_rss(content: &str) -> Result<Vec<Post>> {
        let channel = content
            .parse::<rss::Channel>()
            .map_err(|e| Error::Fetch(format!("RSS parse error: {}", e)))?;

        let posts = channel
            .items()
            .iter()
            .map(|item| {
                // Prefer guid, fall back to link, then title
                let guid = item
                    .guid()
                    .map(|g| g.value().to_string())
                    .or_else(|| item.link().map(|l| l.to_string()))
                    .unwrap_or_else(|| item.title().unwrap_or("").to_string());

                let pub_date = item.pub_date().and_then(|date_str| {
                    DateTime::parse_from_rfc2822(date_str)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                });

                Post {
                    title: item.title().unwrap_or("").to_string(),
                    link: item.link().map(|l| l.to_string()),
                    guid,
                    pub_date,
                    description: item.description().map(|d| d.to_string()),
                }
            })
            .collect();

        Ok(posts)
    }

    fn parse_as_atom(content: &str) -> Result<Vec<Post>> {
        let feed = atom_syndication::Feed::read_from(content.as_bytes())
            .map_err(|e| Error::Fetch(format!("Atom parse error: {}", e)))?;

        let posts = feed
            .entries()
            .iter()
            .map(|entry| {
                // Prefer published, fall back to updated
                let pub_date = entry
                    .published()
                    .or_else(|| Some(entry.updated()))
                    .map(|dt| dt.with_timezone(&Utc));

                let description = entry.summary().map(|s| s.as_str().to_string()).or_else(|| {
                    entry
                        .content()
                        .and_then(|c| c.value().map(|v| v.to_string()))
                });

                Post {
                    title: entry.title().as_str().to_string(),
                    link: entry.links().first().map(|link| link.href().to_string()),
                    guid: entry.id().to_string(),
                    pub_date,
                    description,
                }
            })
            .collect();

        Ok(posts)
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch_latest(&self, feed: &str) -> Result<Vec<Post>> {
        let feed_url = Url::parse(feed)
            .map_err(|e| Error::Fetch(format!("invalid feed URL '{}': {}", feed, e)))?;

        debug!(feed = %feed_url, "fetching feed");

        let response = self
            .client
            .get(feed_url.clone())
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("failed to fetch {}: {}", feed_url, e)))?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "feed returned HTTP {}: {}",
                status.as_u16(),
                feed_url
            )));
        }

        let content = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read body of {}: {}", feed_url, e)))?;

        match Self::parse_as_rss(&content) {
            Ok(posts) => {
                debug!(feed = %feed_url, count = posts.len(), "parsed as RSS");
                Ok(posts)
            }
            Err(rss_err) => {
                debug!(feed = %feed_url, error = %rss_err, "not RSS, trying Atom");
                match Self::parse_as_atom(&content) {
                    Ok(posts) => {
                        debug!(feed = %feed_url, count = posts.len(), "parsed as Atom");
                        Ok(posts)
                    }
                    Err(atom_err) => Err(Error::Fetch(format!(
                        "feed {} parses as neither RSS nor Atom. RSS error: {}. Atom error: {}",
                        feed_url, rss_err, atom_err
                    ))),
                }
            }
        }
    }
}
