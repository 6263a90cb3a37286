//! Post filtering and normalization
//!
//! [`filter_posts`] is the pure transformation between the fetch and render
//! phases. It never fails: invalid regex patterns in the rules are logged
//! and skipped rather than aborting a build.

use crate::config::FilterRules;
use crate::fetch::Post;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Compile a list of regex patterns, logging and skipping invalid ones.
fn compile_patterns(patterns: &[String], kind: &str) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| {
            // Size limit keeps a pathological pattern from blowing up the
            // compiled DFA
            regex::RegexBuilder::new(pattern)
                .size_limit(1024 * 1024)
                .build()
                .map_err(|e| {
                    warn!("invalid {} regex pattern '{}': {}", kind, pattern, e);
                })
                .ok()
        })
        .collect()
}

/// Normalize and filter the accumulated posts of an edition.
///
/// In order:
/// 1. Posts with a blank title are dropped.
/// 2. Duplicate guids are dropped, keeping the first occurrence.
/// 3. If include patterns exist, at least one must match (OR logic);
///    exclude patterns override includes. Patterns run against the title
///    plus description.
/// 4. The surviving list is truncated to `max_items` if set.
///
/// Input order is preserved throughout; the renderer may expose it.
pub fn filter_posts(posts: Vec<Post>, rules: &FilterRules) -> Vec<Post> {
    let includes = compile_patterns(&rules.include, "include");
    let excludes = compile_patterns(&rules.exclude, "exclude");

    let mut seen_guids: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();

    for post in posts {
        if post.title.trim().is_empty() {
            debug!(guid = %post.guid, "dropping untitled post");
            continue;
        }

        if !seen_guids.insert(post.guid.clone()) {
            debug!(guid = %post.guid, "dropping duplicate post");
            continue;
        }

        let search_text = format!(
            "{} {}",
            post.title,
            post.description.as_deref().unwrap_or("")
        );

        if !includes.is_empty() && !includes.iter().any(|re| re.is_match(&search_text)) {
            debug!(title = %post.title, "post matched no include pattern");
            continue;
        }

        if excludes.iter().any(|re| re.is_match(&search_text)) {
            debug!(title = %post.title, "post matched an exclude pattern");
            continue;
        }

        kept.push(post);

        if let Some(max) = rules.max_items
            && kept.len() >= max
        {
            break;
        }
    }

    kept
}
