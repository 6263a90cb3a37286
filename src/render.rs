//! Template rendering
//!
//! Renders one edition page from a named template and a
//! `{ name, items }` context. [`TeraRenderer`] backs the trait with the
//! Tera engine, either from a template directory or from a built-in
//! fallback template.

use crate::error::{Error, Result};
use crate::fetch::Post;
use serde::Serialize;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Template name used for edition pages. Matches the file name Tera
/// assigns when templates are loaded from a directory.
pub const EDITION_TEMPLATE: &str = "edition.html";

/// Data passed to the edition template
#[derive(Debug, Serialize)]
pub struct EditionContext<'a> {
    /// Edition display name
    pub name: &'a str,
    /// Filtered posts, in final output order
    pub items: &'a [Post],
}

/// Renders a named template with an edition context
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with `context` into an HTML string.
    ///
    /// # Errors
    /// Returns [`Error::Render`] if the template is missing or fails to
    /// render.
    fn build_template(&self, template: &str, context: &EditionContext<'_>) -> Result<String>;
}

/// Tera-backed renderer
pub struct TeraRenderer {
    tera: Tera,
}

/// Minimal edition page used when no template directory is configured
const DEFAULT_EDITION_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><title>{{ name }}</title></head>
<body>
<h1>{{ name }}</h1>
<ul>
{% for item in items %}<li>{% if item.link %}<a href="{{ item.link }}">{{ item.title }}</a>{% else %}{{ item.title }}{% endif %}</li>
{% endfor %}</ul>
</body>
</html>
"#;

impl TeraRenderer {
    /// Create a renderer loading all `.html` templates from a directory.
    ///
    /// # Errors
    /// Returns [`Error::Render`] if the directory glob fails to compile.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let glob = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&glob)
            .map_err(|e| Error::Render(format!("failed to load templates from {}: {}", glob, e)))?;
        debug!(dir = %dir.display(), "loaded templates");
        Ok(Self { tera })
    }

    /// Create a renderer with only the built-in edition template.
    ///
    /// # Errors
    /// Returns [`Error::Render`] if the built-in template fails to compile,
    /// which indicates a bug.
    pub fn with_default_template() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(EDITION_TEMPLATE, DEFAULT_EDITION_TEMPLATE)
            .map_err(|e| Error::Render(format!("built-in template failed to compile: {}", e)))?;
        Ok(Self { tera })
    }
}

impl TemplateRenderer for TeraRenderer {
    fn build_template(&self, template: &str, context: &EditionContext<'_>) -> Result<String> {
        let ctx = tera::Context::from_serialize(context)
            .map_err(|e| Error::Render(format!("context serialization failed: {}", e)))?;

        self.tera
            .render(template, &ctx)
            .map_err(|e| Error::Render(format!("failed to render '{}': {}", template, e)))
    }
}
