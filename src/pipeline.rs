//! Document-level indexing pass
//!
//! The host hands over one rendered document at a time. Site-wide settings
//! select the default behavior; the document can override the style list
//! and start level, or opt out entirely. Content and excerpt run through
//! the engine as independent passes (each with its own counter stack) and
//! both results are stored back only when the whole call succeeds, so a
//! failed pass leaves the document untouched.

use serde::{Deserialize, Serialize};

use crate::engine::{index_fragment, RenderOptions};
use crate::error::IndexingError;
use crate::style::parse_index_styles;

/// Site-wide indexing configuration with its documented defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndexingSettings {
    /// Master switch; indexing is off until a host enables it.
    pub enable: bool,
    /// Style specification, one token per nesting level.
    pub index_styles: String,
    /// Joins per-level fragments.
    pub connector: String,
    /// Wraps the whole composed index.
    pub global_prefix: String,
    /// Wraps the whole composed index.
    pub global_suffix: String,
    /// Insert the index as raw markup instead of escaped text.
    pub allow_html: bool,
    /// Heading depth mapped to normalized level 1.
    pub start_level: u32,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        IndexingSettings {
            enable: false,
            index_styles: "{1} {1} {1} {1} {1} {1}".to_string(),
            connector: String::new(),
            global_prefix: String::new(),
            global_suffix: String::new(),
            allow_html: false,
            start_level: 1,
        }
    }
}

/// One rendered document as supplied by the host pipeline.
///
/// `content` and `excerpt` carry rendered markup; the remaining fields are
/// per-document overrides of the site-wide settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Identifier used in logs only.
    pub path: String,
    /// Rendered markup of the whole document.
    pub content: String,
    /// Rendered excerpt fragment, indexed with its own counter pass.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Per-document style specification; wins over the site-wide value.
    #[serde(default)]
    pub index_styles: Option<String>,
    /// Per-document start level; wins over the site-wide value.
    #[serde(default)]
    pub start_level: Option<u32>,
    /// Disable indexing for this document entirely.
    #[serde(default)]
    pub disabled: bool,
}

impl RenderedDocument {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        RenderedDocument {
            path: path.into(),
            content: content.into(),
            ..RenderedDocument::default()
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_index_styles(mut self, spec: impl Into<String>) -> Self {
        self.index_styles = Some(spec.into());
        self
    }

    pub fn with_start_level(mut self, start_level: u32) -> Self {
        self.start_level = Some(start_level);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Resolve settings and overrides into engine options for one pass.
fn build_options(
    settings: &IndexingSettings,
    document: &RenderedDocument,
) -> Result<RenderOptions, IndexingError> {
    let spec = document
        .index_styles
        .as_deref()
        .unwrap_or(&settings.index_styles);
    Ok(RenderOptions {
        styles: parse_index_styles(spec)?,
        connector: settings.connector.clone(),
        global_prefix: settings.global_prefix.clone(),
        global_suffix: settings.global_suffix.clone(),
        allow_markup_injection: settings.allow_html,
        // The first heading depth is 1, so level 0 has no meaning.
        start_level: document.start_level.unwrap_or(settings.start_level).max(1),
    })
}

/// Add hierarchical heading indexes to one rendered document.
///
/// No-op when indexing is disabled site-wide or for this document. On
/// success `content` (and `excerpt`, when present) are replaced by their
/// indexed versions; no other field is modified. On error the document is
/// left exactly as it was.
pub fn index_document(
    settings: &IndexingSettings,
    document: &mut RenderedDocument,
) -> Result<(), IndexingError> {
    if !settings.enable || document.disabled {
        return Ok(());
    }

    let options = build_options(settings, document)?;

    let content = index_fragment(&options, &document.content)?;
    let excerpt = match &document.excerpt {
        Some(excerpt) => Some(index_fragment(&options, excerpt)?),
        None => None,
    };

    document.content = content;
    document.excerpt = excerpt;
    tracing::info!(path = %document.path, "heading index added");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    fn settings() -> IndexingSettings {
        IndexingSettings {
            enable: true,
            index_styles: "{1} {1}".to_string(),
            connector: ".".to_string(),
            global_suffix: " ".to_string(),
            ..IndexingSettings::default()
        }
    }

    #[test]
    fn indexes_content_and_excerpt_independently() {
        let mut document = RenderedDocument::new("post/a", "<h1>A</h1><h2>B</h2>")
            .with_excerpt("<h1>A</h1>");
        index_document(&settings(), &mut document).unwrap();
        assert_eq!(document.content, "<h1>1 A</h1><h2>1.1 B</h2>");
        // The excerpt pass has its own counter stack.
        assert_eq!(document.excerpt.as_deref(), Some("<h1>1 A</h1>"));
    }

    #[test]
    fn disabled_site_wide_is_a_no_op() {
        let mut config = settings();
        config.enable = false;
        let mut document = RenderedDocument::new("post/a", "<h1>A</h1>");
        index_document(&config, &mut document).unwrap();
        assert_eq!(document.content, "<h1>A</h1>");
    }

    #[test]
    fn disabled_document_is_left_byte_for_byte() {
        let content = "<h1>A</h1>\n<p>unparsed &amp; untouched</p>";
        let mut document = RenderedDocument::new("post/a", content)
            .with_excerpt("<h2>E</h2>")
            .disabled();
        index_document(&settings(), &mut document).unwrap();
        assert_eq!(document.content, content);
        assert_eq!(document.excerpt.as_deref(), Some("<h2>E</h2>"));
    }

    #[test]
    fn document_style_override_wins() {
        let mut document =
            RenderedDocument::new("post/a", "<h1>A</h1>").with_index_styles("{A}");
        index_document(&settings(), &mut document).unwrap();
        assert_eq!(document.content, "<h1>A A</h1>");
    }

    #[test]
    fn document_start_level_override_wins() {
        let mut config = settings();
        config.start_level = 3;
        let mut document = RenderedDocument::new("post/a", "<h2>A</h2><h3>B</h3>")
            .with_start_level(2);
        index_document(&config, &mut document).unwrap();
        assert_eq!(document.content, "<h2>1 A</h2><h3>1.1 B</h3>");
    }

    #[test]
    fn failed_pass_leaves_the_document_unmodified() {
        let mut document = RenderedDocument::new("post/a", "<h1>A</h1>")
            .with_excerpt("<h1>E</h1><h2>F</h2><h3>G</h3>");
        let mut config = settings();
        config.index_styles = "{1} {1}".to_string();
        let err = index_document(&config, &mut document).unwrap_err();
        assert_eq!(
            err,
            IndexingError::Configuration(ConfigurationError::MissingLevelStyle { level: 3 })
        );
        // Content would have indexed fine, but the excerpt failed first.
        assert_eq!(document.content, "<h1>A</h1>");
        assert_eq!(document.excerpt.as_deref(), Some("<h1>E</h1><h2>F</h2><h3>G</h3>"));
    }

    #[test]
    fn start_level_zero_is_clamped() {
        let mut config = settings();
        config.start_level = 0;
        let mut document = RenderedDocument::new("post/a", "<h1>A</h1><h2>B</h2>");
        index_document(&config, &mut document).unwrap();
        assert_eq!(document.content, "<h1>1 A</h1><h2>1.1 B</h2>");
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: IndexingSettings = serde_json::from_str("{\"enable\": true}").unwrap();
        assert!(settings.enable);
        assert_eq!(settings.start_level, 1);
        assert_eq!(settings.index_styles, "{1} {1} {1} {1} {1} {1}");
    }
}
