//! Readability-style content extraction.
//!
//! This is the engine behind the first and most trusted extraction plan.
//! The page is cleaned with a streaming rewriter, block elements are scored
//! by tag, class names and text density, and the best subtree plus its
//! siblings becomes the article.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::readability::Readability;
//!
//! let html = "<html><body><article><p>Content here</p></article></body></html>";
//! let result = Readability::new().parse_with_url(html, "https://example.com/post");
//! assert!(result.is_err()); // far too short to be readable
//! ```

mod candidates;
mod metadata;
pub mod postprocess;
pub mod preprocess;
pub mod scoring;

pub use candidates::{ExtractConfig, ExtractedContent, extract_content};
pub use metadata::Metadata;

use url::Url;

use crate::parse::Document;
use crate::{GleanError, Result};
use postprocess::PostProcessConfig;
use scoring::ScoreConfig;

/// Configuration for the Readability builder.
///
/// # Example
///
/// ```rust
/// use gleaner_core::ReadabilityConfig;
///
/// let config = ReadabilityConfig::builder()
///     .min_score(25.0)
///     .char_threshold(500)
///     .preserve_images(true)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ReadabilityConfig {
    /// Minimum score threshold for extraction (default: 20.0).
    pub min_score: f64,

    /// Text length used to skip tiny candidates, which need at least a tenth
    /// of it (default: 500).
    pub char_threshold: usize,

    /// Number of top candidates to track (default: 5).
    pub nb_top_candidates: usize,

    /// Maximum elements to score (0 = a cap of 1000, default: 0).
    pub max_elems_to_parse: usize,

    /// Fraction of the top score a sibling needs to join the article (default: 0.2).
    pub sibling_threshold: f64,

    /// Whether to preserve class attributes in output HTML (default: false).
    pub keep_classes: bool,

    /// Whether to preserve images in output HTML (default: true).
    pub preserve_images: bool,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            min_score: 20.0,
            char_threshold: 500,
            nb_top_candidates: 5,
            max_elems_to_parse: 0,
            sibling_threshold: 0.2,
            keep_classes: false,
            preserve_images: true,
        }
    }
}

impl ReadabilityConfig {
    /// Creates a new builder for ReadabilityConfig.
    pub fn builder() -> ReadabilityConfigBuilder {
        ReadabilityConfigBuilder::new()
    }

    fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            min_score_threshold: self.min_score,
            max_top_candidates: self.nb_top_candidates,
            char_threshold: self.char_threshold,
            max_elements: self.max_elems_to_parse,
            sibling_threshold: self.sibling_threshold,
            score: ScoreConfig::default(),
            postprocess: PostProcessConfig {
                strip_images: !self.preserve_images,
                keep_classes: self.keep_classes,
                ..Default::default()
            },
        }
    }
}

/// Builder for ReadabilityConfig.
///
/// # Example
///
/// ```rust
/// use gleaner_core::ReadabilityConfig;
///
/// let config = ReadabilityConfig::builder()
///     .min_score(30.0)
///     .char_threshold(1000)
///     .keep_classes(true)
///     .build();
/// ```
pub struct ReadabilityConfigBuilder {
    config: ReadabilityConfig,
}

impl ReadabilityConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ReadabilityConfig::default() }
    }

    /// Sets the minimum score threshold.
    pub fn min_score(mut self, value: f64) -> Self {
        self.config.min_score = value;
        self
    }

    /// Sets the character threshold.
    pub fn char_threshold(mut self, value: usize) -> Self {
        self.config.char_threshold = value;
        self
    }

    /// Sets the number of top candidates.
    pub fn nb_top_candidates(mut self, value: usize) -> Self {
        self.config.nb_top_candidates = value;
        self
    }

    /// Sets the maximum elements to parse.
    pub fn max_elems_to_parse(mut self, value: usize) -> Self {
        self.config.max_elems_to_parse = value;
        self
    }

    /// Sets the sibling score threshold.
    pub fn sibling_threshold(mut self, value: f64) -> Self {
        self.config.sibling_threshold = value;
        self
    }

    /// Sets whether to preserve class attributes in output HTML.
    pub fn keep_classes(mut self, value: bool) -> Self {
        self.config.keep_classes = value;
        self
    }

    /// Sets whether to preserve images in output HTML.
    pub fn preserve_images(mut self, value: bool) -> Self {
        self.config.preserve_images = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ReadabilityConfig {
        self.config
    }
}

impl Default for ReadabilityConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An extracted article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Cleaned HTML of the main content.
    pub content: String,
    /// Plain text of `content`, trimmed.
    pub text_content: String,
    pub title: Option<String>,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
}

/// Main entry point for readability extraction.
///
/// # Example
///
/// ```rust
/// use gleaner_core::{Readability, ReadabilityConfig};
///
/// let reader = Readability::with_config(ReadabilityConfig::builder().min_score(30.0).build());
/// let html = "<html><body><nav>Links</nav></body></html>";
/// assert!(reader.parse_with_url(html, "https://example.com").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Readability {
    config: ReadabilityConfig,
}

impl Readability {
    /// Creates a new Readability instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new Readability instance with a custom configuration.
    pub fn with_config(config: ReadabilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReadabilityConfig {
        &self.config
    }

    /// Parses HTML with the page URL used for relative link resolution.
    ///
    /// An unparseable URL only disables link resolution. Metadata is read
    /// from the raw page, since the preprocessor drops the JSON-LD scripts.
    ///
    /// # Errors
    ///
    /// [`GleanError::NoContent`] when nothing scores or the cleaned content is
    /// empty, [`GleanError::NotReadable`] when the best candidate stays below
    /// `min_score`.
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Article> {
        let base_url = Url::parse(url).ok();
        let doc = Document::parse_with_preprocessing(html, base_url);

        let extracted = extract_content(&doc, &self.config.extract_config())?;
        let text_content = Document::parse_fragment(&extracted.content).text_content().trim().to_string();
        if text_content.is_empty() {
            return Err(GleanError::NoContent);
        }

        let metadata = Document::parse(html).extract_metadata();

        Ok(Article {
            content: extracted.content,
            text_content,
            title: metadata.title,
            byline: metadata.byline,
            excerpt: metadata.excerpt,
            site_name: metadata.site_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_HTML: &str = r##"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Test Article</title>
            <meta name="author" content="Test Author">
        </head>
        <body>
            <nav class="menu"><a href="/">Home</a> <a href="/about">About</a></nav>
            <article class="main-content">
                <h1>Article Title</h1>
                <p>This is a long paragraph with lots of content, clauses, and commas to ensure it meets the character threshold.</p>
                <p>This is another long paragraph with plenty of content, text, commas, and meaningful sentences for scoring.</p>
                <p>A third paragraph with substantial content that should help boost the overall readability score significantly.</p>
                <p><a href="/related">A relative link</a> inside an otherwise ordinary paragraph of article prose, written out long.</p>
            </article>
        </body>
        </html>
    "##;

    #[test]
    fn test_readability_config_default() {
        let config = ReadabilityConfig::default();
        assert_eq!(config.min_score, 20.0);
        assert_eq!(config.char_threshold, 500);
        assert_eq!(config.nb_top_candidates, 5);
        assert_eq!(config.max_elems_to_parse, 0);
        assert_eq!(config.sibling_threshold, 0.2);
        assert!(!config.keep_classes);
        assert!(config.preserve_images);
    }

    #[test]
    fn test_readability_config_builder() {
        let config = ReadabilityConfig::builder()
            .min_score(30.0)
            .char_threshold(1000)
            .nb_top_candidates(10)
            .max_elems_to_parse(500)
            .sibling_threshold(0.5)
            .keep_classes(true)
            .preserve_images(false)
            .build();

        assert_eq!(config.min_score, 30.0);
        assert_eq!(config.char_threshold, 1000);
        assert_eq!(config.nb_top_candidates, 10);
        assert_eq!(config.max_elems_to_parse, 500);
        assert_eq!(config.sibling_threshold, 0.5);
        assert!(config.keep_classes);
        assert!(!config.preserve_images);
    }

    #[test]
    fn test_config_maps_to_postprocess() {
        let config = ReadabilityConfig::builder().preserve_images(false).keep_classes(true).build();
        let extract = config.extract_config();

        assert!(extract.postprocess.strip_images);
        assert!(extract.postprocess.keep_classes);
    }

    #[test]
    fn test_readability_with_config() {
        let config = ReadabilityConfig::builder().min_score(25.0).build();
        let reader = Readability::with_config(config);
        assert_eq!(reader.config().min_score, 25.0);
    }

    #[test]
    fn test_parse_with_url() {
        let article = Readability::new()
            .parse_with_url(ARTICLE_HTML, "https://example.com/blog/post")
            .unwrap();

        assert!(article.text_content.contains("third paragraph"));
        assert!(!article.text_content.contains("Home"));
        assert!(article.content.contains("https://example.com/related"));
        assert_eq!(article.title, Some("Test Article".to_string()));
        assert_eq!(article.byline, Some("Test Author".to_string()));
    }

    #[test]
    fn test_metadata_survives_preprocessing() {
        let html = ARTICLE_HTML.replace(
            "<title>Test Article</title>",
            r#"<script type="application/ld+json">{"@type":"Article","headline":"From JSON-LD"}</script>"#,
        );
        let article = Readability::new().parse_with_url(&html, "not a url").unwrap();

        assert_eq!(article.title, Some("From JSON-LD".to_string()));
    }

    #[test]
    fn test_not_readable() {
        let html = r##"<html><body><nav><a href="#">Link 1</a><a href="#">Link 2</a></nav></body></html>"##;
        let result = Readability::new().parse_with_url(html, "https://example.com");

        assert!(matches!(result, Err(GleanError::NoContent | GleanError::NotReadable { .. })));
    }
}
