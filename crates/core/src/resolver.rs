//! News metadata resolution.
//!
//! A second cascade, independent of content extraction, that reads the
//! facts a publisher declares about an article: structured data first, then
//! Open Graph, then Twitter Card tags, and finally whatever heuristics can
//! recover from the markup itself. The first declared source that yields a
//! valid record wins; the heuristic stage always answers.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::{MetadataSource, resolve_metadata};
//!
//! let html = "<html><head><title>A page</title></head><body><h1>Hello there</h1></body></html>";
//! let result = resolve_metadata(html, "https://example.com/hello");
//!
//! assert_eq!(result.source, MetadataSource::Generic);
//! assert_eq!(result.title, "Hello there");
//! ```

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use url::Url;

use crate::json_ld;
use crate::parse::Document;
use crate::patterns::{BODY_TEXT_CONTAINERS, BODY_TEXT_NOISE, GENERIC_AUTHOR, GENERIC_IMAGE, H1, TITLE};
use crate::text::{build_excerpt, detect_paywall, find_date, parse_date, site_name_from_url};

/// Where a [`MetadataResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataSource {
    /// JSON-LD `Article`/`NewsArticle` records.
    #[serde(rename = "schemaorg")]
    SchemaOrg,
    /// `og:*` meta tags.
    #[serde(rename = "opengraph")]
    OpenGraph,
    /// `twitter:*` meta tags.
    #[serde(rename = "twittercard")]
    TwitterCard,
    /// Heuristics over the page markup.
    #[serde(rename = "generic")]
    Generic,
}

impl MetadataSource {
    /// Fixed confidence each source carries.
    pub fn confidence(self) -> u8 {
        match self {
            MetadataSource::SchemaOrg => 95,
            MetadataSource::OpenGraph => 75,
            MetadataSource::TwitterCard => 60,
            MetadataSource::Generic => 50,
        }
    }
}

/// Article metadata resolved from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResult {
    pub title: String,
    pub content: String,
    pub text_content: String,
    pub author: String,
    pub excerpt: String,
    pub image_url: String,
    pub site_name: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub publish_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub modified_date: Option<OffsetDateTime>,
    /// Paywall keywords found in `content`, in keyword-list order.
    pub paywalled_indicators: Vec<String>,
    pub confidence: u8,
    pub source: MetadataSource,
}

impl MetadataResult {
    fn new(source: MetadataSource, title: String, content: String) -> Self {
        Self {
            paywalled_indicators: detect_paywall(&content),
            text_content: content.clone(),
            title,
            content,
            author: String::new(),
            excerpt: String::new(),
            image_url: String::new(),
            site_name: String::new(),
            publish_date: None,
            modified_date: None,
            confidence: source.confidence(),
            source,
        }
    }

    /// A record is usable when it has a real title and a real body.
    pub fn is_valid(&self) -> bool {
        self.title.chars().count() > 5 && self.content.chars().count() > 100
    }
}

/// The page being resolved, with its noise-stripped body text computed once.
struct NewsPage<'a> {
    doc: Document,
    url: &'a str,
    body_text: OnceCell<String>,
}

impl<'a> NewsPage<'a> {
    fn new(html: &str, url: &'a str) -> Self {
        Self { doc: Document::parse(html), url, body_text: OnceCell::new() }
    }

    /// Article text recovered from a copy of the page without its chrome.
    fn body_text(&self) -> &str {
        self.body_text.get_or_init(|| {
            let cleaned = self.doc.without(&BODY_TEXT_NOISE);
            BODY_TEXT_CONTAINERS
                .iter()
                .find_map(|selector| cleaned.first(selector))
                .map(|el| el.trimmed_text())
                .unwrap_or_default()
        })
    }

    fn site_name(&self) -> String {
        site_name_from_url(self.url)
    }
}

type Stage = fn(&NewsPage<'_>) -> Option<MetadataResult>;

/// Declared-metadata stages, most trusted first.
const STAGES: [(MetadataSource, Stage); 3] = [
    (MetadataSource::SchemaOrg, from_schema_org),
    (MetadataSource::OpenGraph, from_open_graph),
    (MetadataSource::TwitterCard, from_twitter_card),
];

/// Resolves article metadata from `html`, fetched from `url`.
///
/// Never fails: each declared source is tried in turn and discarded when
/// missing or invalid, and the heuristic stage answers when none fit.
pub fn resolve_metadata(html: &str, url: &str) -> MetadataResult {
    let page = NewsPage::new(html, url);

    for (source, stage) in STAGES {
        match stage(&page) {
            Some(result) if result.is_valid() => {
                debug!(?source, url, "metadata resolved");
                return result;
            }
            Some(_) => debug!(?source, "metadata stage produced an invalid record"),
            None => debug!(?source, "metadata stage found nothing"),
        }
    }

    debug!(source = ?MetadataSource::Generic, url, "metadata resolved");
    from_markup(&page)
}

fn from_schema_org(page: &NewsPage<'_>) -> Option<MetadataResult> {
    let article = json_ld::find_article(&page.doc)?;

    let mut result = MetadataResult::new(
        MetadataSource::SchemaOrg,
        article.headline().unwrap_or_default(),
        article.body().unwrap_or_default(),
    );
    result.author = article.author().unwrap_or_default();
    result.excerpt = article.description().unwrap_or_default();
    result.image_url = article.image().unwrap_or_default();
    result.site_name = article.publisher_name().unwrap_or_else(|| page.site_name());
    result.publish_date = article.date_published().and_then(parse_date);
    result.modified_date = article.date_modified().and_then(parse_date);

    Some(result)
}

fn from_open_graph(page: &NewsPage<'_>) -> Option<MetadataResult> {
    let doc = &page.doc;
    let title = doc.meta_content("og:title")?;

    let mut result = MetadataResult::new(MetadataSource::OpenGraph, title, page.body_text().to_string());
    result.excerpt = doc.meta_content("og:description").unwrap_or_default();
    result.image_url = doc.meta_content("og:image").unwrap_or_default();
    result.author = doc.meta_content("article:author").unwrap_or_default();
    result.publish_date = doc.meta_content("article:published_time").as_deref().and_then(parse_date);
    result.modified_date = doc.meta_content("article:modified_time").as_deref().and_then(parse_date);
    result.site_name = doc.meta_content("og:site_name").unwrap_or_else(|| page.site_name());

    Some(result)
}

fn from_twitter_card(page: &NewsPage<'_>) -> Option<MetadataResult> {
    let doc = &page.doc;
    let title = doc.meta_content("twitter:title")?;

    let mut result = MetadataResult::new(MetadataSource::TwitterCard, title, page.body_text().to_string());
    result.excerpt = doc.meta_content("twitter:description").unwrap_or_default();
    result.image_url = doc.meta_content("twitter:image").unwrap_or_default();
    result.site_name = page.site_name();

    Some(result)
}

/// Heuristic stage; always produces a record.
fn from_markup(page: &NewsPage<'_>) -> MetadataResult {
    let doc = &page.doc;
    let title = doc
        .first_text(&H1)
        .or_else(|| doc.first_text(&TITLE))
        .unwrap_or_else(|| "Untitled".to_string());
    let body_text = page.body_text().to_string();

    let mut result = MetadataResult::new(MetadataSource::Generic, title, body_text);
    result.excerpt = build_excerpt(&result.text_content);
    result.author = doc.first(&GENERIC_AUTHOR).map(|el| el.trimmed_text()).unwrap_or_default();
    result.image_url = doc
        .first(&GENERIC_IMAGE)
        .and_then(|img| img.attr("src"))
        .map(|src| absolute_url(page.url, src))
        .unwrap_or_default();
    result.publish_date = doc.body().and_then(|body| find_date(&body.text()));
    result.site_name = page.site_name();

    result
}

fn absolute_url(base: &str, src: &str) -> String {
    Url::parse(base)
        .and_then(|base| base.join(src))
        .map(String::from)
        .unwrap_or_else(|_| src.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn body(words: usize) -> String {
        "Reporting continues on the story as officials respond. ".repeat(words)
    }

    #[test]
    fn test_schema_org_wins() {
        let html = format!(
            r#"<html><head>
            <meta property="og:title" content="OG headline for the story">
            <script type="application/ld+json">{{
                "@context": "https://schema.org", "@type": "NewsArticle",
                "headline": "Structured headline",
                "articleBody": "{} Subscribe today. Become a Paywall partner.",
                "author": [{{"@type": "Person", "name": "Ada Lovelace"}}],
                "datePublished": "2024-03-03T09:30:00Z",
                "dateModified": "2024-03-04",
                "image": {{"@type": "ImageObject", "url": "https://cdn.example.com/lead.jpg"}}
            }}</script></head><body><p>page</p></body></html>"#,
            body(3)
        );
        let result = resolve_metadata(&html, "https://www.example.com/story");

        assert_eq!(result.source, MetadataSource::SchemaOrg);
        assert_eq!(result.confidence, 95);
        assert_eq!(result.title, "Structured headline");
        assert_eq!(result.author, "Ada Lovelace");
        assert_eq!(result.image_url, "https://cdn.example.com/lead.jpg");
        assert_eq!(result.site_name, "example.com");
        assert_eq!(result.publish_date, Some(datetime!(2024-03-03 09:30 UTC)));
        assert_eq!(result.modified_date, Some(datetime!(2024-03-04 0:00 UTC)));
        assert_eq!(result.paywalled_indicators, vec!["subscribe", "paywall"]);
    }

    #[test]
    fn test_schema_org_with_thumbnail_and_thumbnail_url() {
        let html = format!(
            r#"<html><head><script type="application/ld+json">{{
                "@type": "NewsArticle", "headline": "Harbor Ferry Schedule Expands",
                "articleBody": "{}",
                "thumbnail": {{"@type": "ImageObject", "url": "https://cdn.example.com/thumb.jpg"}},
                "thumbnailUrl": "https://cdn.example.com/thumb-url.jpg"
            }}</script></head><body><p>page</p></body></html>"#,
            body(5)
        );
        let result = resolve_metadata(&html, "https://www.example.com/ferry");

        assert_eq!(result.source, MetadataSource::SchemaOrg);
        assert_eq!(result.confidence, 95);
        assert_eq!(result.title, "Harbor Ferry Schedule Expands");
        assert_eq!(result.image_url, "https://cdn.example.com/thumb.jpg");
    }

    #[test]
    fn test_invalid_schema_org_falls_through_to_open_graph() {
        let html = format!(
            r#"<html><head>
            <script type="application/ld+json">{{"@type": "Article", "headline": "Tiny"}}</script>
            <meta property="og:title" content="Open Graph headline">
            <meta property="og:description" content="Summary">
            <meta property="og:site_name" content="The Daily">
            <meta property="article:published_time" content="2023-11-20T08:00:00+01:00">
            </head><body><nav>Sections</nav><article>{}</article></body></html>"#,
            body(3)
        );
        let result = resolve_metadata(&html, "https://example.com/story");

        assert_eq!(result.source, MetadataSource::OpenGraph);
        assert_eq!(result.confidence, 75);
        assert_eq!(result.excerpt, "Summary");
        assert_eq!(result.site_name, "The Daily");
        assert!(!result.content.contains("Sections"));
        assert!(result.publish_date.is_some());
    }

    #[test]
    fn test_twitter_card() {
        let html = format!(
            r#"<html><head>
            <meta name="twitter:title" content="Card headline">
            <meta name="twitter:image" content="https://example.com/card.png">
            </head><body><main>{}</main></body></html>"#,
            body(3)
        );
        let result = resolve_metadata(&html, "https://example.com/story");

        assert_eq!(result.source, MetadataSource::TwitterCard);
        assert_eq!(result.confidence, 60);
        assert_eq!(result.image_url, "https://example.com/card.png");
        assert_eq!(result.author, "");
        assert!(result.publish_date.is_none());
    }

    #[test]
    fn test_generic_heuristics() {
        let html = format!(
            r#"<html><head><title>Tab title</title></head><body>
            <h1>Heading of the page</h1>
            <span class="author-name"> Grace Hopper </span>
            <p>Published March 3, 2024</p>
            <article><img src="/img/photo.jpg"><p>{}</p></article>
            <aside class="comments">subscribe to comments</aside>
            </body></html>"#,
            body(6)
        );
        let result = resolve_metadata(&html, "https://example.com/news/story");

        assert_eq!(result.source, MetadataSource::Generic);
        assert_eq!(result.confidence, 50);
        assert_eq!(result.title, "Heading of the page");
        assert_eq!(result.author, "Grace Hopper");
        assert_eq!(result.image_url, "https://example.com/img/photo.jpg");
        assert_eq!(result.publish_date, Some(datetime!(2024-03-03 0:00 UTC)));
        assert!(result.excerpt.ends_with("..."));
        assert!(result.paywalled_indicators.is_empty());
    }

    #[test]
    fn test_generic_untitled() {
        let result = resolve_metadata("<p>nothing</p>", "not a url");

        assert_eq!(result.title, "Untitled");
        assert_eq!(result.site_name, "");
        assert!(!result.is_valid());
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = resolve_metadata("<h1>Hello there</h1>", "https://example.com");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["source"], "generic");
        assert!(json.get("paywalledIndicators").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json["publishDate"].is_null());
    }
}
