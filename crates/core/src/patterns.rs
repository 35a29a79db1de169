//! Compiled regex patterns and CSS selectors shared across the plans.
//!
//! Everything here is compiled once on first use. The selector lists are
//! kept in cascade order: callers rely on the order for "first match wins".

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

// =============================================================================
// Readability scoring
// =============================================================================

/// Class/id fragments that suggest an element holds the main content.
pub static POSITIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story|tweet)")
        .expect("POSITIVE_CLASS regex")
});

/// Class/id fragments that suggest boilerplate.
pub static NEGATIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|highlight|code|example)",
    )
    .expect("NEGATIVE_CLASS regex")
});

/// Class/id fragments that get an element unwrapped during preprocessing.
pub static UNLIKELY_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup)",
    )
    .expect("UNLIKELY_CLASS regex")
});

/// Inline styles that hide an element.
pub static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none|visibility\s*:\s*hidden").expect("HIDDEN_STYLE regex"));

/// Internet Explorer conditional comments, including the downlevel-revealed form.
pub static CONDITIONAL_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\[if[^\]]*\]>.*?<!\[endif\]-->|<!--<!\[if[^\]]*\]>.*?<!\[endif\]-->")
        .expect("CONDITIONAL_COMMENT regex")
});

pub static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

// =============================================================================
// Regex plan (raw markup scanning)
// =============================================================================

pub static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("SCRIPT_BLOCK regex"));

pub static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style\s*>").expect("STYLE_BLOCK regex"));

pub static NOSCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<noscript\b.*?</noscript\s*>").expect("NOSCRIPT_BLOCK regex"));

pub static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("HTML_COMMENT regex"));

pub static ARTICLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<article\b[^>]*>.*?</article\s*>").expect("ARTICLE_BLOCK regex"));

pub static PARAGRAPH_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>.*?</p\s*>").expect("PARAGRAPH_BLOCK regex"));

pub static DIV_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<div\b[^>]*>.*?</div\s*>").expect("DIV_BLOCK regex"));

pub static META_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("META_TAG regex"));

/// `name="value"` pairs inside a single tag.
pub static TAG_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("TAG_ATTRIBUTE regex")
});

pub static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>([^<]+)</title\s*>").expect("TITLE_TAG regex"));

pub static H1_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>([^<]+)</h1\s*>").expect("H1_TAG regex"));

/// A `<span>` whose class mentions "by" or "author".
pub static BYLINE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b[^>]*class\s*=\s*["'][^"']*(?:by|author)[^"']*["'][^>]*>([^<]+)</span\s*>"#)
        .expect("BYLINE_SPAN regex")
});

pub static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("ANY_TAG regex"));

// =============================================================================
// Dates
// =============================================================================

pub static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("ISO_DATE regex"));

/// "March 3, 2024", "Mar. 3rd 2024" and similar.
pub static LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b")
        .expect("LONG_DATE regex")
});

// =============================================================================
// Selectors
// =============================================================================

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Candidate containers for the DOM-selector plan, in priority order,
/// paired with their source text for diagnostics.
pub static CONTENT_CONTAINERS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    [
        "article",
        "[role='main']",
        ".article-content",
        ".post-content",
        ".entry-content",
        ".content",
        "main",
        ".main-content",
        ".article-body",
        ".post-body",
        ".page-content",
        "#content",
        "#main",
        ".container",
        ".thread",
        ".feed",
        ".stream",
        ".timeline",
    ]
    .into_iter()
    .map(|css| (css, selector(css)))
    .collect()
});

/// Noise removed before the DOM-selector plan measures a container.
pub static CONTAINER_NOISE: LazyLock<Selector> = LazyLock::new(|| {
    selector("script, style, noscript, iframe, .ad, .advertisement, .sidebar, .nav, nav, footer, .comments")
});

/// Title sources for the DOM-selector plan, in priority order.
pub static PAGE_TITLE_SOURCES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["title", "h1", "h1.title", "h1.post-title", ".article-title", ".post-title"]
        .iter()
        .map(|css| selector(css))
        .collect()
});

/// Chrome stripped before the fallback plan reads the body text.
pub static FALLBACK_NOISE: LazyLock<Selector> = LazyLock::new(|| {
    selector("script, style, nav, footer, header, .nav, .navigation, .sidebar, .ads, .advertisement, [role='navigation']")
});

/// Chrome stripped before the metadata resolver recovers body text.
pub static BODY_TEXT_NOISE: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        "script, style, noscript, iframe, nav, footer, .nav, .navigation, .sidebar, .ads, .ad, .advertisement, .comments, .related-articles, [role='navigation']",
    )
});

/// Containers tried, in order, when recovering body text.
pub static BODY_TEXT_CONTAINERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["article", "main", "[role='main']", "body"]
        .iter()
        .map(|css| selector(css))
        .collect()
});

pub static JSON_LD_SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| selector("script[type='application/ld+json']"));

pub static GENERIC_AUTHOR: LazyLock<Selector> =
    LazyLock::new(|| selector("[class*='author'], [class*='byline'], [rel='author']"));

pub static GENERIC_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| selector("img[src*='article'], img[src*='content'], article img"));

/// Elements the post-processor checks for link density.
pub static LINK_HEAVY_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| selector("div, p, section, article, aside, nav, li"));

/// Elements the post-processor drops when they end up empty.
pub static EMPTY_PRONE_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| selector("div, p, span, section, article, aside, nav, header, footer"));

/// Leaves the DOM-selector plan drops after cleaning a container.
/// Elements the readability plan scores, matched in document order.
pub static CANDIDATE_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| selector("div, article, section, main, p, td, pre, blockquote"));

pub static EMPTY_LEAF_BLOCKS: LazyLock<Selector> = LazyLock::new(|| selector("div, span, p"));

pub static REL_AUTHOR: LazyLock<Selector> = LazyLock::new(|| selector("[rel='author']"));

pub static ITEMPROP_AUTHOR: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop='author']"));

pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

pub static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));

pub static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));

pub static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));

/// Header elements that may join the winning candidate as siblings.
pub static HEADER: LazyLock<Selector> = LazyLock::new(|| selector("header"));
