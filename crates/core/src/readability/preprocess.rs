//! Streaming cleanup of raw HTML before it is parsed for scoring.

use lol_html::html_content::Element as RewriterElement;
use lol_html::{HtmlRewriter, Settings, doc_comments, element};
use url::Url;

use crate::patterns::{HIDDEN_STYLE, POSITIVE_CLASS, UNLIKELY_CLASS, WHITESPACE_RUN};

/// Tags whose whole subtree never carries article text.
const REMOVED_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "svg", "canvas"];

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to unwrap unlikely candidates
    pub remove_unlikely: bool,
    /// Whether to keep positive candidates even if they match unlikely patterns
    pub keep_positive: bool,
    /// Whether to remove hidden elements
    pub remove_hidden: bool,
    /// Base URL for converting relative URLs
    pub base_url: Option<Url>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { remove_unlikely: true, keep_positive: true, remove_hidden: true, base_url: None }
    }
}

/// Preprocess HTML by removing unwanted elements and normalizing the document
///
/// Runs as a single lol_html pass. When the rewriter rejects the input the
/// original markup is returned with only whitespace normalized.
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let rewritten = rewrite(html, config).unwrap_or_else(|| html.to_string());
    normalize_whitespace(&rewritten)
}

fn rewrite(html: &str, config: &PreprocessConfig) -> Option<String> {
    let mut handlers: Vec<_> = REMOVED_TAGS
        .iter()
        .map(|tag| {
            element!(*tag, |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    handlers.push(element!("*", |el| {
        if config.remove_hidden && is_hidden(el) {
            el.remove();
        } else if config.remove_unlikely && is_unlikely(el, config.keep_positive) {
            el.remove_and_keep_content();
        }
        Ok(())
    }));

    if let Some(base_url) = &config.base_url {
        handlers.push(element!("a[href]", move |el| {
            absolutize(el, "href", base_url);
            Ok(())
        }));
        handlers.push(element!("img[src]", move |el| {
            absolutize(el, "src", base_url);
            Ok(())
        }));
    }

    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: handlers,
            document_content_handlers: vec![doc_comments!(|comment| {
                comment.remove();
                Ok(())
            })],
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter.write(html.as_bytes()).ok()?;
    rewriter.end().ok()?;

    Some(String::from_utf8_lossy(&output).into_owned())
}

fn is_hidden(el: &RewriterElement<'_, '_>) -> bool {
    el.has_attribute("hidden")
        || el
            .get_attribute("aria-hidden")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
        || el.get_attribute("style").is_some_and(|style| HIDDEN_STYLE.is_match(&style))
}

fn is_unlikely(el: &RewriterElement<'_, '_>, keep_positive: bool) -> bool {
    let tag = el.tag_name();
    if matches!(tag.as_str(), "html" | "body" | "article" | "main") {
        return false;
    }

    let id = el.get_attribute("id").unwrap_or_default();
    let class = el.get_attribute("class").unwrap_or_default();

    std::iter::once(id.as_str())
        .chain(class.split_whitespace())
        .filter(|name| !name.is_empty())
        .any(|name| UNLIKELY_CLASS.is_match(name) && !(keep_positive && POSITIVE_CLASS.is_match(name)))
}

fn absolutize(el: &mut RewriterElement<'_, '_>, attr: &str, base_url: &Url) {
    if let Some(value) = el.get_attribute(attr)
        && let Ok(absolute) = base_url.join(&value)
    {
        el.set_attribute(attr, absolute.as_str()).ok();
    }
}

fn normalize_whitespace(html: &str) -> String {
    WHITESPACE_RUN.replace_all(html, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_unwanted_tags() {
        let html = r#"
            <html>
                <head><script>alert('test');</script><style>body{color:red;}</style></head>
                <body>
                    <noscript>Enable JavaScript</noscript>
                    <iframe src="https://example.com"></iframe>
                    <svg><rect width="100" height="100"/></svg>
                    <canvas id="chart"></canvas>
                    <p>Content</p>
                </body>
            </html>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("alert"));
        assert!(!result.contains("color:red"));
        assert!(!result.contains("Enable JavaScript"));
        assert!(!result.contains("example.com"));
        assert!(!result.contains("rect"));
        assert!(!result.contains("chart"));
        assert!(result.contains("<p>Content</p>"));
    }

    #[test]
    fn test_removes_comments() {
        let result = preprocess_html("<body><!-- note --><p>Visible content</p></body>", &PreprocessConfig::default());
        assert!(!result.contains("<!--"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_unwraps_unlikely_but_keeps_text() {
        let html = r#"<body><div id="sidebar"><span>Sidebar text</span></div><div id="main-content">Main</div></body>"#;
        let result = preprocess_html(html, &PreprocessConfig::default());

        assert!(!result.contains("id=\"sidebar\""));
        assert!(result.contains("Sidebar text"));
        assert!(result.contains("main-content"));
    }

    #[test]
    fn test_removes_hidden_elements() {
        let html = r#"
            <body>
                <div style="display:none">Hidden content</div>
                <div style="visibility: hidden">Invisible content</div>
                <div hidden>Attribute hidden</div>
                <span aria-hidden="true">Icon</span>
                <div>Visible content</div>
            </body>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("Hidden content"));
        assert!(!result.contains("Invisible content"));
        assert!(!result.contains("Attribute hidden"));
        assert!(!result.contains("Icon"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_converts_relative_urls() {
        let base = Url::parse("https://example.com/blog/").unwrap();
        let html = r#"<a href="/about">About</a><a href="post.html">Post</a><img src="image.jpg">"#;
        let config = PreprocessConfig { base_url: Some(base), ..Default::default() };

        let result = preprocess_html(html, &config);
        assert!(result.contains("href=\"https://example.com/about\""));
        assert!(result.contains("href=\"https://example.com/blog/post.html\""));
        assert!(result.contains("src=\"https://example.com/blog/image.jpg\""));
    }

    #[test]
    fn test_normalizes_whitespace() {
        let result = preprocess_html("<p>Multiple   spaces\t\t\n\nhere</p>", &PreprocessConfig::default());
        assert_eq!(result, "<p>Multiple spaces here</p>");
    }
}
