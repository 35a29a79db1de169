//! Cleanup of the extracted article HTML.

use lol_html::{HtmlRewriter, Settings, element};

use super::scoring::link_density;
use crate::parse::Document;
use crate::patterns::{CONDITIONAL_COMMENT, EMPTY_PRONE_BLOCKS, LINK_HEAVY_BLOCKS};

/// Configuration for HTML post-processing cleanup
#[derive(Debug, Clone)]
pub struct PostProcessConfig {
    /// Whether to remove empty nodes
    pub remove_empty_nodes: bool,
    /// Maximum passes for removing empty nodes
    pub max_empty_node_passes: usize,
    /// Whether to remove nodes with high link density
    pub remove_high_link_density: bool,
    /// Maximum link density threshold (0.0 to 1.0)
    pub max_link_density: f64,
    /// Whether to strip all images
    pub strip_images: bool,
    /// Whether to keep class attributes (default: false)
    pub keep_classes: bool,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            remove_empty_nodes: true,
            max_empty_node_passes: 10,
            remove_high_link_density: true,
            max_link_density: 0.5,
            strip_images: false,
            keep_classes: false,
        }
    }
}

/// Post-process extracted HTML by cleaning up remaining unwanted content
///
/// Link-heavy blocks go first so that the empty-node sweep can collapse the
/// wrappers they leave behind.
pub fn postprocess_html(html: &str, config: &PostProcessConfig) -> String {
    let html = CONDITIONAL_COMMENT.replace_all(html, "");
    let mut doc = Document::parse_fragment(&html);

    if config.remove_high_link_density {
        doc = doc.without_matching(&LINK_HEAVY_BLOCKS, |el| link_density(el) > config.max_link_density);
    }

    if config.remove_empty_nodes {
        doc = doc.without_blank(&EMPTY_PRONE_BLOCKS, config.max_empty_node_passes);
    }

    let cleaned = doc.inner_html();
    if config.keep_classes && !config.strip_images {
        return cleaned;
    }

    strip_markup(&cleaned, config).unwrap_or(cleaned)
}

/// Drops images and class attributes in one streaming pass.
fn strip_markup(html: &str, config: &PostProcessConfig) -> Option<String> {
    let mut handlers = Vec::new();
    if config.strip_images {
        handlers.push(element!("img", |el| {
            el.remove();
            Ok(())
        }));
    }
    if !config.keep_classes {
        handlers.push(element!("[class]", |el| {
            el.remove_attribute("class");
            Ok(())
        }));
    }

    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = HtmlRewriter::new(
        Settings { element_content_handlers: handlers, ..Settings::default() },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter.write(html.as_bytes()).ok()?;
    rewriter.end().ok()?;

    Some(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_classes_by_default() {
        let result = postprocess_html(r#"<p class="lead">Hello <b class="x">world</b></p>"#, &Default::default());
        assert_eq!(result, "<p>Hello <b>world</b></p>");
    }

    #[test]
    fn test_keep_classes() {
        let config = PostProcessConfig { keep_classes: true, ..Default::default() };
        let result = postprocess_html(r#"<p class="lead">Hello</p>"#, &config);
        assert!(result.contains("class=\"lead\""));
    }

    #[test]
    fn test_strip_images() {
        let html = r#"<p>Photo <img src="a.jpg"> caption</p>"#;
        let config = PostProcessConfig { strip_images: true, ..Default::default() };

        assert!(!postprocess_html(html, &config).contains("<img"));
        assert!(postprocess_html(html, &Default::default()).contains("<img"));
    }

    #[test]
    fn test_removes_empty_nodes_recursively() {
        let html = "<div><section><p> </p><span></span></section></div><p>Kept text</p>";
        let result = postprocess_html(html, &Default::default());
        assert_eq!(result, "<p>Kept text</p>");
    }

    #[test]
    fn test_removes_link_heavy_blocks() {
        let html = r##"<ul><li><a href="#">Home</a></li><li><a href="#">About</a></li></ul>
            <p>Real paragraph text with a <a href="#">single</a> link inside of it.</p>"##;
        let result = postprocess_html(html, &Default::default());

        assert!(!result.contains("Home"));
        assert!(result.contains("Real paragraph"));
    }

    #[test]
    fn test_removes_conditional_comments() {
        let html = "<!--[if IE]><p>Old browser</p><![endif]--><p>Modern</p>";
        let result = postprocess_html(html, &Default::default());

        assert!(!result.contains("Old browser"));
        assert!(result.contains("Modern"));
    }
}
