//! Plan C: block ranking over raw markup.
//!
//! No DOM is built. Script, style, comment and noscript regions are cut out
//! with regular expressions, then every `<article>`, `<p>` and `<div>` block
//! is collected and the five largest win. Ranking by size can reorder the
//! page's blocks; the plan trades document order for robustness on markup
//! the parser-based plans could not use.

use super::{Page, Strategy};
use crate::patterns::{
    ARTICLE_BLOCK, BYLINE_SPAN, DIV_BLOCK, H1_TAG, HTML_COMMENT, META_TAG, NOSCRIPT_BLOCK, PARAGRAPH_BLOCK,
    SCRIPT_BLOCK, STYLE_BLOCK, TAG_ATTRIBUTE, TITLE_TAG,
};
use crate::result::{ExtractionResult, Plan};
use crate::text::{collapse_whitespace, site_name_from_url, strip_html, title_from_url};
use crate::{GleanError, Result};

/// Number of blocks kept after ranking.
const TOP_BLOCKS: usize = 5;

/// Byline meta keys, in priority order.
const BYLINE_META: &[&str] = &["article:author", "og:article:author", "author"];

/// Ranks raw content blocks by size.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRankingPlan;

impl Strategy for BlockRankingPlan {
    fn plan(&self) -> Plan {
        Plan::Regex
    }

    fn run(&self, page: &Page) -> Result<ExtractionResult> {
        let cleaned = strip_noise(&page.html);

        let mut blocks: Vec<&str> = [&*ARTICLE_BLOCK, &*PARAGRAPH_BLOCK, &*DIV_BLOCK]
            .into_iter()
            .flat_map(|pattern| pattern.find_iter(&cleaned).map(|m| m.as_str()))
            .collect();

        if blocks.is_empty() {
            return Err(GleanError::NoContent);
        }

        let seen = blocks.len();
        blocks.sort_by(|a, b| b.len().cmp(&a.len()));
        blocks.truncate(TOP_BLOCKS);

        let content = blocks.join("\n");
        let text_content = strip_html(&content);

        Ok(ExtractionResult::from_text(Plan::Regex, content, text_content)
            .with_title(find_title(&page.html).unwrap_or_else(|| title_from_url(&page.url)))
            .with_byline(find_byline(&page.html).unwrap_or_default())
            .with_site_name(site_name_from_url(&page.url))
            .with_message(format!("Extracted {seen} content blocks")))
    }
}

fn strip_noise(html: &str) -> String {
    [&*SCRIPT_BLOCK, &*STYLE_BLOCK, &*HTML_COMMENT, &*NOSCRIPT_BLOCK]
        .into_iter()
        .fold(html.to_string(), |acc, pattern| pattern.replace_all(&acc, "").into_owned())
}

/// `content` of the first `<meta>` whose `name` or `property` equals `key`.
fn meta_content(html: &str, key: &str) -> Option<String> {
    META_TAG.find_iter(html).find_map(|tag| {
        let mut matches_key = false;
        let mut content = None;

        for caps in TAG_ATTRIBUTE.captures_iter(tag.as_str()) {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "name" | "property" if value.eq_ignore_ascii_case(key) => matches_key = true,
                "content" => content = Some(value),
                _ => {}
            }
        }

        content.filter(|_| matches_key).map(str::trim).filter(|c| !c.is_empty()).map(str::to_string)
    })
}

fn first_capture(pattern: &regex::Regex, html: &str) -> Option<String> {
    let text = collapse_whitespace(pattern.captures(html)?.get(1)?.as_str());
    (!text.is_empty()).then_some(text)
}

fn find_title(html: &str) -> Option<String> {
    meta_content(html, "og:title")
        .or_else(|| first_capture(&TITLE_TAG, html))
        .or_else(|| first_capture(&H1_TAG, html))
}

fn find_byline(html: &str) -> Option<String> {
    BYLINE_META
        .iter()
        .find_map(|key| meta_content(html, key))
        .or_else(|| first_capture(&BYLINE_SPAN, html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_blocks_by_size() {
        let html = r#"<html><body>
            <script>var ignored = "<p>not a block</p>";</script>
            <!-- <p>commented out</p> -->
            <p>short</p>
            <p>a much longer paragraph &amp; friends&nbsp;here</p>
        </body></html>"#;
        let result = BlockRankingPlan.run(&Page::new(html, "https://example.com/x")).unwrap();

        assert_eq!(result.plan, Plan::Regex);
        assert!(result.content.starts_with("<p>a much longer"));
        assert_eq!(result.text_content, "a much longer paragraph & friends here short");
        assert_eq!(result.message.as_deref(), Some("Extracted 2 content blocks"));
    }

    #[test]
    fn test_keeps_top_five() {
        let html: String = (1..=8).map(|n| format!("<p>{}</p>", "x".repeat(n))).collect();
        let result = BlockRankingPlan.run(&Page::new(html, "https://example.com")).unwrap();

        assert_eq!(result.content.lines().count(), 5);
        assert!(result.content.starts_with("<p>xxxxxxxx</p>"));
        assert_eq!(result.message.as_deref(), Some("Extracted 8 content blocks"));
    }

    #[test]
    fn test_title_and_byline_sources() {
        let html = r#"<html><head><title>Head Title</title>
            <meta content="Lead Writer" property='article:author'>
            <meta property="og:title" content="OG Title"></head>
            <body><h1>Heading</h1><p>Body</p></body></html>"#;
        let result = BlockRankingPlan.run(&Page::new(html, "https://example.com")).unwrap();
        assert_eq!(result.title, "OG Title");
        assert_eq!(result.byline, "Lead Writer");

        let html = r#"<h1>Only Heading</h1><span class="byline">By Someone</span><p>Body</p>"#;
        let result = BlockRankingPlan.run(&Page::new(html, "https://example.com")).unwrap();
        assert_eq!(result.title, "Only Heading");
        assert_eq!(result.byline, "By Someone");
    }

    #[test]
    fn test_no_blocks_is_an_error() {
        let result = BlockRankingPlan.run(&Page::new("<span>nothing here</span>", "https://example.com"));
        assert!(matches!(result, Err(GleanError::NoContent)));
    }
}
