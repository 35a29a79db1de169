//! Plan A: readability scoring.

use super::{Page, Strategy};
use crate::Result;
use crate::readability::{Readability, ReadabilityConfig};
use crate::result::{ExtractionResult, Plan};
use crate::text::{site_name_from_url, title_from_url};

/// Runs the readability engine and fills gaps from the URL.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityPlan {
    reader: Readability,
}

impl ReadabilityPlan {
    pub fn new(config: ReadabilityConfig) -> Self {
        Self { reader: Readability::with_config(config) }
    }
}

impl Strategy for ReadabilityPlan {
    fn plan(&self) -> Plan {
        Plan::Readability
    }

    fn run(&self, page: &Page) -> Result<ExtractionResult> {
        let article = self.reader.parse_with_url(&page.html, &page.url)?;

        let mut result = ExtractionResult::from_text(Plan::Readability, article.content, article.text_content)
            .with_title(article.title.unwrap_or_else(|| title_from_url(&page.url)))
            .with_byline(article.byline.unwrap_or_default())
            .with_site_name(article.site_name.unwrap_or_else(|| site_name_from_url(&page.url)));

        if let Some(excerpt) = article.excerpt {
            result = result.with_excerpt(&excerpt);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_article() -> String {
        let paragraph = "<p>Readable prose with commas, clauses, and enough words to carry a real article body.</p>";
        format!(
            r#"<html><head><meta property="og:description" content="Short summary."></head>
            <body><article class="post">{}</article></body></html>"#,
            paragraph.repeat(12)
        )
    }

    #[test]
    fn test_falls_back_to_url_title_and_site() {
        let page = Page::new(long_article(), "https://www.example.com/news/big-day.html");
        let result = ReadabilityPlan::default().run(&page).unwrap();

        assert_eq!(result.plan, Plan::Readability);
        assert_eq!(result.title, "big day");
        assert_eq!(result.site_name, "example.com");
        assert_eq!(result.byline, "");
        assert_eq!(result.excerpt, "Short summary.");
        assert_eq!(result.confidence, Plan::Readability.confidence_for(result.length));
    }

    #[test]
    fn test_unreadable_page_is_an_error() {
        let page = Page::new("<html><body><nav>menu</nav></body></html>", "https://example.com");
        assert!(ReadabilityPlan::default().run(&page).is_err());
    }
}
