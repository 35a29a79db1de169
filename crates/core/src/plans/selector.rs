//! Plan B: known content containers.

use super::{Page, Strategy};
use crate::parse::{Document, Element};
use crate::patterns::{BODY, CONTAINER_NOISE, CONTENT_CONTAINERS, EMPTY_LEAF_BLOCKS, PAGE_TITLE_SOURCES};
use crate::result::{ExtractionResult, Plan};
use crate::text::{site_name_from_url, title_from_url};
use crate::{GleanError, Result};

/// Takes the first element matching a well-known container selector, or the
/// body when none match.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorPlan;

impl Strategy for SelectorPlan {
    fn plan(&self) -> Plan {
        Plan::Dom
    }

    fn run(&self, page: &Page) -> Result<ExtractionResult> {
        let doc = Document::parse(&page.html);
        let cleaned = doc.without(&CONTAINER_NOISE).without_empty(&EMPTY_LEAF_BLOCKS, 1);

        let (source, container) = find_container(&cleaned).ok_or(GleanError::NoContent)?;
        let text_content = container.trimmed_text();
        let content = container.inner_html();

        Ok(ExtractionResult::from_text(Plan::Dom, content, text_content)
            .with_title(page_title(&doc).unwrap_or_else(|| title_from_url(&page.url)))
            .with_site_name(site_name_from_url(&page.url))
            .with_message(format!("Extracted from {source} element")))
    }
}

fn find_container(doc: &Document) -> Option<(&'static str, Element<'_>)> {
    CONTENT_CONTAINERS
        .iter()
        .find_map(|(css, selector)| doc.first(selector).map(|el| (*css, el)))
        .or_else(|| doc.first(&BODY).map(|el| ("body", el)))
}

fn page_title(doc: &Document) -> Option<String> {
    PAGE_TITLE_SOURCES
        .iter()
        .find_map(|selector| doc.first_text(selector))
        .or_else(|| doc.meta_content("og:title"))
        .or_else(|| doc.meta_content("twitter:title"))
}
