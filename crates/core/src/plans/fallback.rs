//! Plan D: whatever the body holds once the page chrome is gone.

use super::{Page, Strategy};
use crate::parse::Document;
use crate::patterns::{FALLBACK_NOISE, H1, SCRIPT_BLOCK, STYLE_BLOCK, TITLE};
use crate::result::{ExtractionResult, Plan};
use crate::text::{site_name_from_url, title_from_url};
use crate::{GleanError, Result};

/// The last resort. Accepted at any length.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPlan;

impl Strategy for FallbackPlan {
    fn plan(&self) -> Plan {
        Plan::Fallback
    }

    fn run(&self, page: &Page) -> Result<ExtractionResult> {
        let html = SCRIPT_BLOCK.replace_all(&page.html, "");
        let html = STYLE_BLOCK.replace_all(&html, "");

        let doc = Document::parse(&html).without(&FALLBACK_NOISE);
        let body = doc.body().ok_or(GleanError::NoContent)?;

        let title = doc
            .first_text(&TITLE)
            .or_else(|| doc.first_text(&H1))
            .unwrap_or_else(|| title_from_url(&page.url));

        Ok(ExtractionResult::from_text(Plan::Fallback, body.inner_html(), body.trimmed_text())
            .with_title(title)
            .with_site_name(site_name_from_url(&page.url))
            .with_message("Using fallback extraction after all other plans failed"))
    }
}
