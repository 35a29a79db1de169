//! The four extraction plans.
//!
//! Each plan turns a page into an [`ExtractionResult`] on its own terms and
//! may fail. The [`Extractor`](crate::Extractor) runs them in the order
//! returned by [`default_strategies`] and keeps the first result that clears
//! the plan's acceptance threshold.

mod blocks;
mod fallback;
mod readability;
mod selector;

use std::sync::Arc;

pub use blocks::BlockRankingPlan;
pub use fallback::FallbackPlan;
pub use readability::ReadabilityPlan;
pub use selector::SelectorPlan;

use crate::Result;
use crate::extractor::ExtractorConfig;
use crate::result::{ExtractionResult, Plan};

/// The input every plan sees.
#[derive(Debug, Clone)]
pub struct Page {
    pub html: String,
    /// Source URL, used for link resolution and URL-derived fallbacks.
    pub url: String,
}

impl Page {
    pub fn new(html: impl Into<String>, url: impl Into<String>) -> Self {
        Self { html: html.into(), url: url.into() }
    }
}

/// One step of the extraction cascade.
///
/// Implementations are synchronous; the orchestrator moves them onto
/// blocking workers and applies the time budget.
pub trait Strategy: Send + Sync {
    /// Which plan this strategy reports as.
    fn plan(&self) -> Plan;

    /// Runs the plan over `page`.
    fn run(&self, page: &Page) -> Result<ExtractionResult>;
}

/// Plans A to D in cascade order.
pub fn default_strategies(config: &ExtractorConfig) -> Vec<Arc<dyn Strategy>> {
    vec![
        Arc::new(ReadabilityPlan::new(config.readability.clone())),
        Arc::new(SelectorPlan),
        Arc::new(BlockRankingPlan),
        Arc::new(FallbackPlan),
    ]
}
