//! The extraction cascade.
//!
//! [`Extractor::extract`] runs the configured strategies in order and returns
//! the first result its plan accepts. It never fails: a plan that errors,
//! panics or runs out of time is logged and skipped, and when even the
//! fallback produces nothing the caller gets [`ExtractionResult::failure`].
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::{Extractor, Plan};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let html = "<html><body><nav>menu</nav><p>Just a line.</p></body></html>";
//! let result = Extractor::new().extract(html, "https://example.com/post").await;
//!
//! assert!(result.success);
//! assert_eq!(result.plan, Plan::Fallback);
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::task;
use tokio::time::{Instant, timeout};
use tracing::{debug, error, info, warn};

use crate::plans::{Page, Strategy, default_strategies};
use crate::readability::ReadabilityConfig;
use crate::result::{ExtractionResult, Plan};
use crate::{GleanError, Result};

/// Configuration for the extraction cascade.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use gleaner_core::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .readability_timeout(Duration::from_secs(10))
///     .deadline(Duration::from_secs(20))
///     .build();
/// assert_eq!(config.deadline, Duration::from_secs(20));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Budget for the readability plan (default: 30s).
    pub readability_timeout: Duration,
    /// Budget for the whole cascade (default: 45s). Once spent, only the
    /// fallback plan still runs.
    pub deadline: Duration,
    pub readability: ReadabilityConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            readability_timeout: Duration::from_secs(30),
            deadline: Duration::from_secs(45),
            readability: ReadabilityConfig::default(),
        }
    }
}

impl ExtractorConfig {
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }
}

/// Builder for [`ExtractorConfig`].
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Sets the readability plan's time budget.
    pub fn readability_timeout(mut self, value: Duration) -> Self {
        self.config.readability_timeout = value;
        self
    }

    /// Sets the deadline for the whole cascade.
    pub fn deadline(mut self, value: Duration) -> Self {
        self.config.deadline = value;
        self
    }

    /// Sets the readability engine configuration.
    pub fn readability(mut self, value: ReadabilityConfig) -> Self {
        self.config.readability = value;
        self
    }

    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl Default for ExtractorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs extraction strategies in order until one is accepted.
#[derive(Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    strategies: Vec<Arc<dyn Strategy>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// An extractor with the default configuration and plans A to D.
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        let strategies = default_strategies(&config);
        Self { config, strategies }
    }

    /// An extractor running `strategies` in the given order.
    pub fn with_strategies(config: ExtractorConfig, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        Self { config, strategies }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts the main content of `html`, fetched from `url`.
    pub async fn extract(&self, html: &str, url: &str) -> ExtractionResult {
        let page = Arc::new(Page::new(html, url));
        let started = Instant::now();
        info!(url, bytes = html.len(), "starting extraction");

        for strategy in &self.strategies {
            let plan = strategy.plan();
            let remaining = self.config.deadline.saturating_sub(started.elapsed());

            if plan != Plan::Fallback && remaining.is_zero() {
                debug!(%plan, "deadline passed, skipping plan");
                continue;
            }

            let budget = match plan {
                Plan::Readability => Some(self.config.readability_timeout.min(remaining)),
                Plan::Dom | Plan::Regex => Some(remaining),
                Plan::Fallback => None,
            };

            match run_plan(Arc::clone(strategy), Arc::clone(&page), budget).await {
                Ok(result) if plan.accepts(&result) => {
                    info!(%plan, length = result.length, confidence = result.confidence, "plan accepted");
                    return result;
                }
                Ok(result) => {
                    let threshold = plan.acceptance_threshold();
                    debug!(%plan, length = result.length, ?threshold, "plan below threshold");
                }
                Err(err) => {
                    warn!(%plan, error = %err, "plan failed");
                }
            }
        }

        error!(url, "all extraction plans failed");
        ExtractionResult::failure(url)
    }
}

/// Runs one strategy on a blocking worker, optionally under a time limit.
///
/// On timeout the worker is left to finish on its own and its output is
/// dropped.
async fn run_plan(
    strategy: Arc<dyn Strategy>, page: Arc<Page>, budget: Option<Duration>,
) -> Result<ExtractionResult> {
    let plan = strategy.plan();
    let worker = task::spawn_blocking(move || strategy.run(&page));

    let joined = match budget {
        Some(limit) => timeout(limit, worker)
            .await
            .map_err(|_| GleanError::PlanTimedOut { plan, millis: limit.as_millis() })?,
        None => worker.await,
    };

    joined.map_err(|e| GleanError::PlanAborted { plan, reason: e.to_string() })?
}

/// Extracts content with the default plans and a readability budget of
/// `timeout`.
pub async fn extract(html: &str, url: &str, timeout: Duration) -> ExtractionResult {
    let config = ExtractorConfig::builder().readability_timeout(timeout).build();
    Extractor::with_config(config).extract(html, url).await
}
