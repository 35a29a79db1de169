pub mod error;
pub mod extractor;
pub mod fetch;
pub mod json_ld;
pub mod parse;
pub mod patterns;
pub mod plans;
pub mod readability;
pub mod resolver;
pub mod result;
pub mod text;

pub use error::{GleanError, Result};
pub use extractor::{Extractor, ExtractorConfig, ExtractorConfigBuilder, extract};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{AllowList, FetchConfig, HtmlSource, fetch_file, fetch_stdin, validate_url};
pub use parse::{Document, Element};
pub use plans::{BlockRankingPlan, FallbackPlan, Page, ReadabilityPlan, SelectorPlan, Strategy};
pub use readability::{Article, Readability, ReadabilityConfig, ReadabilityConfigBuilder};
pub use resolver::{MetadataResult, MetadataSource, resolve_metadata};
pub use result::{ExtractionResult, Plan};
#[doc(hidden)]
pub use readability::postprocess::{PostProcessConfig, postprocess_html};
#[doc(hidden)]
pub use readability::preprocess::{PreprocessConfig, preprocess_html};
#[doc(hidden)]
pub use readability::scoring::{ScoreConfig, ScoreResult, calculate_score, link_density};
