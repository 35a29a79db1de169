//! Error types for Gleaner operations.
//!
//! This module defines the main error type [`GleanError`] which represents
//! every failure that can occur while fetching pages, parsing HTML, or
//! running a single extraction plan.
//!
//! Note that the orchestrator never surfaces these to its callers: a failed
//! plan is logged and the cascade moves on. They are visible when a plan or
//! the fetch layer is used directly.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::{GleanError, Result};
//!
//! fn first_paragraph(html: &str) -> Result<String> {
//!     if html.is_empty() {
//!         return Err(GleanError::NoContent);
//!     }
//!     # Ok(String::new())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::result::Plan;

/// Main error type for fetching and extraction operations.
#[derive(Error, Debug)]
pub enum GleanError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, TLS problems and other
    /// transport-level failures.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or uses a scheme other than
    /// `http` or `https`.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL's host is not on the configured allow-list.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// The upstream server answered with a non-success status.
    #[error("Upstream responded with status {status}")]
    UpstreamStatus { status: u16 },

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Content is not readable (score below threshold).
    ///
    /// Raised by the scoring engine when no candidate reaches the minimum
    /// readability score. Navigation hubs and search pages usually end here.
    #[error("Content is not readable (score {score} below threshold {threshold})")]
    NotReadable { score: f64, threshold: f64 },

    /// No content could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// A plan did not finish inside its time budget.
    #[error("{plan} plan timed out after {millis}ms")]
    PlanTimedOut { plan: Plan, millis: u128 },

    /// A plan's worker was cancelled or panicked.
    #[error("{plan} plan aborted: {reason}")]
    PlanAborted { plan: Plan, reason: String },

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for GleanError.
pub type Result<T> = std::result::Result<T, GleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GleanError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_not_readable_error() {
        let err = GleanError::NotReadable { score: 15.0, threshold: 20.0 };
        assert!(err.to_string().contains("15"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_plan_timed_out_names_plan() {
        let err = GleanError::PlanTimedOut { plan: Plan::Readability, millis: 250 };
        let message = err.to_string();
        assert!(message.contains("readability"));
        assert!(message.contains("250ms"));
    }

    #[test]
    fn test_upstream_status_error() {
        let err = GleanError::UpstreamStatus { status: 404 };
        assert!(err.to_string().contains("404"));
    }
}
