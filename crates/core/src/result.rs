//! The uniform output record every extraction plan produces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::{build_excerpt, site_name_from_url, title_from_url};

/// Message carried by the result returned when the whole cascade fails.
pub const ALL_PLANS_FAILED: &str = "All extraction plans failed";

/// Identifies which strategy produced an [`ExtractionResult`].
///
/// Plans run in declaration order; each later plan is cheaper and less
/// trustworthy than the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Plan A: readability-style scoring.
    Readability,
    /// Plan B: known content-container selectors.
    Dom,
    /// Plan C: raw markup scanning with regular expressions.
    Regex,
    /// Plan D: whatever text the body holds once chrome is removed.
    Fallback,
}

impl Plan {
    /// Cascade order.
    pub const ALL: [Plan; 4] = [Plan::Readability, Plan::Dom, Plan::Regex, Plan::Fallback];

    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Readability => "readability",
            Plan::Dom => "dom",
            Plan::Regex => "regex",
            Plan::Fallback => "fallback",
        }
    }

    /// Text length a successful result must strictly exceed to be accepted.
    ///
    /// `None` means the plan is accepted whenever it reports success.
    pub fn acceptance_threshold(self) -> Option<usize> {
        match self {
            Plan::Readability => Some(500),
            Plan::Dom => Some(300),
            Plan::Regex => Some(200),
            Plan::Fallback => None,
        }
    }

    /// Whether the orchestrator should stop at `result`.
    pub fn accepts(self, result: &ExtractionResult) -> bool {
        result.success && self.acceptance_threshold().is_none_or(|min| result.length > min)
    }

    /// Confidence this plan assigns to text of `length` characters.
    ///
    /// Longer text earns more trust, but a later plan never outranks an
    /// earlier one at the same length.
    pub fn confidence_for(self, length: usize) -> u8 {
        let (long, medium, short) = match self {
            Plan::Readability => (95, 85, 70),
            Plan::Dom => (75, 65, 50),
            Plan::Regex => (70, 60, 45),
            Plan::Fallback => (40, 40, 20),
        };

        if length > 1000 {
            long
        } else if length > 500 {
            medium
        } else {
            short
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized output of one extraction plan.
///
/// `length` is always the character count of `text_content`, and
/// `confidence` always comes from [`Plan::confidence_for`]; the
/// constructors keep both in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub success: bool,
    pub title: String,
    /// HTML of the main content.
    pub content: String,
    /// Plain text of the main content.
    pub text_content: String,
    /// Summary, at most 203 characters.
    pub excerpt: String,
    pub byline: String,
    pub site_name: String,
    pub length: usize,
    pub plan: Plan,
    pub confidence: u8,
    /// Diagnostic note for logs; not meant for end users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExtractionResult {
    /// A successful result for `plan` holding `text_content`.
    ///
    /// The excerpt defaults to the head of the text; title, byline and site
    /// name start empty and are filled in with the `with_*` methods.
    pub fn from_text(plan: Plan, content: String, text_content: String) -> Self {
        let length = text_content.chars().count();
        Self {
            success: true,
            title: String::new(),
            excerpt: build_excerpt(&text_content),
            content,
            text_content,
            byline: String::new(),
            site_name: String::new(),
            length,
            plan,
            confidence: plan.confidence_for(length),
            message: None,
        }
    }

    /// The record returned when no plan could produce anything.
    pub fn failure(url: &str) -> Self {
        Self {
            success: false,
            title: title_from_url(url),
            content: String::new(),
            text_content: String::new(),
            excerpt: String::new(),
            byline: String::new(),
            site_name: site_name_from_url(url),
            length: 0,
            plan: Plan::Fallback,
            confidence: 0,
            message: Some(ALL_PLANS_FAILED.to_string()),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_byline(mut self, byline: impl Into<String>) -> Self {
        self.byline = byline.into();
        self
    }

    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Replaces the default excerpt. Longer values are cut like any excerpt.
    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = build_excerpt(excerpt);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
