//! Per-element content scoring.

use crate::parse::Element;
use crate::patterns::{ANCHOR, NEGATIVE_CLASS, POSITIVE_CLASS};

/// Configuration for content scoring algorithm
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Maximum content density score from character count
    pub max_char_density_score: f64,
    /// Maximum content density score from comma count
    pub max_comma_density_score: f64,
    /// Characters per point for content density scoring
    pub chars_per_point: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            positive_weight: 25.0,
            negative_weight: -25.0,
            max_char_density_score: 3.0,
            max_comma_density_score: 3.0,
            chars_per_point: 100,
        }
    }
}

/// Breakdown of an element's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub base_score: f64,
    pub class_weight: f64,
    pub content_density: f64,
    /// Link density (0.0 to 1.0)
    pub link_density: f64,
    pub final_score: f64,
}

/// Calculate the base score for an element based on its tag name
///
/// Scores are assigned based on how likely a tag is to contain main content:
/// - ARTICLE: +10 (primary content container)
/// - SECTION: +8 (content section)
/// - DIV: +5 (generic container)
/// - TD, BLOCKQUOTE: +3 (content elements)
/// - FORM, ADDRESS, lists: -3
/// - H1-H6, TH, HEADER, FOOTER, NAV: -5
pub fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "section" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Calculate the class/ID weight adjustment for an element
///
/// The id is checked before the classes. Positive patterns win over
/// negative ones within the same attribute value.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let names = element
        .attr("id")
        .into_iter()
        .chain(element.attr("class").into_iter().flat_map(str::split_whitespace));

    for name in names {
        if POSITIVE_CLASS.is_match(name) {
            return config.positive_weight;
        }
        if NEGATIVE_CLASS.is_match(name) {
            return config.negative_weight;
        }
    }

    0.0
}

/// Calculate content density score based on text length and comma count
pub fn content_density_score(text: &str, config: &ScoreConfig) -> f64 {
    let char_score = ((text.chars().count() / config.chars_per_point) as f64).min(config.max_char_density_score);
    let comma_score = (text.matches(',').count() as f64).min(config.max_comma_density_score);

    char_score + comma_score
}

/// Ratio of link text characters to total text characters (0.0 to 1.0).
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.text().chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let link_text_length: usize = element
        .select_with(&ANCHOR)
        .map(|link| link.text().chars().count())
        .sum();

    link_text_length as f64 / text_length as f64
}

/// `<pre>` blocks dense in symbols and short on prose are treated as code.
fn looks_like_code(text: &str) -> bool {
    let len = text.len() as f64;
    let commas = text.matches(',').count() as f64 / len;
    let spaces = text.matches(' ').count() as f64 / len;
    let special = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count() as f64
        / len;

    special > 0.15 && commas < 0.01 && spaces < 0.15
}

/// Calculate the final score for an element
///
/// `(base + class weight + density + code penalty) * link penalty`. The
/// link penalty is halved for elements with a positive class/id or more than
/// 500 characters of text.
pub fn calculate_score(element: &Element<'_>, config: &ScoreConfig) -> ScoreResult {
    let text = element.text();
    let text_length = text.chars().count();

    let base_score = base_tag_score(element);
    let class_weight = class_id_weight(element, config);
    let content_density = content_density_score(&text, config);
    let ld = link_density(element);

    let is_code = element.tag_name() == "pre" && text.len() > 50 && looks_like_code(&text);
    let code_penalty = if is_code { -10.0 } else { 0.0 };

    let lenient = class_weight > 0.0 || text_length > 500;
    let link_penalty = if lenient { 1.0 - (ld * 0.5) } else { 1.0 - ld };

    let final_score = (base_score + class_weight + content_density + code_penalty) * link_penalty;

    ScoreResult { base_score, class_weight, content_density, link_density: ld, final_score }
}
