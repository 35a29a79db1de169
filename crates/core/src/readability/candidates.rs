//! Candidate selection for the readability plan.
//!
//! Every block-level element with enough text is scored, scores flow up to
//! the parent and grandparent, and the best-scoring node plus its qualifying
//! siblings become the article.

use std::cmp::Ordering;

use super::postprocess::{PostProcessConfig, postprocess_html};
use super::scoring::{ScoreConfig, ScoreResult, calculate_score, link_density};
use crate::parse::{Document, Element};
use crate::patterns::{CANDIDATE_BLOCKS, HEADER};
use crate::{GleanError, Result};

/// Cap on scored elements used when `max_elements` is zero.
const DEFAULT_MAX_ELEMENTS: usize = 1000;

/// Tags that are considered potential content containers
const CANDIDATE_TAGS: &[&str] = &["div", "article", "section", "main", "p", "td", "pre", "blockquote"];

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum score threshold for top candidate
    pub min_score_threshold: f64,
    /// Maximum number of top candidates to track
    pub max_top_candidates: usize,
    /// Minimum character threshold for content
    pub char_threshold: usize,
    /// Maximum elements to score (0 = the default cap of 1000)
    pub max_elements: usize,
    /// Sibling score threshold (multiplier of top score)
    pub sibling_threshold: f64,
    pub score: ScoreConfig,
    pub postprocess: PostProcessConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_score_threshold: 20.0,
            max_top_candidates: 5,
            char_threshold: 500,
            max_elements: 0,
            sibling_threshold: 0.2,
            score: ScoreConfig::default(),
            postprocess: PostProcessConfig::default(),
        }
    }
}

/// A candidate element with its score
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub element: Element<'a>,
    pub score_result: ScoreResult,
}

impl<'a> Candidate<'a> {
    fn new(element: Element<'a>, score_result: ScoreResult) -> Self {
        Self { element, score_result }
    }

    fn score(&self) -> f64 {
        self.score_result.final_score
    }
}

/// The result of content extraction
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Cleaned HTML of the top candidate and its siblings
    pub content: String,
    pub top_score: f64,
    /// Number of elements joined into `content`
    pub element_count: usize,
}

/// Identify all candidate elements from the document
///
/// Elements are visited in document order. Only those long enough to be
/// scored count against the cap, so a page full of tiny wrappers cannot
/// exhaust it before the article is reached.
fn identify_candidates<'a>(doc: &'a Document, config: &ExtractConfig) -> Vec<Candidate<'a>> {
    let max_elements = if config.max_elements == 0 { DEFAULT_MAX_ELEMENTS } else { config.max_elements };
    let min_chars = config.char_threshold / 10;

    doc.select_with(&CANDIDATE_BLOCKS)
        .filter(|element| is_container(element) || element.text().chars().count() >= min_chars)
        .take(max_elements)
        .map(|element| {
            let score_result = calculate_score(&element, &config.score);
            Candidate::new(element, score_result)
        })
        .collect()
}

/// Propagate scores from candidates to their ancestors
///
/// Parents gain `score / 2` and grandparents `score / 3`. Ancestors that are
/// candidate tags but were not scored yet join the list with their own score
/// plus the boost. Boosts accumulate across children and are computed from
/// the scores as they were before propagation.
fn propagate_scores<'a>(candidates: &mut Vec<Candidate<'a>>, config: &ExtractConfig) {
    let originals: Vec<(Element<'a>, f64)> = candidates.iter().map(|c| (c.element, c.score())).collect();

    for (element, score) in originals {
        let parent = element.parent();
        let grandparent = parent.and_then(|p| p.parent());

        for (ancestor, divisor) in [(parent, 2.0), (grandparent, 3.0)] {
            let Some(ancestor) = ancestor else { break };
            if !CANDIDATE_TAGS.contains(&ancestor.tag_name().as_str()) {
                continue;
            }

            let boost = score / divisor;
            match candidates.iter().position(|c| c.element.same_node(&ancestor)) {
                Some(index) => candidates[index].score_result.final_score += boost,
                None => {
                    let mut score_result = calculate_score(&ancestor, &config.score);
                    score_result.final_score += boost;
                    candidates.push(Candidate::new(ancestor, score_result));
                }
            }
        }
    }
}

/// The highest scoring candidate, if it reaches the minimum score.
fn select_top_candidate<'c, 'a>(
    candidates: &'c [Candidate<'a>], config: &ExtractConfig,
) -> Result<&'c Candidate<'a>> {
    let top = candidates.first().ok_or(GleanError::NoContent)?;

    if top.score() < config.min_score_threshold {
        return Err(GleanError::NotReadable { score: top.score(), threshold: config.min_score_threshold });
    }

    Ok(top)
}

/// Select siblings that should be included with the top candidate
///
/// Siblings are included if:
/// - They share the same parent
/// - Their score is >= top_score * sibling_threshold
/// - For P tags: link_density < 0.25 and text_length > 80 chars
///
/// `<header>` elements next to the top candidate come along when they hold
/// at least ten characters of text.
fn select_siblings<'a>(
    doc: &'a Document, top: &Candidate<'a>, candidates: &[Candidate<'a>], config: &ExtractConfig,
) -> Vec<Element<'a>> {
    let min_score = top.score() * config.sibling_threshold;
    let mut siblings: Vec<Element<'a>> = candidates
        .iter()
        .filter(|c| !c.element.same_node(&top.element))
        .filter(|c| c.element.is_sibling_of(&top.element))
        .filter(|c| c.score() >= min_score)
        .filter(|c| {
            c.element.tag_name() != "p"
                || (c.element.text().chars().count() > 80 && link_density(&c.element) < 0.25)
        })
        .map(|c| c.element)
        .collect();

    for header in doc.select_with(&HEADER) {
        if header.same_node(&top.element) || !header.is_sibling_of(&top.element) {
            continue;
        }
        if header.trimmed_text().chars().count() < 10 {
            continue;
        }
        if !siblings.iter().any(|s| s.same_node(&header)) {
            siblings.push(header);
        }
    }

    siblings
}

/// Extract the main content from a document
///
/// 1. Identifies candidate elements
/// 2. Propagates scores to ancestors
/// 3. Selects the top candidate
/// 4. Includes relevant siblings
/// 5. Post-processes the joined HTML
pub fn extract_content(doc: &Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    let mut candidates = identify_candidates(doc, config);
    propagate_scores(&mut candidates, config);

    candidates.sort_by(|a, b| compare_candidates(b, a));
    candidates.truncate(config.max_top_candidates.max(1));

    let top = select_top_candidate(&candidates, config)?;
    let siblings = select_siblings(doc, top, &candidates, config);

    let mut content = top.element.outer_html();
    for sibling in &siblings {
        content.push('\n');
        content.push_str(&sibling.outer_html());
    }

    let content = postprocess_html(&content, &config.postprocess);
    if content.trim().is_empty() {
        return Err(GleanError::NoContent);
    }

    Ok(ExtractedContent { content, top_score: top.score(), element_count: 1 + siblings.len() })
}

fn is_container(element: &Element<'_>) -> bool {
    matches!(element.tag_name().as_str(), "article" | "section" | "main")
}

/// Score first, then the more semantic tag, then the longer text.
fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    a.score()
        .partial_cmp(&b.score())
        .unwrap_or(Ordering::Equal)
        .then_with(|| candidate_priority(&a.element).cmp(&candidate_priority(&b.element)))
        .then_with(|| a.element.text().chars().count().cmp(&b.element.text().chars().count()))
}

fn candidate_priority(element: &Element<'_>) -> u8 {
    match element.tag_name().as_str() {
        "article" | "main" | "section" => 3,
        "div" => 2,
        _ => 1,
    }
}
