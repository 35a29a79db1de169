//! HTML parsing and DOM manipulation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors.
//!
//! Documents are never mutated in place. Every cleaning operation returns a
//! fresh copy, so a plan can strip noise from its own working copy while the
//! caller's document stays untouched.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::patterns;
use crate::readability::preprocess::{PreprocessConfig, preprocess_html};
use crate::{GleanError, Result};

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use gleaner_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html);
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
#[derive(Clone)]
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses a full HTML document without preprocessing.
    ///
    /// html5ever recovers from any malformed input, so parsing never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html), base_url: None }
    }

    /// Parses an HTML fragment such as the output of a plan.
    pub fn parse_fragment(html: &str) -> Self {
        Self { html: Html::parse_fragment(html), base_url: None }
    }

    /// Parses HTML after running the readability preprocessor over it.
    ///
    /// # Arguments
    ///
    /// * `html` - The HTML content to parse
    /// * `base_url` - Optional base URL for resolving relative links
    pub fn parse_with_preprocessing(html: &str, base_url: Option<Url>) -> Self {
        let config = PreprocessConfig { base_url: base_url.clone(), ..Default::default() };
        let cleaned = preprocess_html(html, &config);

        Self { html: Html::parse_document(&cleaned), base_url }
    }

    /// Gets the base URL used for preprocessing.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Gets the entire HTML as a string.
    pub fn as_string(&self) -> String {
        self.html.html()
    }

    /// Selects elements using a CSS selector string.
    ///
    /// # Errors
    ///
    /// Returns [`GleanError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gleaner_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::from).collect())
    }

    /// Selects elements with an already compiled selector.
    pub fn select_with<'a, 's>(&'a self, selector: &'s Selector) -> impl Iterator<Item = Element<'a>> + 's
    where
        'a: 's,
    {
        self.html.select(selector).map(Element::from)
    }

    /// First element matching the selector, if any.
    pub fn first(&'_ self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(Element::from)
    }

    /// Trimmed text of the first match whose text is not blank.
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.html.select(selector).find_map(|el| {
            let text = Element::from(el).trimmed_text();
            (!text.is_empty()).then_some(text)
        })
    }

    /// The `<body>` element, if the parser produced one.
    pub fn body(&'_ self) -> Option<Element<'_>> {
        self.first(&patterns::BODY)
    }

    /// Gets the title of the document.
    ///
    /// Returns the trimmed content of the `<title>` element if present and not blank.
    pub fn title(&self) -> Option<String> {
        self.first_text(&patterns::TITLE)
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }

    /// Get meta tag content by `name` or `property` attribute.
    ///
    /// Blank `content` attributes are treated as missing.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        ["name", "property"].iter().find_map(|attr| {
            let sel = Selector::parse(&format!("meta[{attr}=\"{key}\"]")).ok()?;
            self.html.select(&sel).find_map(|el| {
                let content = el.value().attr("content")?.trim();
                (!content.is_empty()).then(|| content.to_string())
            })
        })
    }

    /// Copy of the document with every element matching `selector` detached.
    pub fn without(&self, selector: &Selector) -> Document {
        self.without_matching(selector, |_| true)
    }

    /// Copy of the document with the matching elements that satisfy
    /// `predicate` detached. The predicate sees elements of this document.
    pub fn without_matching<F>(&self, selector: &Selector, predicate: F) -> Document
    where
        F: Fn(&Element<'_>) -> bool,
    {
        let doomed: Vec<_> = self
            .html
            .select(selector)
            .filter(|el| predicate(&Element::from(*el)))
            .map(|el| el.id())
            .collect();

        let mut html = self.html.clone();
        for id in doomed {
            if let Some(mut node) = html.tree.get_mut(id) {
                node.detach();
            }
        }

        Document { html, base_url: self.base_url.clone() }
    }

    /// Copy of the document with empty elements matching `selector` removed.
    ///
    /// An element is empty when it has no element children and only
    /// whitespace text. Removing a leaf can empty its parent, so this runs up
    /// to `max_passes` sweeps and stops early once a sweep removes nothing.
    pub fn without_empty(&self, selector: &Selector, max_passes: usize) -> Document {
        self.sweep_empty(selector, max_passes, false)
    }

    /// Like [`Document::without_empty`], but elements holding nothing except
    /// `<br>` tags also count as empty.
    pub fn without_blank(&self, selector: &Selector, max_passes: usize) -> Document {
        self.sweep_empty(selector, max_passes, true)
    }

    fn sweep_empty(&self, selector: &Selector, max_passes: usize, allow_breaks: bool) -> Document {
        let mut html = self.html.clone();

        for _ in 0..max_passes {
            let doomed: Vec<_> = html
                .select(selector)
                .filter(|el| is_empty_element(el, allow_breaks))
                .map(|el| el.id())
                .collect();
            if doomed.is_empty() {
                break;
            }
            for id in doomed {
                if let Some(mut node) = html.tree.get_mut(id) {
                    node.detach();
                }
            }
        }

        Document { html, base_url: self.base_url.clone() }
    }

    /// Serialized children of the fragment root (or `<html>` for documents).
    pub fn inner_html(&self) -> String {
        self.html.root_element().inner_html()
    }
}

/// A wrapper around scraper's ElementRef for easier DOM navigation.
///
/// # Example
///
/// ```rust
/// use gleaner_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Element<'a> {
    /// Gets the inner HTML of this element.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the outer HTML of this element.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Text content with leading and trailing whitespace removed.
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector string.
    ///
    /// # Errors
    ///
    /// Returns [`GleanError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::from).collect())
    }

    /// Selects descendants with an already compiled selector.
    pub fn select_with<'s>(self, selector: &'s Selector) -> impl Iterator<Item = Element<'a>> + 's
    where
        'a: 's,
    {
        self.element.select(selector).map(Element::from)
    }

    /// The nearest ancestor that is an element.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::from)
    }

    /// Whether both wrappers point at the same node of the same tree.
    pub fn same_node(&self, other: &Element<'_>) -> bool {
        self.element.id() == other.element.id()
    }

    /// Whether the element shares its parent with `other`.
    pub fn is_sibling_of(&self, other: &Element<'_>) -> bool {
        match (self.parent(), other.parent()) {
            (Some(mine), Some(theirs)) => mine.same_node(&theirs),
            _ => false,
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| GleanError::HtmlParseError(format!("Invalid selector: {}", e)))
}

fn is_empty_element(element: &ElementRef<'_>, allow_breaks: bool) -> bool {
    let no_text = element.text().all(|text| text.trim().is_empty());
    let no_children = element.children().all(|child| match child.value() {
        Node::Element(el) => allow_breaks && el.name() == "br",
        _ => true,
    });

    no_text && no_children
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta property="og:title" content="  Shared Title ">
            <meta name="description" content="">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <div id="wrap">
                <p class="content">Paragraph 1</p>
                <p class="content">Paragraph 2</p>
            </div>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(GleanError::HtmlParseError(_))));
    }

    #[test]
    fn test_meta_content_trims_and_skips_blank() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.meta_content("og:title"), Some("Shared Title".to_string()));
        assert_eq!(doc.meta_content("description"), None);
    }

    #[test]
    fn test_without_leaves_original_untouched() {
        let doc = Document::parse(SAMPLE_HTML);
        let sel = Selector::parse("p").unwrap();
        let stripped = doc.without(&sel);

        assert_eq!(doc.select("p").unwrap().len(), 2);
        assert!(stripped.select("p").unwrap().is_empty());
        assert!(stripped.text_content().contains("Heading"));
    }

    #[test]
    fn test_without_matching_uses_predicate() {
        let doc = Document::parse(SAMPLE_HTML);
        let sel = Selector::parse("p").unwrap();
        let stripped = doc.without_matching(&sel, |el| el.text().ends_with('2'));

        let remaining = stripped.select("p").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text(), "Paragraph 1");
    }

    #[test]
    fn test_without_blank_cascades_to_parents() {
        let doc = Document::parse_fragment("<div><div><span> </span><br></div></div><p>kept</p>");
        let sel = Selector::parse("div, span, p").unwrap();
        let cleaned = doc.without_blank(&sel, 10);

        assert!(cleaned.select("div").unwrap().is_empty());
        assert_eq!(cleaned.select("p").unwrap().len(), 1);
    }

    #[test]
    fn test_without_empty_keeps_elements_with_children() {
        let doc = Document::parse_fragment("<p><br></p><div> <span> </span></div><span>\n</span><p>kept</p>");
        let sel = Selector::parse("div, span, p").unwrap();
        let cleaned = doc.without_empty(&sel, 1);

        assert_eq!(cleaned.select("p").unwrap().len(), 2);
        assert_eq!(cleaned.select("br").unwrap().len(), 1);
        assert_eq!(cleaned.select("div").unwrap().len(), 1);
        assert!(cleaned.select("span").unwrap().is_empty());
    }

    #[test]
    fn test_parent_and_siblings() {
        let doc = Document::parse(SAMPLE_HTML);
        let paragraphs = doc.select("p").unwrap();
        let parent = paragraphs[0].parent().unwrap();

        assert_eq!(parent.attr("id"), Some("wrap"));
        assert!(paragraphs[0].is_sibling_of(&paragraphs[1]));
        assert!(!paragraphs[0].same_node(&paragraphs[1]));
    }
}
