//! Schema.org article records embedded as JSON-LD.
//!
//! Publishers ship the same facts in many shapes: `@type` as a string or a
//! list, articles nested in `@graph`, authors as names, objects or arrays,
//! images as URLs or `ImageObject`s. The types here absorb those shapes with
//! untagged serde enums so callers only see the normalized values.

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::parse::Document;
use crate::patterns;

const ARTICLE_TYPES: &[&str] = &["NewsArticle", "Article"];

/// An article record found in a page's JSON-LD.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaArticle {
    #[serde(default)]
    headline: Option<Text>,
    #[serde(default)]
    title: Option<Text>,
    #[serde(default)]
    article_body: Option<Text>,
    #[serde(default)]
    description: Option<Text>,
    #[serde(default)]
    author: Option<Author>,
    #[serde(default)]
    image: Option<ImageRef>,
    #[serde(default)]
    thumbnail: Option<ImageRef>,
    #[serde(default)]
    thumbnail_url: Option<ImageRef>,
    #[serde(default)]
    publisher: Option<Author>,
    #[serde(default)]
    date_published: Option<Text>,
    #[serde(default)]
    date_modified: Option<Text>,
}

/// A text property. Lists yield their first string; other shapes are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Value(String),
    List(Vec<Text>),
    Other(IgnoredAny),
}

impl Text {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Text::Value(value) => Some(value.as_str()),
            Text::List(items) => items.iter().find_map(Text::as_str),
            Text::Other(_) => None,
        }
    }
}

fn text(value: &Option<Text>) -> Option<String> {
    value.as_ref().and_then(Text::as_str).and_then(non_blank)
}

/// A person or organisation reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    List(Vec<Author>),
    Entity {
        #[serde(default)]
        name: Option<String>,
    },
    Other(IgnoredAny),
}

impl Author {
    /// The first usable name, looking through lists.
    pub fn display_name(&self) -> Option<String> {
        match self {
            Author::Name(name) => non_blank(name),
            Author::Entity { name } => name.as_deref().and_then(non_blank),
            Author::List(items) => items.iter().find_map(Author::display_name),
            Author::Other(_) => None,
        }
    }
}

/// An image given as a URL, an `ImageObject`, or a list of either.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    List(Vec<ImageRef>),
    Object {
        #[serde(default)]
        url: Option<String>,
        #[serde(default, rename = "contentUrl")]
        content_url: Option<String>,
    },
    Other(IgnoredAny),
}

impl ImageRef {
    pub fn url(&self) -> Option<String> {
        match self {
            ImageRef::Url(url) => non_blank(url),
            ImageRef::Object { url, content_url } => {
                url.as_deref().and_then(non_blank).or_else(|| content_url.as_deref().and_then(non_blank))
            }
            ImageRef::List(items) => items.iter().find_map(ImageRef::url),
            ImageRef::Other(_) => None,
        }
    }
}

impl SchemaArticle {
    /// `headline`, falling back to `title`.
    pub fn headline(&self) -> Option<String> {
        text(&self.headline).or_else(|| text(&self.title))
    }

    pub fn body(&self) -> Option<String> {
        text(&self.article_body)
    }

    pub fn description(&self) -> Option<String> {
        text(&self.description)
    }

    pub fn author(&self) -> Option<String> {
        self.author.as_ref().and_then(Author::display_name)
    }

    /// `image`, then `thumbnail`, then `thumbnailUrl`.
    pub fn image(&self) -> Option<String> {
        [&self.image, &self.thumbnail, &self.thumbnail_url]
            .into_iter()
            .find_map(|image| image.as_ref().and_then(ImageRef::url))
    }

    pub fn publisher_name(&self) -> Option<String> {
        self.publisher.as_ref().and_then(Author::display_name)
    }

    pub fn date_published(&self) -> Option<&str> {
        self.date_published.as_ref().and_then(Text::as_str)
    }

    pub fn date_modified(&self) -> Option<&str> {
        self.date_modified.as_ref().and_then(Text::as_str)
    }
}

/// Every JSON-LD block in the document that parses as JSON.
pub fn blocks(doc: &Document) -> Vec<Value> {
    doc.select_with(&patterns::JSON_LD_SCRIPT)
        .filter_map(|script| serde_json::from_str(script.text().trim()).ok())
        .collect()
}

/// The first article record in the document's JSON-LD.
///
/// Looks inside top-level arrays and `@graph` containers.
pub fn find_article(doc: &Document) -> Option<SchemaArticle> {
    blocks(doc).iter().find_map(article_in)
}

fn article_in(value: &Value) -> Option<SchemaArticle> {
    match value {
        Value::Array(items) => items.iter().find_map(article_in),
        Value::Object(map) => {
            if is_article(value) {
                return serde_json::from_value(value.clone()).ok();
            }
            map.get("@graph").and_then(article_in)
        }
        _ => None,
    }
}

fn is_article(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => ARTICLE_TYPES.contains(&kind.as_str()),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| ARTICLE_TYPES.contains(&kind)),
        _ => false,
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
