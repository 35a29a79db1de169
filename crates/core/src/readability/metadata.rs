use crate::json_ld::{self, SchemaArticle};
use crate::parse::Document;
use crate::patterns::{H1, ITEMPROP_AUTHOR, REL_AUTHOR};

/// Page-level metadata the readability plan reports alongside the content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. Meta `title`
    /// 5. `<title>` element
    /// 6. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        self.extract_title_with(json_ld::find_article(self).as_ref())
    }

    /// Extract byline with priority fallback:
    /// 1. JSON-LD `author`
    /// 2. Meta `author`
    /// 3. `[rel="author"]` text
    /// 4. `[itemprop="author"]` text
    pub fn extract_byline(&self) -> Option<String> {
        self.extract_byline_with(json_ld::find_article(self).as_ref())
    }

    /// Extract excerpt with priority fallback:
    /// 1. JSON-LD `description`
    /// 2. Open Graph `og:description`
    /// 3. Meta `description`
    pub fn extract_excerpt(&self) -> Option<String> {
        self.extract_excerpt_with(json_ld::find_article(self).as_ref())
    }

    /// Extract site name: JSON-LD `publisher.name`, then `og:site_name`.
    pub fn extract_site_name(&self) -> Option<String> {
        self.extract_site_name_with(json_ld::find_article(self).as_ref())
    }

    /// Extract all metadata at once, reading the JSON-LD only once.
    pub fn extract_metadata(&self) -> Metadata {
        let article = json_ld::find_article(self);
        let article = article.as_ref();

        Metadata {
            title: self.extract_title_with(article),
            byline: self.extract_byline_with(article),
            excerpt: self.extract_excerpt_with(article),
            site_name: self.extract_site_name_with(article),
        }
    }

    fn extract_title_with(&self, article: Option<&SchemaArticle>) -> Option<String> {
        article
            .and_then(SchemaArticle::headline)
            .or_else(|| self.meta_content("og:title"))
            .or_else(|| self.meta_content("twitter:title"))
            .or_else(|| self.meta_content("title"))
            .or_else(|| self.title())
            .or_else(|| self.first_text(&H1))
    }

    fn extract_byline_with(&self, article: Option<&SchemaArticle>) -> Option<String> {
        article
            .and_then(SchemaArticle::author)
            .or_else(|| self.meta_content("author"))
            .or_else(|| self.first_text(&REL_AUTHOR))
            .or_else(|| self.first_text(&ITEMPROP_AUTHOR))
    }

    fn extract_excerpt_with(&self, article: Option<&SchemaArticle>) -> Option<String> {
        article
            .and_then(SchemaArticle::description)
            .or_else(|| self.meta_content("og:description"))
            .or_else(|| self.meta_content("description"))
    }

    fn extract_site_name_with(&self, article: Option<&SchemaArticle>) -> Option<String> {
        article
            .and_then(SchemaArticle::publisher_name)
            .or_else(|| self.meta_content("og:site_name"))
    }
}
