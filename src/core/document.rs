use crate::domain::model::Page;
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed page that remembers where it came from.
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Short label for error messages: the last path segment plus query.
    pub fn label(&self) -> String {
        let name = self
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        match self.url.query() {
            Some(query) => format!("{}?{}", name, query),
            None => name.to_string(),
        }
    }

    /// First element matching `css`, or a layout error naming the selector.
    pub fn require<'a>(&'a self, css: &str) -> Result<ElementRef<'a>> {
        let sel = selector(css)?;
        self.html
            .select(&sel)
            .next()
            .ok_or_else(|| ScrapeError::layout(self.label(), format!("no element matches {}", css)))
    }

    pub fn join(&self, href: &str) -> Result<Url> {
        Ok(self.url.join(href)?)
    }
}

impl Page {
    pub fn document(&self) -> Document {
        Document::parse(self.url.clone(), &self.body)
    }
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Processing {
        message: format!("invalid selector {}: {}", css, e),
    })
}
