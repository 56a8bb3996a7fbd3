//! HTML querying shared by the bundled renderers
//!
//! Pages are kept as raw HTML and parsed per query with `scraper`, so a
//! renderer holds no borrowed DOM between calls.

use crate::render::{Element, Locator};
use crate::{CrawlError, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A loaded page: its final URL and HTML body
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    html: String,
}

impl Page {
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// All elements matching `locator`, in document order
    pub fn query(&self, locator: &Locator) -> Result<Vec<Element>> {
        let document = Html::parse_document(&self.html);

        match locator {
            Locator::LinkText(wanted) => {
                let anchors = parse_selector("a")?;
                Ok(document
                    .select(&anchors)
                    .filter(|a| normalize_whitespace(&collect_text(a)) == *wanted)
                    .map(snapshot)
                    .collect())
            }
            Locator::Selector(css) => {
                let selector = parse_selector(css)?;
                Ok(document.select(&selector).map(snapshot).collect())
            }
        }
    }

    /// Absolute target of a clicked element's link
    pub fn link_target(&self, element: &Element) -> Result<Url> {
        let href = element.attr("href").map(str::trim).ok_or_else(|| {
            CrawlError::Navigation(format!(
                "<{}> \"{}\" on {} has no href",
                element.tag(),
                element.text().trim(),
                self.url
            ))
        })?;

        if href.is_empty() || href.starts_with("javascript:") || href.starts_with('#') {
            return Err(CrawlError::Navigation(format!(
                "link \"{}\" on {} does not navigate (href=\"{}\")",
                element.text().trim(),
                self.url,
                href
            )));
        }

        Ok(self.url.join(href)?)
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CrawlError::InvalidSelector(format!("{}: {:?}", css, e)))
}

fn collect_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn snapshot(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let attributes = value
        .attrs()
        .map(|(name, val)| (name.to_string(), val.to_string()))
        .collect();
    Element::new(value.name(), attributes, collect_text(&element))
}
