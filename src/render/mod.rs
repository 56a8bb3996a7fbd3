//! Page rendering module
//!
//! The traversal never touches HTTP or HTML directly. It drives a
//! [`PageRenderer`] session: load a URL, wait for an element, query elements,
//! click a link. This module defines that contract and ships two renderers:
//! - [`HttpRenderer`]: fetches live pages with a blocking HTTP client
//! - [`MemoryRenderer`]: serves canned HTML keyed by URL

mod document;
mod http;
mod memory;

pub use document::Page;
pub use http::{build_http_client, HttpRenderer};
pub use memory::MemoryRenderer;

use crate::{CrawlError, Result};
use std::fmt;
use std::time::{Duration, Instant};

/// Interval between presence checks while waiting for an element
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Describes how to find elements on a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// An anchor whose visible text equals this string (whitespace-normalized)
    LinkText(String),

    /// A CSS selector path over the element tree
    Selector(String),
}

impl Locator {
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    pub fn selector(css: impl Into<String>) -> Self {
        Self::Selector(css.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkText(text) => write!(f, "link \"{}\"", text),
            Self::Selector(css) => write!(f, "selector `{}`", css),
        }
    }
}

/// A snapshot of one element on the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl Element {
    pub fn new(
        tag: impl Into<String>,
        attributes: Vec<(String, String)>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            text: text.into(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of the element and its descendants
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A browsing session the traversal drives through a fixed page sequence
///
/// One session serves exactly one traversal. Implementations block the
/// calling thread for every load, wait and click.
pub trait PageRenderer {
    /// Navigates to `url`, replacing the current page
    fn load(&mut self, url: &str) -> Result<()>;

    /// URL of the current page, if any page has been loaded
    fn current_url(&self) -> Option<String>;

    /// All elements on the current page matching `locator`, in document order
    fn find_all(&self, locator: &Locator) -> Result<Vec<Element>>;

    /// Follows the element's link, making the target the current page
    fn click(&mut self, element: &Element) -> Result<()>;

    /// Re-reads the current page between presence checks
    ///
    /// Must return within `budget`. On failure the previous page stays current.
    fn refresh(&mut self, _budget: Duration) -> Result<()> {
        Ok(())
    }

    /// The first element matching `locator`
    fn find_one(&self, locator: &Locator) -> Result<Element> {
        self.find_all(locator)?
            .into_iter()
            .next()
            .ok_or_else(|| CrawlError::ElementNotFound {
                locator: locator.to_string(),
                url: self.current_url().unwrap_or_default(),
            })
    }

    /// Blocks until `locator` matches at least one element, or `timeout` passes
    ///
    /// A failed refresh counts as "not present yet"; only the deadline ends
    /// the wait.
    fn wait_until_present(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.find_all(locator)?.is_empty() {
                return Ok(());
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(CrawlError::Timeout {
                    locator: locator.to_string(),
                    url: self.current_url().unwrap_or_default(),
                    timeout,
                });
            }

            std::thread::sleep(POLL_INTERVAL.min(remaining));

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                continue;
            }
            if let Err(e) = self.refresh(remaining) {
                tracing::debug!("Refresh failed while waiting for {}: {}", locator, e);
            }
        }
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.attr(name).map(str::to_string)
    }

    fn text(&self, element: &Element) -> String {
        element.text().to_string()
    }
}

/// Lets a caller lend out a session and inspect it after the traversal
impl<R: PageRenderer + ?Sized> PageRenderer for &mut R {
    fn load(&mut self, url: &str) -> Result<()> {
        (**self).load(url)
    }

    fn current_url(&self) -> Option<String> {
        (**self).current_url()
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<Element>> {
        (**self).find_all(locator)
    }

    fn click(&mut self, element: &Element) -> Result<()> {
        (**self).click(element)
    }

    fn refresh(&mut self, budget: Duration) -> Result<()> {
        (**self).refresh(budget)
    }

    fn find_one(&self, locator: &Locator) -> Result<Element> {
        (**self).find_one(locator)
    }

    fn wait_until_present(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        (**self).wait_until_present(locator, timeout)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        (**self).attribute(element, name)
    }

    fn text(&self, element: &Element) -> String {
        (**self).text(element)
    }
}
