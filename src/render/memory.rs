//! In-memory page renderer
//!
//! Serves canned HTML keyed by absolute URL. Pages never change after they
//! are loaded, so waits resolve (or fail) on the first check.

use crate::render::{Element, Locator, Page, PageRenderer};
use crate::{CrawlError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Renderer over a fixed set of pages
///
/// Clones share the page set; each clone keeps its own current page and history.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    pages: Arc<HashMap<String, String>>,
    current: Option<Page>,
    history: Vec<String>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the page served at `url`
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.insert_page(url, html);
        self
    }

    pub fn insert_page(&mut self, url: &str, html: impl Into<String>) {
        Arc::make_mut(&mut self.pages).insert(normalize(url), html.into());
    }

    /// URLs loaded by this session, in order
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn open(&mut self, url: &str) -> Result<()> {
        let key = normalize(url);
        let html = self
            .pages
            .get(&key)
            .ok_or_else(|| CrawlError::PageUnavailable {
                url: key.clone(),
                status: 404,
            })?
            .clone();

        self.current = Some(Page::new(Url::parse(&key)?, html));
        self.history.push(key);
        Ok(())
    }

    fn page(&self) -> Result<&Page> {
        self.current
            .as_ref()
            .ok_or_else(|| CrawlError::Navigation("no page loaded".to_string()))
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

impl PageRenderer for MemoryRenderer {
    fn load(&mut self, url: &str) -> Result<()> {
        self.open(url)
    }

    fn current_url(&self) -> Option<String> {
        self.current.as_ref().map(|page| page.url().to_string())
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<Element>> {
        self.page()?.query(locator)
    }

    fn click(&mut self, element: &Element) -> Result<()> {
        let target = self.page()?.link_target(element)?;
        self.open(target.as_str())
    }

    fn wait_until_present(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        if self.find_all(locator)?.is_empty() {
            return Err(CrawlError::Timeout {
                locator: locator.to_string(),
                url: self.current_url().unwrap_or_default(),
                timeout,
            });
        }
        Ok(())
    }
}
