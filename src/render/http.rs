//! HTTP page renderer
//!
//! This module fetches pages with a blocking `reqwest` client and answers
//! element queries from the fetched HTML. Client-side scripts are not run;
//! "clicking" a link follows its href.

use crate::config::{RendererConfig, UserAgentConfig};
use crate::render::{Element, Locator, Page, PageRenderer};
use crate::{CrawlError, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Builds a blocking HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use acm_crawler::config::UserAgentConfig;
/// use acm_crawler::render::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "acm-crawler".to_string(),
///     crawler_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer backed by live HTTP fetches
pub struct HttpRenderer {
    client: Client,
    page: Option<Page>,
    page_delay: Duration,
}

impl HttpRenderer {
    /// Opens a fresh session with its own client
    pub fn new(user_agent: &UserAgentConfig, config: &RendererConfig) -> Result<Self> {
        let client = build_http_client(user_agent).map_err(|source| CrawlError::Http {
            url: String::new(),
            source,
        })?;
        Ok(Self::with_client(client, config.page_delay()))
    }

    /// Opens a session on an existing client
    pub fn with_client(client: Client, page_delay: Duration) -> Self {
        Self {
            client,
            page: None,
            page_delay,
        }
    }

    /// Navigates to `url` after the configured page delay
    fn navigate(&mut self, url: Url) -> Result<()> {
        if !self.page_delay.is_zero() {
            std::thread::sleep(self.page_delay);
        }
        self.fetch(url, None)
    }

    /// Fetches `url`, bounding the request by `budget` when given
    fn fetch(&mut self, url: Url, budget: Option<Duration>) -> Result<()> {
        tracing::debug!("Fetching {}", url);
        let mut request = self.client.get(url.as_str());
        if let Some(budget) = budget {
            request = request.timeout(budget);
        }

        let response = request
            .send()
            .map_err(|source| CrawlError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::PageUnavailable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().map_err(|source| CrawlError::Http {
            url: url.to_string(),
            source,
        })?;

        self.page = Some(Page::new(final_url, body));
        Ok(())
    }

    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| CrawlError::Navigation("no page loaded".to_string()))
    }
}

impl PageRenderer for HttpRenderer {
    fn load(&mut self, url: &str) -> Result<()> {
        let url = Url::parse(url)?;
        self.navigate(url)
    }

    fn current_url(&self) -> Option<String> {
        self.page.as_ref().map(|page| page.url().to_string())
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<Element>> {
        self.page()?.query(locator)
    }

    fn click(&mut self, element: &Element) -> Result<()> {
        let target = self.page()?.link_target(element)?;
        self.navigate(target)
    }

    /// Re-fetches the current URL so late-arriving content can show up
    ///
    /// No page delay applies; the request itself is cut off at `budget`.
    fn refresh(&mut self, budget: Duration) -> Result<()> {
        let url = self.page()?.url().clone();
        self.fetch(url, Some(budget))
    }
}
