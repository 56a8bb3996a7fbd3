use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub exploration: ExplorationConfig,
    pub output: OutputConfig,
}

/// Where author profiles live and how their pages are addressed
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Site root, without a trailing slash (e.g. "https://dl.acm.org")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Script serving the author profile page
    #[serde(rename = "author-page-script", default = "default_author_page_script")]
    pub author_page_script: String,

    /// Query suffix appended to the profile URL to list every paper at once
    #[serde(rename = "fetch-all-suffix", default = "default_fetch_all_suffix")]
    pub fetch_all_suffix: String,
}

fn default_author_page_script() -> String {
    "author_page.cfm".to_string()
}

fn default_fetch_all_suffix() -> String {
    "&perpage=1000&start=0".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dl.acm.org".to_string(),
            author_page_script: default_author_page_script(),
            fetch_all_suffix: default_fetch_all_suffix(),
        }
    }
}

/// Page renderer behavior
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Upper bound on every wait-for-element, in seconds
    #[serde(rename = "wait-timeout-secs", default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Fixed pause before each page load (milliseconds)
    #[serde(rename = "page-delay-ms", default)]
    pub page_delay_ms: u64,
}

fn default_wait_timeout_secs() -> u64 {
    10
}

impl RendererConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            wait_timeout_secs: default_wait_timeout_secs(),
            page_delay_ms: 0,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Breadth-first exploration limits
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorationConfig {
    /// Stop after this many authors have been traversed
    #[serde(rename = "max-authors", default = "default_max_authors")]
    pub max_authors: usize,

    /// Maximum collaboration distance from the seed author
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,
}

fn default_max_authors() -> usize {
    100
}

fn default_max_depth() -> u32 {
    2
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            max_authors: default_max_authors(),
            max_depth: default_max_depth(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file (":memory:" for a throwaway store)
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path the bibtex export is written to
    #[serde(rename = "bibtex-path")]
    pub bibtex_path: String,
}
