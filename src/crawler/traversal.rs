//! Neighbor discovery for a single author
//!
//! A traversal drives one renderer session through a fixed page sequence:
//!
//! 1. Profile page → "See all colleagues of this author" → colleague listing
//! 2. Profile page with the fetch-all suffix → full paper listing
//! 3. "BibTeX" link → `pre` blocks of citation text
//!
//! Stages 2 and 3 only run when the author carries a store. Every stage first
//! collects what the page shows, then persists it, so what was extracted can be
//! inspected separately from what was written.

use crate::config::{Config, RendererConfig, SourceConfig};
use crate::crawler::extract::{colleague_link, paper_link, ExtractedLink};
use crate::crawler::TraversalStage;
use crate::model::{Association, Author, BibtexRecord, Neighbors};
use crate::render::{Element, Locator, PageRenderer};
use crate::storage::GraphStore;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Visible text of the profile link leading to the colleague listing
pub const COLLEAGUES_LINK_TEXT: &str = "See all colleagues of this author";

/// Collaborator anchors on the colleague listing
pub const COLLABORATOR_ANCHORS: &str =
    "div[class='abstract'] > table > tbody > tr[valign='top'] > td > div > a";

/// Paper anchors on the full paper listing
pub const PAPER_ANCHORS: &str = "a[href^='citation.cfm']";

/// Visible text of the link to the BibTeX export
pub const BIBTEX_LINK_TEXT: &str = "BibTeX";

/// Preformatted citation blocks on the BibTeX page
pub const BIBTEX_BLOCKS: &str = "pre";

/// How author pages are addressed and how long to wait for them
#[derive(Debug, Clone)]
pub struct TraversalSettings {
    pub base_url: String,
    pub author_page_script: String,
    pub fetch_all_suffix: String,
    pub wait_timeout: Duration,
}

impl TraversalSettings {
    /// Settings for `base_url` with the default script, suffix and timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        let source = SourceConfig::default();
        Self {
            base_url: base_url.into(),
            author_page_script: source.author_page_script,
            fetch_all_suffix: source.fetch_all_suffix,
            wait_timeout: RendererConfig::default().wait_timeout(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.source.base_url.clone(),
            author_page_script: config.source.author_page_script.clone(),
            fetch_all_suffix: config.source.fetch_all_suffix.clone(),
            wait_timeout: config.renderer.wait_timeout(),
        }
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// `{base}/{script}?id={id}`
    pub fn profile_url(&self, author_id: &str) -> String {
        format!(
            "{}/{}?id={}",
            self.base_url, self.author_page_script, author_id
        )
    }

    /// The profile URL switched to its all-papers view
    pub fn fetch_all_url(&self, author_id: &str) -> String {
        format!("{}{}", self.profile_url(author_id), self.fetch_all_suffix)
    }
}

/// What one traversal saw and wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalReport {
    /// Anchors matched on the colleague listing
    pub colleague_anchors: usize,
    /// Colleagues that survived extraction
    pub colleagues: usize,
    /// Anchors matched on the paper listing
    pub paper_anchors: usize,
    /// Papers that survived extraction
    pub papers_found: usize,
    /// Papers the store reported as new
    pub papers_added: usize,
    /// Bibtex records the store reported as new
    pub bibtex_stored: usize,
    /// Edges created for newly added papers
    pub associations: Vec<Association>,
}

/// One author's crawl, from `Start` to `Done`
pub struct NeighborTraversal<'a, R> {
    author: &'a Author,
    renderer: R,
    settings: &'a TraversalSettings,
    stage: TraversalStage,
    discovered: Vec<Author>,
    report: TraversalReport,
}

impl<'a, R: PageRenderer> NeighborTraversal<'a, R> {
    pub fn new(author: &'a Author, renderer: R, settings: &'a TraversalSettings) -> Self {
        Self {
            author,
            renderer,
            settings,
            stage: TraversalStage::Start,
            discovered: Vec::new(),
            report: TraversalReport::default(),
        }
    }

    pub fn stage(&self) -> TraversalStage {
        self.stage
    }

    /// Runs every stage and returns the discovered collaborators
    ///
    /// The renderer session is released when this returns. A missing page
    /// element aborts the traversal; whatever earlier stages stored stays
    /// stored.
    pub fn run(mut self) -> Result<Neighbors> {
        tracing::debug!("Traversing {}", self.author);

        let colleagues = self.discover_colleagues()?;
        self.persist_colleagues(colleagues);
        self.advance(TraversalStage::ColleaguesFetched)?;

        match self.author.store().cloned() {
            Some(store) => {
                let papers = self.discover_papers()?;
                self.persist_papers(store.as_ref(), &papers)?;
                self.advance(TraversalStage::PapersFetched)?;

                let records = self.discover_bibtex()?;
                self.persist_bibtex(store.as_ref(), &records)?;
                self.advance(TraversalStage::BibtexFetched)?;
            }
            None => {
                tracing::debug!(
                    "No store attached to {}, skipping papers and bibtex",
                    self.author.id()
                );
                self.advance(TraversalStage::PapersFetched)?;
                self.advance(TraversalStage::BibtexFetched)?;
            }
        }

        self.advance(TraversalStage::Done)?;

        tracing::info!(
            "Author {}: {} colleagues, {} new papers, {} bibtex records",
            self.author.id(),
            self.report.colleagues,
            self.report.papers_added,
            self.report.bibtex_stored
        );

        Ok(Neighbors::new(self.discovered, self.report))
    }

    fn advance(&mut self, to: TraversalStage) -> Result<()> {
        self.stage = self.stage.transition(to)?;
        tracing::trace!("Author {} now {}", self.author.id(), self.stage);
        Ok(())
    }

    // ===== Colleagues =====

    fn discover_colleagues(&mut self) -> Result<Vec<ExtractedLink>> {
        let timeout = self.settings.wait_timeout;
        let profile_url = self.settings.profile_url(self.author.id());
        self.renderer.load(&profile_url)?;

        let colleagues_link = Locator::link_text(COLLEAGUES_LINK_TEXT);
        self.renderer.wait_until_present(&colleagues_link, timeout)?;
        let link = self.renderer.find_one(&colleagues_link)?;
        self.renderer.click(&link)?;

        let anchors = Locator::selector(COLLABORATOR_ANCHORS);
        self.renderer.wait_until_present(&anchors, timeout)?;
        let elements = self.renderer.find_all(&anchors)?;
        self.report.colleague_anchors = elements.len();

        Ok(extract_links(&self.renderer, &elements, colleague_link))
    }

    fn persist_colleagues(&mut self, links: Vec<ExtractedLink>) {
        let store: Option<Arc<dyn GraphStore>> = self.author.store().cloned();

        for link in links {
            let mut neighbor = match Author::new(link.id) {
                Ok(author) => author.with_name(link.name),
                Err(e) => {
                    tracing::warn!("Skipping colleague \"{}\": {}", link.name, e);
                    continue;
                }
            };
            neighbor.set_store(store.clone());

            if let Some(store) = &store {
                // One failed upsert must not cost the rest of the listing
                if let Err(e) = store.add_author(neighbor.id(), neighbor.name()) {
                    tracing::warn!("Failed to store author {}: {}", neighbor.id(), e);
                }
            }

            self.discovered.push(neighbor);
        }

        self.report.colleagues = self.discovered.len();
    }

    // ===== Papers =====

    fn discover_papers(&mut self) -> Result<Vec<ExtractedLink>> {
        let url = self.settings.fetch_all_url(self.author.id());
        self.renderer.load(&url)?;

        let anchors = Locator::selector(PAPER_ANCHORS);
        self.renderer
            .wait_until_present(&anchors, self.settings.wait_timeout)?;
        let elements = self.renderer.find_all(&anchors)?;
        self.report.paper_anchors = elements.len();

        let papers = extract_links(&self.renderer, &elements, paper_link);
        self.report.papers_found = papers.len();
        Ok(papers)
    }

    fn persist_papers(&mut self, store: &dyn GraphStore, papers: &[ExtractedLink]) -> Result<()> {
        for paper in papers {
            if paper.id.is_empty() {
                tracing::warn!("Skipping paper \"{}\" with empty id", paper.name);
                continue;
            }

            // A known paper is assumed to be associated already
            if !store.add_paper(&paper.id, &paper.name)? {
                tracing::debug!("Paper {} already known", paper.id);
                continue;
            }

            tracing::info!("Added paper: {} id={}", paper.name, paper.id);
            store.associate(self.author.id(), &paper.id)?;
            self.report.papers_added += 1;
            self.report.associations.push(Association {
                author_id: self.author.id().to_string(),
                paper_id: paper.id.clone(),
            });
        }

        Ok(())
    }

    // ===== BibTeX =====

    fn discover_bibtex(&mut self) -> Result<Vec<BibtexRecord>> {
        tracing::debug!(
            "Following BibTeX link from {}",
            self.renderer.current_url().unwrap_or_default()
        );
        let link = self
            .renderer
            .find_one(&Locator::link_text(BIBTEX_LINK_TEXT))?;
        self.renderer.click(&link)?;

        let blocks = self
            .renderer
            .find_all(&Locator::selector(BIBTEX_BLOCKS))?;

        let mut records = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let paper_id = match self.renderer.attribute(block, "id") {
                Some(id) if !id.trim().is_empty() => id.trim().to_string(),
                _ => {
                    tracing::debug!("Skipping bibtex block without id");
                    continue;
                }
            };
            records.push(BibtexRecord {
                paper_id,
                text: self.renderer.text(block).trim().to_string(),
            });
        }

        Ok(records)
    }

    fn persist_bibtex(&mut self, store: &dyn GraphStore, records: &[BibtexRecord]) -> Result<()> {
        for record in records {
            if store.add_bibtex_to_paper(&record.paper_id, &record.text)? {
                self.report.bibtex_stored += 1;
            }
        }
        Ok(())
    }
}

/// Applies an extraction rule to each element, dropping the ones it skips
fn extract_links<R: PageRenderer>(
    renderer: &R,
    elements: &[Element],
    rule: fn(Option<&str>, &str) -> Option<ExtractedLink>,
) -> Vec<ExtractedLink> {
    elements
        .iter()
        .filter_map(|element| {
            let href = renderer.attribute(element, "href");
            let text = renderer.text(element);
            let extracted = rule(href.as_deref(), &text);
            if extracted.is_none() {
                tracing::trace!("No id in href {:?}", href);
            }
            extracted
        })
        .collect()
}
