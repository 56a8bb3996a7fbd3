//! Breadth-first exploration of the collaboration graph
//!
//! The explorer owns the frontier. Every author it pops gets a fresh renderer
//! session from the factory, and the neighbors that come back are queued one
//! level deeper unless they were seen before.

use crate::crawler::TraversalSettings;
use crate::model::Author;
use crate::render::PageRenderer;
use crate::storage::GraphStore;
use crate::Result;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of one exploration
#[derive(Debug, Clone, Default)]
pub struct ExplorationSummary {
    /// Authors whose traversal completed, in visit order
    pub visited: Vec<Author>,
    /// Distinct authors seen in any listing, the seed included, visited or not
    pub discovered: usize,
    /// `(author id, error)` for every traversal that failed
    pub failed: Vec<(String, String)>,
    pub papers_added: usize,
    pub bibtex_stored: usize,
    pub elapsed: Duration,
}

/// Drives neighbor traversals outward from a seed author
pub struct Explorer<F> {
    settings: TraversalSettings,
    open_renderer: F,
    store: Option<Arc<dyn GraphStore>>,
    max_authors: usize,
    max_depth: u32,
}

impl<F, R> Explorer<F>
where
    F: FnMut() -> Result<R>,
    R: PageRenderer,
{
    /// Creates an explorer with no store and no practical limits
    ///
    /// `open_renderer` is called once per traversal; each session serves one
    /// author only.
    pub fn new(settings: TraversalSettings, open_renderer: F) -> Self {
        Self {
            settings,
            open_renderer,
            store: None,
            max_authors: usize::MAX,
            max_depth: u32::MAX,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn GraphStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Stops after `max_authors` traversals and never queues authors further
    /// than `max_depth` hops from the seed
    pub fn with_limits(mut self, max_authors: usize, max_depth: u32) -> Self {
        self.max_authors = max_authors;
        self.max_depth = max_depth;
        self
    }

    pub fn explore(&mut self, mut seed: Author) -> Result<ExplorationSummary> {
        let start_time = Instant::now();
        let mut summary = ExplorationSummary::default();

        if let Some(store) = &self.store {
            store.add_author(seed.id(), seed.name())?;
            seed.set_store(Some(Arc::clone(store)));
        }

        tracing::info!(
            "Exploring from {} (max {} authors, depth {})",
            seed,
            self.max_authors,
            self.max_depth
        );

        let mut seen: HashSet<Author> = HashSet::new();
        let mut frontier: VecDeque<(Author, u32)> = VecDeque::new();
        seen.insert(seed.clone());
        frontier.push_back((seed, 0));

        let mut attempts = 0usize;
        while attempts < self.max_authors {
            let (author, depth) = match frontier.pop_front() {
                Some(entry) => entry,
                None => {
                    tracing::info!("Frontier is empty, exploration complete");
                    break;
                }
            };
            attempts += 1;

            tracing::debug!("Visiting {} at depth {}", author, depth);
            let renderer = (self.open_renderer)()?;

            let neighbors = match author.neighbors(renderer, &self.settings) {
                Ok(neighbors) => neighbors,
                Err(e) => {
                    tracing::error!("Error traversing {}: {}", author.id(), e);
                    summary.failed.push((author.id().to_string(), e.to_string()));
                    continue;
                }
            };

            summary.papers_added += neighbors.report().papers_added;
            summary.bibtex_stored += neighbors.report().bibtex_stored;

            // Authors first seen past the depth limit are counted, not queued
            for neighbor in neighbors {
                if seen.insert(neighbor.clone()) && depth < self.max_depth {
                    frontier.push_back((neighbor, depth + 1));
                }
            }

            summary.visited.push(author);

            if attempts % 10 == 0 {
                let rate = attempts as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} authors visited, {} in frontier, {:.2} authors/sec",
                    attempts,
                    frontier.len(),
                    rate
                );
            }
        }

        summary.discovered = seen.len();
        summary.elapsed = start_time.elapsed();

        tracing::info!(
            "Exploration finished: {} visited, {} failed, {} discovered in {:.1}s",
            summary.visited.len(),
            summary.failed.len(),
            summary.discovered,
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }
}
