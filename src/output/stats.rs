//! Statistics generation from the graph store
//!
//! This module provides functionality for extracting and displaying
//! graph statistics from the storage layer.

use crate::storage::GraphStore;
use crate::Result;

/// Graph statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStatistics {
    /// Total number of authors stored
    pub authors: u64,

    /// Total number of papers stored
    pub papers: u64,

    /// Number of author-paper edges
    pub associations: u64,

    /// Number of papers with a bibtex record
    pub bibtex: u64,
}

impl GraphStatistics {
    /// Share of papers that have a bibtex record, in percent
    pub fn bibtex_coverage(&self) -> f64 {
        if self.papers == 0 {
            0.0
        } else {
            (self.bibtex as f64 / self.papers as f64) * 100.0
        }
    }

    /// Mean number of edges per stored author
    pub fn papers_per_author(&self) -> f64 {
        if self.authors == 0 {
            0.0
        } else {
            self.associations as f64 / self.authors as f64
        }
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `store` - The store to query
pub fn load_statistics(store: &dyn GraphStore) -> Result<GraphStatistics> {
    let counts = store.counts()?;

    Ok(GraphStatistics {
        authors: counts.authors,
        papers: counts.papers,
        associations: counts.associations,
        bibtex: counts.bibtex,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &GraphStatistics) {
    println!("=== Graph Statistics ===\n");

    println!("Overview:");
    println!("  Authors: {}", stats.authors);
    println!("  Papers: {}", stats.papers);
    println!("  Authorship edges: {}", stats.associations);
    println!("  BibTeX records: {}", stats.bibtex);
    println!();

    println!(
        "BibTeX Coverage: {:.1}% ({} / {} papers)",
        stats.bibtex_coverage(),
        stats.bibtex,
        stats.papers
    );
    println!("Edges per Author: {:.2}", stats.papers_per_author());
}
