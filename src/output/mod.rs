//! Output module for exploration summaries and exports
//!
//! This module handles:
//! - Printing the summary of an exploration
//! - Graph statistics from the store
//! - Exporting stored citations as a `.bib` file

mod bibtex;
pub mod stats;

pub use bibtex::{export_bibtex, format_bibtex};
pub use stats::{load_statistics, print_statistics, GraphStatistics};

use crate::crawler::ExplorationSummary;

/// Formats an exploration summary as plain text
pub fn format_summary(summary: &ExplorationSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Exploration Summary ===\n\n");
    out.push_str(&format!("Authors visited: {}\n", summary.visited.len()));
    out.push_str(&format!("Authors discovered: {}\n", summary.discovered));
    out.push_str(&format!("New papers: {}\n", summary.papers_added));
    out.push_str(&format!("New bibtex records: {}\n", summary.bibtex_stored));
    out.push_str(&format!(
        "Elapsed: {:.1}s\n",
        summary.elapsed.as_secs_f64()
    ));

    if !summary.failed.is_empty() {
        out.push_str(&format!("\nFailed authors ({}):\n", summary.failed.len()));
        for (id, error) in &summary.failed {
            out.push_str(&format!("  - {}: {}\n", id, error));
        }
    }

    out
}

/// Prints an exploration summary to stdout
pub fn print_summary(summary: &ExplorationSummary) {
    print!("{}", format_summary(summary));
}
