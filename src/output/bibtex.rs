//! BibTeX export
//!
//! Writes every stored citation to a single `.bib` file, one record per
//! block, separated by a blank line.

use crate::storage::GraphStore;
use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Exports every stored bibtex text to `output_path`
///
/// # Returns
///
/// * `Ok(usize)` - Number of records written
/// * `Err(CrawlError)` - Failed to read the store or write the file
pub fn export_bibtex(store: &dyn GraphStore, output_path: &Path) -> Result<usize> {
    let records = store.list_all_bibtex()?;
    let contents = format_bibtex(&records);

    let mut file = File::create(output_path)?;
    file.write_all(contents.as_bytes())?;

    tracing::info!(
        "Exported {} bibtex records to {}",
        records.len(),
        output_path.display()
    );
    Ok(records.len())
}

/// Joins records with a blank line, ending in a single newline
pub fn format_bibtex(records: &[String]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut out = records
        .iter()
        .map(|record| record.trim_end())
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}
