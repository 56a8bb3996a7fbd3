//! Storage traits and error types
//!
//! This module defines the contract the traversal persists discoveries
//! through, and the errors a backend may report.

use crate::model::{Author, Paper};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Row counts across the collaboration graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    pub authors: u64,
    pub papers: u64,
    pub associations: u64,
    pub bibtex: u64,
}

/// Contract for collaboration graph backends
///
/// Every mutating operation is an upsert keyed by id and reports whether the
/// row was newly added; re-inserting a known key is a no-op returning `false`,
/// never an error. Implementations lock internally so a single store can be
/// shared by many traversals through an `Arc`.
pub trait GraphStore: Send + Sync {
    /// Adds an author. A known id keeps its first-seen name; a known id
    /// stored without a name takes `name`.
    fn add_author(&self, id: &str, name: Option<&str>) -> StorageResult<bool>;

    /// Adds a paper
    fn add_paper(&self, id: &str, name: &str) -> StorageResult<bool>;

    /// Stores the bibtex text for a paper
    fn add_bibtex_to_paper(&self, paper_id: &str, text: &str) -> StorageResult<bool>;

    /// Records that an author is on a paper's authorship list
    ///
    /// Missing endpoints are created together with the edge.
    fn associate(&self, author_id: &str, paper_id: &str) -> StorageResult<bool>;

    /// Lists every known author, in discovery order
    fn list_all_authors(&self) -> StorageResult<Vec<Author>>;

    /// Lists every stored bibtex text, in discovery order
    fn list_all_bibtex(&self) -> StorageResult<Vec<String>>;

    /// Lists the papers associated with an author
    fn list_papers_for_author(&self, author_id: &str) -> StorageResult<Vec<Paper>>;

    /// Counts rows of each entity kind
    fn counts(&self) -> StorageResult<GraphCounts>;
}

/// Rejects keys the graph cannot hold
pub(crate) fn require_key(kind: &str, id: &str) -> StorageResult<()> {
    if id.trim().is_empty() {
        return Err(StorageError::InvalidKey(format!("{} id may not be empty", kind)));
    }
    Ok(())
}
