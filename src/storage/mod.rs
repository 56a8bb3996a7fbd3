//! Storage module for persisting the collaboration graph
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Idempotent author, paper and bibtex upserts
//! - Author-paper association tracking

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteGraphStore;
pub use traits::{GraphCounts, GraphStore, StorageError, StorageResult};

use std::path::Path;
use std::sync::Arc;

/// Opens a shareable graph store at `path`
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file, or `:memory:`
pub fn open_store(path: &Path) -> StorageResult<Arc<dyn GraphStore>> {
    Ok(Arc::new(SqliteGraphStore::new(path)?))
}
