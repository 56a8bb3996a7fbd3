//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the GraphStore trait.

use crate::model::{Author, Paper};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{
    require_key, GraphCounts, GraphStore, StorageError, StorageResult,
};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite graph store
///
/// The connection sits behind a mutex so one store can be shared across
/// traversals; each operation holds the lock for its own statements only.
pub struct SqliteGraphStore {
    conn: Mutex<Connection>,
}

impl SqliteGraphStore {
    /// Opens (or creates) the database at `path` and initializes the schema
    ///
    /// The special path `:memory:` yields an in-memory database.
    pub fn new(path: &Path) -> StorageResult<Self> {
        if path == Path::new(":memory:") {
            return Self::open_in_memory();
        }

        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl GraphStore for SqliteGraphStore {
    fn add_author(&self, id: &str, name: Option<&str>) -> StorageResult<bool> {
        require_key("author", id)?;
        let now = Utc::now().to_rfc3339();
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO authors (id, name, discovered_at) VALUES (?1, ?2, ?3)",
            params![id, name, now],
        )?;

        // A nameless row (seed or association endpoint) takes the first name offered
        if inserted == 0 && name.is_some() {
            conn.execute(
                "UPDATE authors SET name = ?2 WHERE id = ?1 AND name IS NULL",
                params![id, name],
            )?;
        }
        Ok(inserted > 0)
    }

    fn add_paper(&self, id: &str, name: &str) -> StorageResult<bool> {
        require_key("paper", id)?;
        let now = Utc::now().to_rfc3339();
        let inserted = self.lock()?.execute(
            "INSERT OR IGNORE INTO papers (id, name, discovered_at) VALUES (?1, ?2, ?3)",
            params![id, name, now],
        )?;
        Ok(inserted > 0)
    }

    fn add_bibtex_to_paper(&self, paper_id: &str, text: &str) -> StorageResult<bool> {
        require_key("paper", paper_id)?;
        let inserted = self.lock()?.execute(
            "INSERT OR IGNORE INTO bibtex (paper_id, text) VALUES (?1, ?2)",
            params![paper_id, text],
        )?;
        Ok(inserted > 0)
    }

    fn associate(&self, author_id: &str, paper_id: &str) -> StorageResult<bool> {
        require_key("author", author_id)?;
        require_key("paper", paper_id)?;
        let now = Utc::now().to_rfc3339();

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        // Seed authors are never upserted on their own, so endpoints may be missing
        tx.execute(
            "INSERT OR IGNORE INTO authors (id, name, discovered_at) VALUES (?1, NULL, ?2)",
            params![author_id, now],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO papers (id, name, discovered_at) VALUES (?1, '', ?2)",
            params![paper_id, now],
        )?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO authorship (author_id, paper_id) VALUES (?1, ?2)",
            params![author_id, paper_id],
        )?;
        tx.commit()?;

        Ok(inserted > 0)
    }

    fn list_all_authors(&self) -> StorageResult<Vec<Author>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM authors ORDER BY seq")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name)| -> StorageResult<Author> {
                let mut author =
                    Author::new(id).map_err(|e| StorageError::InvalidKey(e.to_string()))?;
                if let Some(name) = name {
                    author.set_name(name);
                }
                Ok(author)
            })
            .collect()
    }

    fn list_all_bibtex(&self) -> StorageResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT text FROM bibtex ORDER BY seq")?;
        let texts = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(texts)
    }

    fn list_papers_for_author(&self, author_id: &str) -> StorageResult<Vec<Paper>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.name FROM papers p
             JOIN authorship a ON a.paper_id = p.id
             WHERE a.author_id = ?1
             ORDER BY p.seq",
        )?;
        let papers = stmt
            .query_map(params![author_id], |row| {
                Ok(Paper {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(papers)
    }

    fn counts(&self) -> StorageResult<GraphCounts> {
        let conn = self.lock()?;
        let count = |table: &str| -> StorageResult<u64> {
            let n: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n as u64)
        };

        Ok(GraphCounts {
            authors: count("authors")?,
            papers: count("papers")?,
            associations: count("authorship")?,
            bibtex: count("bibtex")?,
        })
    }
}
