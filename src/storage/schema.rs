//! Database schema definitions
//!
//! This module contains the SQL schema for the collaboration graph database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Authors discovered as seeds or collaborators
CREATE TABLE IF NOT EXISTS authors (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    name TEXT,
    discovered_at TEXT NOT NULL
);

-- Papers from author paper listings
CREATE TABLE IF NOT EXISTS papers (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    discovered_at TEXT NOT NULL
);

-- Bibliographic text, one record per paper id
CREATE TABLE IF NOT EXISTS bibtex (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    paper_id TEXT NOT NULL UNIQUE,
    text TEXT NOT NULL
);

-- Author membership in a paper's authorship list
CREATE TABLE IF NOT EXISTS authorship (
    author_id TEXT NOT NULL REFERENCES authors(id),
    paper_id TEXT NOT NULL REFERENCES papers(id),
    PRIMARY KEY (author_id, paper_id)
);

CREATE INDEX IF NOT EXISTS idx_authorship_paper ON authorship(paper_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
