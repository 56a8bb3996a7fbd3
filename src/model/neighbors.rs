use crate::crawler::TraversalReport;
use crate::model::Author;
use crate::{CrawlError, Result};

/// The collaborators discovered by one traversal, in page order
///
/// The list is computed once when the traversal runs; pulling from it never
/// fetches pages. `rewind` restarts the walk over the same authors.
#[derive(Debug, Clone)]
pub struct Neighbors {
    authors: Vec<Author>,
    cursor: usize,
    report: TraversalReport,
}

impl Neighbors {
    pub(crate) fn new(authors: Vec<Author>, report: TraversalReport) -> Self {
        Self {
            authors,
            cursor: 0,
            report,
        }
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn as_slice(&self) -> &[Author] {
        &self.authors
    }

    /// What the traversal saw and stored on its way to this sequence
    pub fn report(&self) -> &TraversalReport {
        &self.report
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Always fails: the sequence reflects the source and cannot be edited
    pub fn remove_current(&mut self) -> Result<()> {
        Err(CrawlError::Unsupported(
            "remove() is not supported on a neighbor sequence".to_string(),
        ))
    }

    pub fn into_vec(self) -> Vec<Author> {
        self.authors
    }
}

impl Iterator for Neighbors {
    type Item = Author;

    fn next(&mut self) -> Option<Author> {
        let author = self.authors.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(author)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.authors.len() - self.cursor;
        (remaining, Some(remaining))
    }
}
