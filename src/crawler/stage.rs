//! Stage definitions for one author's traversal
//!
//! A traversal moves through every stage exactly once, in declaration order.

use crate::{CrawlError, Result};
use std::fmt;

/// Where a neighbor traversal is in its page sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalStage {
    /// Nothing fetched yet
    Start,

    /// Colleague listing read; neighbor list is final
    ColleaguesFetched,

    /// Full paper listing read (or skipped without a store)
    PapersFetched,

    /// BibTeX page read (or skipped without a store)
    BibtexFetched,

    /// Sequence exposed for pulling; no more page fetches
    Done,
}

impl TraversalStage {
    /// The only stage this one may move to
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::ColleaguesFetched),
            Self::ColleaguesFetched => Some(Self::PapersFetched),
            Self::PapersFetched => Some(Self::BibtexFetched),
            Self::BibtexFetched => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Moves to `to`, rejecting skips, repeats and backward moves
    pub fn transition(self, to: Self) -> Result<Self> {
        if self.next() == Some(to) {
            Ok(to)
        } else {
            Err(CrawlError::InvalidTransition { from: self, to })
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ColleaguesFetched => "colleagues_fetched",
            Self::PapersFetched => "papers_fetched",
            Self::BibtexFetched => "bibtex_fetched",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TraversalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
