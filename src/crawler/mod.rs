//! Crawler module for co-authorship discovery
//!
//! This module contains the core crawling logic, including:
//! - Id extraction from collaborator and paper hyperlinks
//! - The per-author traversal and its stage machine
//! - Breadth-first exploration across authors

mod explorer;
mod extract;
mod stage;
mod traversal;

pub use explorer::{ExplorationSummary, Explorer};
pub use extract::{colleague_link, paper_link, ExtractedLink};
pub use stage::TraversalStage;
pub use traversal::{
    NeighborTraversal, TraversalReport, TraversalSettings, BIBTEX_BLOCKS, BIBTEX_LINK_TEXT,
    COLLABORATOR_ANCHORS, COLLEAGUES_LINK_TEXT, PAPER_ANCHORS,
};
