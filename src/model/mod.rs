//! Collaboration graph entities
//!
//! - `Author`: a graph node identified by its external id
//! - `Paper`, `BibtexRecord`, `Association`: what a traversal persists
//! - `Neighbors`: the pull-based sequence an author's traversal yields

mod author;
mod neighbors;
mod records;

pub use author::Author;
pub use neighbors::Neighbors;
pub use records::{Association, BibtexRecord, Paper};
