use crate::crawler::{NeighborTraversal, TraversalSettings};
use crate::model::Neighbors;
use crate::render::PageRenderer;
use crate::storage::GraphStore;
use crate::{CrawlError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A node in the collaboration graph
///
/// Identity is the external author id alone: two values with the same id are
/// the same node whatever names they carry, so `Author` works as a set or map
/// key for deduplication across a session.
#[derive(Clone)]
pub struct Author {
    id: String,
    name: Option<String>,
    store: Option<Arc<dyn GraphStore>>,
}

impl Author {
    /// Creates an author with no name and no store
    ///
    /// # Errors
    ///
    /// `CrawlError::InvalidArgument` if `id` is empty or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CrawlError::InvalidArgument(
                "author id may not be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            name: None,
            store: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Attaches the store that traversals from this author persist into
    pub fn with_store(mut self, store: Arc<dyn GraphStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn store(&self) -> Option<&Arc<dyn GraphStore>> {
        self.store.as_ref()
    }

    pub fn set_store(&mut self, store: Option<Arc<dyn GraphStore>>) {
        self.store = store;
    }

    /// Crawls this author's pages and returns the collaborators found
    ///
    /// `renderer` is the session for this one traversal and is dropped once
    /// the sequence is computed. Every call fetches live pages again, so two
    /// calls may disagree if the source changed in between.
    ///
    /// Without a store only the colleague stage runs; with one, papers and
    /// bibtex are persisted too.
    pub fn neighbors<R: PageRenderer>(
        &self,
        renderer: R,
        settings: &TraversalSettings,
    ) -> Result<Neighbors> {
        NeighborTraversal::new(self, renderer, settings).run()
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Author")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Author id={} name=\"{}\"]",
            self.id,
            self.name.as_deref().unwrap_or("")
        )
    }
}
