//! End-to-end traversals of one author against canned pages

use crate::support::{seed_site, RecordingStore, StoreCall, BASE, SEED};
use acm_crawler::crawler::TraversalStage;
use acm_crawler::model::Author;
use acm_crawler::render::MemoryRenderer;
use acm_crawler::storage::{GraphStore, SqliteGraphStore};
use acm_crawler::{CrawlError, TraversalSettings};
use std::sync::Arc;

fn settings() -> TraversalSettings {
    TraversalSettings::new(BASE)
}

#[test]
fn test_two_colleagues_without_store() {
    let seed = Author::new(SEED).unwrap();
    let neighbors = seed.neighbors(seed_site(), &settings()).unwrap();

    let found: Vec<(String, Option<String>)> = neighbors
        .map(|a| (a.id().to_string(), a.name().map(str::to_string)))
        .collect();
    assert_eq!(
        found,
        vec![
            ("111".to_string(), Some("Alice".to_string())),
            ("222".to_string(), Some("Bob".to_string())),
        ]
    );
}

#[test]
fn test_without_store_only_colleague_pages_are_loaded() {
    let mut site = seed_site();
    let seed = Author::new(SEED).unwrap();
    seed.neighbors(&mut site, &settings()).unwrap();

    assert_eq!(
        site.history(),
        &[
            format!("{BASE}/author_page.cfm?id={SEED}"),
            format!("{BASE}/colleagues.cfm?id={SEED}"),
        ]
    );
}

#[test]
fn test_new_paper_is_stored_and_associated() {
    let store = Arc::new(RecordingStore::new());
    let seed = Author::new(SEED).unwrap().with_store(store.clone());

    let neighbors = seed.neighbors(seed_site(), &settings()).unwrap();
    assert_eq!(neighbors.len(), 2);

    assert_eq!(
        store.calls(),
        vec![
            StoreCall::AddAuthor("111".to_string(), Some("Alice".to_string())),
            StoreCall::AddAuthor("222".to_string(), Some("Bob".to_string())),
            StoreCall::AddPaper("999".to_string(), "On Graphs".to_string()),
            StoreCall::Associate(SEED.to_string(), "999".to_string()),
            StoreCall::AddBibtex(
                "999".to_string(),
                "@article{graphs, title={On Graphs}}".to_string()
            ),
        ]
    );
}

#[test]
fn test_known_paper_skips_association() {
    let store = Arc::new(RecordingStore::new().with_known_papers(&["999"]));
    let seed = Author::new(SEED).unwrap().with_store(store.clone());

    let neighbors = seed.neighbors(seed_site(), &settings()).unwrap();

    assert!(store.associations().is_empty());
    assert_eq!(neighbors.report().papers_found, 1);
    assert_eq!(neighbors.report().papers_added, 0);
    // BibTeX is still collected for known papers
    assert_eq!(store.counts().unwrap().bibtex, 1);
}

#[test]
fn test_neighbors_share_the_store() {
    let store: Arc<dyn GraphStore> = Arc::new(SqliteGraphStore::open_in_memory().unwrap());
    let seed = Author::new(SEED).unwrap().with_store(Arc::clone(&store));

    let neighbors = seed.neighbors(seed_site(), &settings()).unwrap();

    for neighbor in neighbors {
        let attached = neighbor.store().unwrap();
        assert!(Arc::ptr_eq(attached, &store));
    }
}

#[test]
fn test_colleague_store_failure_is_not_fatal() {
    let store = Arc::new(RecordingStore::new().failing_author("111"));
    let seed = Author::new(SEED).unwrap().with_store(store.clone());

    let neighbors = seed.neighbors(seed_site(), &settings()).unwrap();

    // The neighbor is still yielded, and later stages still run
    assert_eq!(neighbors.len(), 2);
    assert_eq!(store.associations().len(), 1);
}

#[test]
fn test_paper_store_failure_propagates() {
    let store = Arc::new(RecordingStore::new().failing_paper("999"));
    let seed = Author::new(SEED).unwrap().with_store(store.clone());

    let err = seed.neighbors(seed_site(), &settings()).unwrap_err();

    assert!(matches!(err, CrawlError::Storage(_)));
    assert!(store.associations().is_empty());
}

#[test]
fn test_sqlite_round_trip() {
    let store: Arc<dyn GraphStore> = Arc::new(SqliteGraphStore::open_in_memory().unwrap());
    let seed = Author::new(SEED).unwrap().with_store(Arc::clone(&store));

    seed.neighbors(seed_site(), &settings()).unwrap();
    // A second traversal finds nothing new
    let again = seed.neighbors(seed_site(), &settings()).unwrap();
    assert_eq!(again.len(), 2);
    assert_eq!(again.report().papers_added, 0);
    assert_eq!(again.report().bibtex_stored, 0);

    let authors = store.list_all_authors().unwrap();
    let ids: Vec<&str> = authors.iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["111", "222", SEED]);
    assert_eq!(
        store.list_all_bibtex().unwrap(),
        vec!["@article{graphs, title={On Graphs}}"]
    );
    assert_eq!(store.list_papers_for_author(SEED).unwrap().len(), 1);
}

#[test]
fn test_rewind_replays_without_fetching() {
    let mut site = seed_site();
    let seed = Author::new(SEED).unwrap();
    let mut neighbors = seed.neighbors(&mut site, &settings()).unwrap();

    let first: Vec<Author> = neighbors.by_ref().collect();
    neighbors.rewind();
    let second: Vec<Author> = neighbors.by_ref().collect();

    assert_eq!(first, second);
    assert_eq!(site.history().len(), 2);
}

#[test]
fn test_remove_is_unsupported() {
    let seed = Author::new(SEED).unwrap();
    let mut neighbors = seed.neighbors(seed_site(), &settings()).unwrap();
    neighbors.next();

    assert!(matches!(
        neighbors.remove_current(),
        Err(CrawlError::Unsupported(_))
    ));
}

#[test]
fn test_missing_profile_page() {
    let seed = Author::new("404").unwrap();
    let err = seed
        .neighbors(MemoryRenderer::new(), &settings())
        .unwrap_err();

    assert!(matches!(err, CrawlError::PageUnavailable { status: 404, .. }));
}

#[test]
fn test_stage_sequence_is_fixed() {
    let mut stage = TraversalStage::Start;
    let mut order = Vec::new();
    while let Some(next) = stage.next() {
        stage = stage.transition(next).unwrap();
        order.push(stage.as_str());
    }
    assert_eq!(
        order,
        vec!["colleagues_fetched", "papers_fetched", "bibtex_fetched", "done"]
    );
}
