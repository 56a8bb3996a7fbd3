//! The HTTP renderer against a mock ACM server
//!
//! The renderer blocks, so every traversal runs on a blocking thread while the
//! mock server keeps serving on the runtime.

use crate::support::{bibtex_page, colleagues_page, papers_page, profile_page, SEED};
use acm_crawler::config::{RendererConfig, UserAgentConfig};
use acm_crawler::model::Author;
use acm_crawler::render::{HttpRenderer, Locator, PageRenderer};
use acm_crawler::storage::{GraphStore, SqliteGraphStore};
use acm_crawler::{CrawlError, TraversalSettings};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Mounts the seed author's four pages
async fn mount_seed_site(mock_server: &MockServer) {
    // Fetch-all view first so it wins over the plain profile
    Mock::given(method("GET"))
        .and(path("/author_page.cfm"))
        .and(query_param("id", SEED))
        .and(query_param("perpage", "1000"))
        .respond_with(html(papers_page(
            &[
                ("citation.cfm?id=999&CFID=1", "On Graphs"),
                ("citation.cfm?id=1000", "On Trees"),
            ],
            &format!("/exportformats.cfm?id={SEED}&expformat=bibtex"),
        )))
        .with_priority(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/author_page.cfm"))
        .and(query_param("id", SEED))
        .respond_with(html(profile_page(&format!("/colleagues.cfm?id={SEED}"))))
        .with_priority(2)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/colleagues.cfm"))
        .respond_with(html(colleagues_page(&[
            ("author_page.cfm?id=111&coll=DL", "Alice"),
            ("author_page.cfm?id=222&coll=DL", "Bob"),
        ])))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/exportformats.cfm"))
        .and(query_param("expformat", "bibtex"))
        .respond_with(html(bibtex_page(&[
            ("999", "@article{graphs}"),
            ("1000", "@article{trees}"),
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_traversal_over_http() {
    let mock_server = MockServer::start().await;
    mount_seed_site(&mock_server).await;
    let base_url = mock_server.uri();

    let store: Arc<dyn GraphStore> = Arc::new(SqliteGraphStore::open_in_memory().unwrap());
    let thread_store = Arc::clone(&store);

    let neighbors = tokio::task::spawn_blocking(move || -> acm_crawler::Result<_> {
        let renderer = HttpRenderer::new(&user_agent(), &RendererConfig::default())?;
        let settings =
            TraversalSettings::new(base_url).with_wait_timeout(Duration::from_secs(1));
        Author::new(SEED)?
            .with_store(thread_store)
            .neighbors(renderer, &settings)
    })
    .await
    .unwrap()
    .unwrap();

    let ids: Vec<&str> = neighbors.as_slice().iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["111", "222"]);

    let counts = store.counts().unwrap();
    assert_eq!(counts.papers, 2);
    assert_eq!(counts.associations, 2);
    assert_eq!(counts.bibtex, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_colleagues_link_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/author_page.cfm"))
        .respond_with(html("<html><body>Loading...</body></html>".to_string()))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || -> acm_crawler::Result<_> {
        let renderer = HttpRenderer::new(&user_agent(), &RendererConfig::default())?;
        let settings =
            TraversalSettings::new(base_url).with_wait_timeout(Duration::from_millis(600));
        Author::new(SEED)?.neighbors(renderer, &settings)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(CrawlError::Timeout { .. })));

    // The wait re-fetched the profile while polling
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.len() > 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || -> acm_crawler::Result<_> {
        let renderer = HttpRenderer::new(&user_agent(), &RendererConfig::default())?;
        Author::new(SEED)?.neighbors(renderer, &TraversalSettings::new(base_url))
    })
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(CrawlError::PageUnavailable { status: 503, .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_click_follows_relative_link() {
    let mock_server = MockServer::start().await;
    mount_seed_site(&mock_server).await;
    let profile_url = format!("{}/author_page.cfm?id={}", mock_server.uri(), SEED);

    let current = tokio::task::spawn_blocking(move || -> acm_crawler::Result<Option<String>> {
        let mut renderer = HttpRenderer::new(&user_agent(), &RendererConfig::default())?;
        renderer.load(&profile_url)?;
        let link = renderer.find_one(&Locator::link_text("See all colleagues of this author"))?;
        renderer.click(&link)?;
        Ok(renderer.current_url())
    })
    .await
    .unwrap()
    .unwrap();

    let current = current.unwrap();
    assert!(current.ends_with(&format!("/colleagues.cfm?id={}", SEED)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wait_stays_within_timeout_despite_delays() {
    let mock_server = MockServer::start().await;

    // First load is quick; every re-fetch hangs longer than the wait allows
    Mock::given(method("GET"))
        .and(path("/exportformats.cfm"))
        .respond_with(html("<p>Preparing export</p>".to_string()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exportformats.cfm"))
        .respond_with(
            html("<pre id=\"999\">@article{late}</pre>".to_string())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/exportformats.cfm?id={}", mock_server.uri(), SEED);
    let (elapsed, result) = tokio::task::spawn_blocking(move || -> acm_crawler::Result<_> {
        let config = RendererConfig {
            wait_timeout_secs: 10,
            page_delay_ms: 1500,
        };
        let mut renderer = HttpRenderer::new(&user_agent(), &config)?;
        renderer.load(&url)?;

        let started = std::time::Instant::now();
        let result =
            renderer.wait_until_present(&Locator::selector("pre"), Duration::from_millis(500));
        Ok((started.elapsed(), result))
    })
    .await
    .unwrap()
    .unwrap();

    assert!(elapsed < Duration::from_millis(1200), "wait took {elapsed:?}");
    let err = result.unwrap_err();
    assert!(matches!(err, CrawlError::Timeout { .. }));
    assert!(err.to_string().starts_with("Timed out after 500ms"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wait_rides_out_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exportformats.cfm"))
        .respond_with(html("<p>Preparing export</p>".to_string()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exportformats.cfm"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exportformats.cfm"))
        .respond_with(html("<pre id=\"999\">@article{ready}</pre>".to_string()))
        .mount(&mock_server)
        .await;

    let url = format!("{}/exportformats.cfm?id={}", mock_server.uri(), SEED);
    let texts = tokio::task::spawn_blocking(move || -> acm_crawler::Result<Vec<String>> {
        let mut renderer = HttpRenderer::new(&user_agent(), &RendererConfig::default())?;
        renderer.load(&url)?;
        let pre = Locator::selector("pre");
        renderer.wait_until_present(&pre, Duration::from_secs(5))?;
        Ok(renderer
            .find_all(&pre)?
            .iter()
            .map(|e| renderer.text(e))
            .collect())
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(texts, vec!["@article{ready}"]);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}
