//! Integration tests for the scraper
//!
//! These tests use wiremock to serve listing pages and run the full
//! fetch → extract → export cycle end-to-end through the real HTTP fetcher.

use coinafrique_harvest::catalog::{Category, CategoryRegistry};
use coinafrique_harvest::config::{Config, SelectorConfig};
use coinafrique_harvest::crawler::{
    coordinator_from_config, ChannelProgress, Coordinator, Extractor, HttpFetcher, ListingRecord,
    ProgressEvent, ScrapeSettings,
};
use coinafrique_harvest::output::to_delimited_text;
use coinafrique_harvest::state::{EmptyPageReason, PageOutcome};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATEGORY_PATH: &str = "/categorie/moutons";

/// Browser-style agent without commas, so wiremock's header matcher compares it whole
const TEST_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) TestBrowser/1.0";

/// Renders a results page with one card per `(name, price)` pair
fn listing_page(cards: &[(&str, &str)]) -> String {
    let body: String = cards
        .iter()
        .enumerate()
        .map(|(i, (name, price))| {
            format!(
                r#"<div class="col s6 m4 l3">
                    <div class="card ad__card">
                        <img class="ad__card-img" src="https://images.coinafrique.com/{}.jpg">
                        <p class="ad__card-description">{}</p>
                        <p class="ad__card-price">{}</p>
                        <p class="ad__card-location">Dakar, Sénégal</p>
                    </div>
                </div>"#,
                i, name, price
            )
        })
        .collect();
    format!(
        r#"<html><head><title>Moutons</title></head><body><div class="row">{}</div></body></html>"#,
        body
    )
}

/// Creates a coordinator whose single category points at the mock server
fn create_test_coordinator(base_url: &str) -> Coordinator<HttpFetcher> {
    let category = Category::new(
        "Les Moutons",
        Url::parse(&format!("{}{}", base_url, CATEGORY_PATH)).expect("Failed to parse base URL"),
        "mouton",
    );

    Coordinator::new(
        HttpFetcher::new(TEST_USER_AGENT, Duration::from_secs(5))
            .expect("Failed to build fetcher"),
        Extractor::from_config(&SelectorConfig::default()).expect("Failed to compile selectors"),
        CategoryRegistry::new(vec![category]).expect("Failed to build registry"),
        ScrapeSettings {
            politeness_delay: Duration::from_millis(10), // Very short for testing
        },
    )
}

async fn mount_page(server: &MockServer, page: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param("page", page))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_scrape_multiple_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "1",
        ResponseTemplate::new(200).set_body_string(listing_page(&[
            ("Bélier", "50000 FCFA"),
            ("Brebis", "35000 FCFA"),
            ("Agneau", "20000 FCFA"),
        ])),
    )
    .await;
    mount_page(
        &mock_server,
        "2",
        ResponseTemplate::new(200).set_body_string(listing_page(&[
            ("Ladoum", "900000 FCFA"),
            ("Touabir", "120000 FCFA"),
        ])),
    )
    .await;

    let coordinator = create_test_coordinator(&mock_server.uri());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut sink = ChannelProgress(tx);

    let run = coordinator
        .run("Les Moutons", 2, &mut sink)
        .await
        .expect("Scrape failed");
    drop(sink);

    let names: Vec<&str> = run.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bélier", "Brebis", "Agneau", "Ladoum", "Touabir"]);
    assert!(run.records[..3].iter().all(|r| r.source_page == 1));
    assert!(run.records[3..].iter().all(|r| r.source_page == 2));
    assert_eq!(run.records[0].address_text, "Dakar, Sénégal");
    assert_eq!(
        run.records[0].image_url,
        "https://images.coinafrique.com/0.jpg"
    );

    let mut completed = Vec::new();
    while let Some(event) = rx.recv().await {
        if let ProgressEvent::PageCompleted { page, total, .. } = event {
            completed.push((page, total));
        }
    }
    assert_eq!(completed, vec![(1, 2), (2, 2)]);

    // The export parses back into the same records
    let bytes = to_delimited_text(&run.records).expect("Export failed");
    let parsed: Vec<ListingRecord> = csv::Reader::from_reader(bytes.as_slice())
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("Failed to read export");
    assert_eq!(parsed, run.records);
}

#[tokio::test]
async fn test_server_error_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "1",
        ResponseTemplate::new(200).set_body_string(listing_page(&[("Bélier", "50000 FCFA")])),
    )
    .await;
    mount_page(&mock_server, "2", ResponseTemplate::new(500)).await;
    mount_page(
        &mock_server,
        "3",
        ResponseTemplate::new(200).set_body_string(listing_page(&[("Brebis", "30000 FCFA")])),
    )
    .await;

    let coordinator = create_test_coordinator(&mock_server.uri());
    let mut events = Vec::new();
    let mut sink = |event: &ProgressEvent| events.push(event.clone());

    let run = coordinator
        .run("Les Moutons", 3, &mut sink)
        .await
        .expect("Scrape failed");

    let pages: Vec<u32> = run.records.iter().map(|r| r.source_page).collect();
    assert_eq!(pages, vec![1, 3]);
    assert_eq!(run.failed_pages.len(), 1);
    assert!(run.failed_pages[&2].contains("500"));
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::PageFailed { page: 2, .. })));

    // Wiremock verifies the `expect(1)` on every page when the server drops
}

#[tokio::test]
async fn test_markup_change_yields_empty_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><ul class="results"><li class="new-card">Bélier</li></ul></body></html>"#,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    let coordinator = create_test_coordinator(&mock_server.uri());
    let run = coordinator
        .run("Les Moutons", 2, &mut |_: &ProgressEvent| {})
        .await
        .expect("Scrape failed");

    assert!(run.is_empty());
    assert!(run.failed_pages.is_empty());
    assert_eq!(
        run.outcomes.values().cloned().collect::<Vec<_>>(),
        vec![
            PageOutcome::Empty(EmptyPageReason::MarkupChanged),
            PageOutcome::Empty(EmptyPageReason::MarkupChanged),
        ]
    );
}

#[tokio::test]
async fn test_coordinator_from_config() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "1",
        ResponseTemplate::new(200).set_body_string(listing_page(&[("Bélier", "50000 FCFA")])),
    )
    .await;

    let toml = format!(
        r#"
[scraper]
politeness-delay-ms = 0
max-pages = 2

[user-agent]
value = "{}"

[[category]]
label = "Les Moutons"
url = "{}{}"
type = "mouton"
"#,
        TEST_USER_AGENT,
        mock_server.uri(),
        CATEGORY_PATH
    );
    let config: Config = toml::from_str(&toml).expect("Failed to parse config");
    coinafrique_harvest::config::validate(&config).expect("Invalid config");

    let coordinator = coordinator_from_config(&config).expect("Failed to build coordinator");
    assert_eq!(coordinator.registry().len(), 1);

    let run = coordinator
        .run("Les Moutons", 1, &mut |_: &ProgressEvent| {})
        .await
        .expect("Scrape failed");
    assert_eq!(run.records.len(), 1);
    assert_eq!(run.records[0].category_label, "Les Moutons");
}
