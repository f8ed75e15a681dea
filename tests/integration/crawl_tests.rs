//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end through the real HTTP fetcher.

use std::collections::HashSet;
use std::time::Duration;
use sumi_seek::config::{Config, CrawlerConfig, OutputConfig};
use sumi_seek::crawler::{run_crawl, CrawlRun, Coordinator};
use sumi_seek::output::write_outputs;
use sumi_seek::state::PageState;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given depth and concurrency cap
fn create_test_config(max_depth: u32, max_concurrent: Option<u32>) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth,
            max_concurrent_pages_open: max_concurrent,
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

fn crawled_urls(run: &CrawlRun) -> HashSet<String> {
    run.report.records.iter().map(|r| r.url.clone()).collect()
}

#[tokio::test]
async fn test_off_origin_links_never_fetched() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Same port space, different host name
    let other_port = url::Url::parse(&other_server.uri())
        .expect("Failed to parse other URL")
        .port()
        .expect("Mock server has a port");

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<a href="/a">A</a> <a href="http://localhost:{}/b">B</a>"#,
            other_port
        ),
    )
    .await;
    mount_page(&mock_server, "/a", "plain page").await;

    Mock::given(method("GET"))
        .respond_with(html_page("should not be fetched"))
        .expect(0)
        .mount(&other_server)
        .await;

    let run = run_crawl(create_test_config(1, None), &format!("{}/", base_url), "page")
        .await
        .expect("Crawl failed");

    let expected: HashSet<String> = [format!("{}/", base_url), format!("{}/a", base_url)]
        .into_iter()
        .collect();
    assert_eq!(crawled_urls(&run), expected);

    let requests = other_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_cycle_visits_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/a">A</a>"#).await;
    mount_page(&mock_server, "/a", r#"<a href="/">home</a> <a href="/a#top">self</a>"#).await;

    let run = run_crawl(create_test_config(3, None), &format!("{}/", base_url), "home")
        .await
        .expect("Crawl failed");

    assert_eq!(run.report.records.len(), 2);
    assert_eq!(crawled_urls(&run).len(), 2);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_failed_pages_do_not_stop_the_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/broken">broken</a> <a href="/data">data</a> <a href="/ok">ok</a>"#,
    )
    .await;
    mount_page(&mock_server, "/ok", "the best code editor here").await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("code code code", "text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"text": "the best code editor here"}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    let run = run_crawl(create_test_config(2, None), &format!("{}/", base_url), "code")
        .await
        .expect("Crawl failed");

    let stats = &run.report.stats;
    assert_eq!(stats.pages_crawled(), 4);
    assert_eq!(stats.count(PageState::Processed), 2);
    assert_eq!(stats.count(PageState::HttpError), 1);
    assert_eq!(stats.count(PageState::ContentMismatch), 1);

    for record in &run.report.records {
        if record.url.ends_with("/ok") {
            assert_eq!(record.matches, vec!["the best code editor here".to_string()]);
        } else {
            assert!(record.matches.is_empty(), "{} should have no matches", record.url);
        }
    }
}

#[tokio::test]
async fn test_unreachable_root_yields_single_empty_record() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        listener.local_addr().expect("No local address").port()
    };

    let run = run_crawl(
        create_test_config(2, None),
        &format!("http://127.0.0.1:{}/", port),
        "rust",
    )
        .await
        .expect("Crawl failed");

    assert_eq!(run.report.records.len(), 1);
    assert!(run.report.records[0].matches.is_empty());
    assert_eq!(run.report.stats.count(PageState::Unreachable), 1);
}

#[tokio::test]
async fn test_keyword_with_regex_metacharacters() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "<p>we like C++ a lot</p><script>var c = 'c++ in script';</script>",
    )
    .await;

    let run = run_crawl(create_test_config(0, None), &format!("{}/", base_url), "c++")
        .await
        .expect("Crawl failed");

    assert_eq!(run.report.records.len(), 1);
    assert_eq!(run.report.records[0].matches, vec!["we like C++ a lot".to_string()]);
}

#[tokio::test]
async fn test_concurrency_cap_limits_in_flight_fetches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/one">1</a> <a href="/two">2</a> <a href="/three">3</a>"#,
    )
    .await;
    for route in ["/one", "/two", "/three"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page("leaf").set_delay(Duration::from_millis(50)))
            .mount(&mock_server)
            .await;
    }

    let root = format!("{}/", base_url);
    let capped = run_crawl(create_test_config(1, Some(1)), &root, "leaf")
        .await
        .expect("Crawl failed");
    let unbounded = run_crawl(create_test_config(1, None), &root, "leaf")
        .await
        .expect("Crawl failed");

    assert_eq!(capped.report.stats.peak_in_flight, 1);
    assert_eq!(unbounded.report.stats.peak_in_flight, 3);
    assert_eq!(crawled_urls(&capped), crawled_urls(&unbounded));
    assert_eq!(crawled_urls(&capped).len(), 4);
}

#[tokio::test]
async fn test_results_written_to_disk() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().expect("Failed to create temp dir");

    mount_page(&mock_server, "/", r#"<a href="/rust">rust</a> nothing here"#).await;
    mount_page(&mock_server, "/rust", "I write rust every single day of the week").await;

    let mut config = create_test_config(1, None);
    config.output = OutputConfig {
        results_path: dir.path().join("results.json").display().to_string(),
        summary_path: Some(dir.path().join("summary.md").display().to_string()),
    };
    let output_config = config.output.clone();

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let run = coordinator
        .run(&format!("{}/", base_url), "single")
        .await
        .expect("Crawl failed");

    let summary = write_outputs(&run, &output_config, None).expect("Failed to write outputs");
    assert_eq!(summary.pages_crawled, 2);
    assert_eq!(summary.pages_with_matches, 1);

    let json = std::fs::read_to_string(dir.path().join("results.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    let rust_page = entries
        .iter()
        .find(|entry| entry["url"] == format!("{}/rust", base_url))
        .expect("rust page missing from results");
    assert_eq!(rust_page["matches"][0], "rust every single day of");

    let markdown = std::fs::read_to_string(dir.path().join("summary.md")).unwrap();
    assert!(markdown.contains(&format!("### {}/rust", base_url)));
}
