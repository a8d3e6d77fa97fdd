//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use contact_sieve::config::Config;
use contact_sieve::crawler::Coordinator;
use contact_sieve::output::{write_results, OutputFormat, RunInfo};
use contact_sieve::state::PageStatus;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no delay between requests
fn create_test_config(max_pages: u32, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.request_delay = 0.0;
    config.crawler.max_pages = max_pages;
    config.crawler.max_depth = max_depth;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>test page</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

async fn run_crawl(config: Config, seeds: &[String]) -> Vec<contact_sieve::PageResult> {
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.crawl(seeds).await
}

fn urls(results: &[contact_sieve::PageResult]) -> Vec<String> {
    results.iter().map(|r| r.url.clone()).collect()
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /private/", 1).await;
    mount_page(
        &server,
        "/",
        r#"<a href="/private/staff">Private</a> <a href="/contact">Contact</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/private/staff", "hidden@example.com", 0).await;
    mount_page(&server, "/contact", "hello@example.com", 1).await;

    let results = run_crawl(create_test_config(10, 2), &[format!("{}/", base)]).await;

    assert_eq!(urls(&results), vec![format!("{}/", base), format!("{}/contact", base)]);
    assert!(results
        .iter()
        .flat_map(|r| &r.records)
        .all(|rec| rec.email != "hidden@example.com"));
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /private/", 0).await;
    mount_page(&server, "/", r#"<a href="/private/staff">Private</a>"#, 1).await;
    mount_page(&server, "/private/staff", "hidden@example.com", 1).await;

    let mut config = create_test_config(10, 2);
    config.crawler.respect_robots = false;
    let results = run_crawl(config, &[base.clone()]).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[1].records[0].email, "hidden@example.com");
}

#[tokio::test]
async fn test_robots_fetched_once_per_origin() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nAllow: /", 1).await;
    mount_page(
        &server,
        "/",
        r#"<a href="/a">A</a> <a href="/b">B</a> <a href="/c">C</a>"#,
        1,
    )
    .await;
    for route in ["/a", "/b", "/c"] {
        mount_page(&server, route, "nothing here", 1).await;
    }

    let results = run_crawl(create_test_config(10, 2), &[base.clone()]).await;
    assert_eq!(results.len(), 4);
}

#[tokio::test]
async fn test_request_delay_spaces_robots_and_page_fetches() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nAllow: /", 1).await;
    mount_page(&server, "/", r#"<a href="/a">A</a>"#, 1).await;
    mount_page(&server, "/a", "nothing here", 1).await;

    let mut config = create_test_config(10, 1);
    config.crawler.request_delay = 0.2;

    let started = Instant::now();
    let results = run_crawl(config, &[format!("{}/", base)]).await;
    let elapsed = started.elapsed();

    // robots.txt, then two pages: two full gaps
    assert_eq!(urls(&results), vec![format!("{}/", base), format!("{}/a", base)]);
    assert!(
        elapsed >= Duration::from_millis(400),
        "three requests finished in {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_robots_server_error_fails_open() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/", r#"<a href="/private/x">X</a>"#, 1).await;
    mount_page(&server, "/private/x", "ok@example.com", 1).await;

    let results = run_crawl(create_test_config(10, 2), &[base.clone()]).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.status.is_success()));
}

#[tokio::test]
async fn test_page_budget_limits_fetches() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/a">A</a> <a href="/b">B</a> <a href="/c">C</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", "", 1).await;
    mount_page(&server, "/b", "", 0).await;
    mount_page(&server, "/c", "", 0).await;

    let results = run_crawl(create_test_config(2, 2), &[base.clone()]).await;

    assert_eq!(urls(&results), vec![format!("{}/", base), format!("{}/a", base)]);
}

#[tokio::test]
async fn test_depth_limit_stops_discovery() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/one">One</a>"#, 1).await;
    mount_page(&server, "/one", r#"<a href="/two">Two</a>"#, 1).await;
    mount_page(&server, "/two", "", 0).await;

    let results = run_crawl(create_test_config(10, 1), &[base.clone()]).await;
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/contact">Contact</a>"#, 1).await;
    mount_page(&server, "/contact", "", 0).await;

    let results = run_crawl(create_test_config(10, 0), &[base.clone()]).await;
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_failed_page_recorded_and_crawl_continues() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">Missing</a> <a href="/present">Present</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/present", "found@example.com", 1).await;

    let results = run_crawl(create_test_config(10, 2), &[base.clone()]).await;

    assert_eq!(results.len(), 3);
    let missing = &results[1];
    assert_eq!(missing.url, format!("{}/missing", base));
    assert_eq!(
        missing.status,
        PageStatus::Error("HTTP 404 Not Found".to_string())
    );
    assert!(missing.records.is_empty());
    assert_eq!(missing.page_title, "");
    assert_eq!(results[2].records[0].email, "found@example.com");
}

#[tokio::test]
async fn test_priority_links_visited_first() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/blog">Blog</a> <a href="/news">News</a> <a href="/our-team">Team</a>"#,
        1,
    )
    .await;
    for route in ["/blog", "/news", "/our-team"] {
        mount_page(&server, route, "", 1).await;
    }

    let results = run_crawl(create_test_config(10, 2), &[base.clone()]).await;

    assert_eq!(
        urls(&results),
        vec![
            format!("{}/", base),
            format!("{}/our-team", base),
            format!("{}/blog", base),
            format!("{}/news", base),
        ]
    );
}

#[tokio::test]
async fn test_regular_links_capped_per_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/p1">1</a> <a href="/p2">2</a> <a href="/p3">3</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/p1", "", 1).await;
    mount_page(&server, "/p2", "", 1).await;
    mount_page(&server, "/p3", "", 0).await;

    let mut config = create_test_config(10, 1);
    config.crawler.max_regular_links = 2;
    let results = run_crawl(config, &[base.clone()]).await;

    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_off_origin_links_not_followed() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &format!(r#"<a href="{}/contact">Elsewhere</a>"#, other.uri()),
        1,
    )
    .await;
    mount_page(&other, "/contact", "", 0).await;

    let results = run_crawl(create_test_config(10, 2), &[base.clone()]).await;
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_contacts_extracted_across_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/staff">staff</a>
        <div class="contact">Jane Doe jane.doe@example.com</div>
        <p>unrelated text random@spam.test</p>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/staff",
        r#"<script type="application/ld+json">
            {"@type":"Person","name":"Jane Doe","email":"mailto:JANE@EXAMPLE.ORG"}
        </script>
        <div class="staff-list">Mark Twain jane@example.org</div>"#,
        1,
    )
    .await;

    let results = run_crawl(create_test_config(10, 2), &[base.clone()]).await;
    assert_eq!(results.len(), 2);

    let home: Vec<(&str, &str)> = results[0]
        .records
        .iter()
        .map(|r| (r.email.as_str(), r.name_str()))
        .collect();
    assert_eq!(
        home,
        vec![("jane.doe@example.com", "Jane Doe"), ("random@spam.test", "")]
    );
    assert_eq!(results[0].page_title, "test page");

    assert_eq!(results[1].records.len(), 1);
    assert_eq!(results[1].records[0].email, "jane@example.org");
    assert_eq!(results[1].records[0].name.as_deref(), Some("Jane Doe"));
}

#[tokio::test]
async fn test_seeds_grouped_by_origin() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    mount_page(&first, "/", "", 1).await;
    mount_page(&first, "/about", "", 1).await;
    mount_page(&second, "/", "", 1).await;

    let seeds = vec![
        format!("{}/", first.uri()),
        format!("{}/", second.uri()),
        format!("{}/about", first.uri()),
    ];
    let results = run_crawl(create_test_config(10, 0), &seeds).await;

    assert_eq!(
        urls(&results),
        vec![
            format!("{}/", first.uri()),
            format!("{}/about", first.uri()),
            format!("{}/", second.uri()),
        ]
    );
}

#[tokio::test]
async fn test_single_page_mode_does_not_follow_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /private/", 1).await;
    mount_page(&server, "/a", r#"<a href="/contact">Contact</a> a@example.com"#, 1).await;
    mount_page(&server, "/b", "b@example.com", 1).await;
    mount_page(&server, "/contact", "", 0).await;
    mount_page(&server, "/private/c", "", 0).await;

    let mut coordinator = Coordinator::new(create_test_config(10, 2)).unwrap();
    let results = coordinator
        .scrape_pages(&[
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/a#top", base),
            format!("{}/private/c", base),
        ])
        .await;

    assert_eq!(urls(&results), vec![format!("{}/a", base), format!("{}/b", base)]);
    assert_eq!(results[0].records[0].email, "a@example.com");
}

#[tokio::test]
async fn test_stop_signal_prevents_fetches() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "", 0).await;

    let mut coordinator = Coordinator::new(create_test_config(10, 2)).unwrap();
    coordinator.stop_handle().store(true, Ordering::SeqCst);
    let results = coordinator.crawl(&[server.uri()]).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_crawl_results_written_to_csv() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", "Jane Doe jane@example.com", 1).await;

    let results = run_crawl(create_test_config(10, 0), &[base.clone()]).await;

    let dir = tempfile::tempdir().unwrap();
    let run = RunInfo {
        started_at: chrono::Utc::now(),
        config_hash: None,
    };
    let path = write_results(
        dir.path(),
        "scraped_emails",
        OutputFormat::Csv,
        &results,
        &run,
    )
    .unwrap();
    let contents = std::fs::read_to_string(path).unwrap();

    assert_eq!(
        contents,
        format!(
            "url,page_title,email,name,status\n{}/,test page,jane@example.com,Jane Doe,success\n",
            base
        )
    );
}
