//! Integration tests for the crawler
//!
//! These tests use wiremock to serve small sites and run the full
//! fetch, extract and traverse cycle against them.

use sumi_atlas::config::{Config, StorePolicy};
use sumi_atlas::crawler::{crawl, Crawler};
use sumi_atlas::output::{format_report, CrawlSummary};
use sumi_atlas::state::PageState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page that must be requested exactly once
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn urls(registry: &sumi_atlas::Registry) -> Vec<String> {
    registry.iter().map(|p| p.url().to_string()).collect()
}

#[tokio::test]
async fn test_full_crawl_discovery_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<html><head>
            <link rel="stylesheet" href="1.css">
            <script src="1.js"></script>
        </head><body>
            <a href="1.html">One</a>
            <a href="2.html">Two</a>
            <a href="404.html">Missing</a>
            <img src="1.png">
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/1.html",
        r#"<a href="2.html">Two</a><a href="/">Home</a>"#,
    )
    .await;
    mount_page(&server, "/2.html", r#"<a href="1.html">One</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/404.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let registry = crawl(&Config::default(), &seed)
        .await
        .expect("crawl should start");

    assert_eq!(
        urls(&registry),
        vec![
            seed.clone(),
            format!("{}/1.html", base),
            format!("{}/2.html", base),
            format!("{}/404.html", base),
        ]
    );

    let home = registry.get(&seed).unwrap();
    assert_eq!(home.state(), PageState::Processed);
    assert_eq!(home.status_code(), Some(200));
    assert_eq!(home.links().len(), 3);
    assert_eq!(home.images(), &[format!("{}/1.png", base)]);
    assert_eq!(home.stylesheets(), &[format!("{}/1.css", base)]);
    assert_eq!(home.scripts(), &[format!("{}/1.js", base)]);

    let missing = registry.get(&format!("{}/404.html", base)).unwrap();
    assert_eq!(missing.state(), PageState::DeadLink);
    assert_eq!(missing.status_code(), Some(404));
    assert!(missing.links().is_empty());
}

#[tokio::test]
async fn test_mutual_links_visited_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/a.html", r#"<a href="b.html">B</a>"#).await;
    mount_page(&server, "/b.html", r#"<a href="a.html">A</a>"#).await;

    let seed = format!("{}/a.html", base);
    let registry = crawl(&Config::default(), &seed).await.unwrap();

    assert_eq!(urls(&registry), vec![seed, format!("{}/b.html", base)]);
    assert!(registry.iter().all(|p| p.state() == PageState::Processed));
}

#[tokio::test]
async fn test_off_host_links_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="http://www.example.invalid/page">Elsewhere</a>
           <img src="http://cdn.example.invalid/logo.png">"#,
    )
    .await;

    let seed = format!("{}/", base);
    let registry = crawl(&Config::default(), &seed).await.unwrap();

    assert_eq!(registry.len(), 1);
    let home = registry.get(&seed).unwrap();
    assert!(home.links().is_empty());
    assert_eq!(home.images(), &["http://cdn.example.invalid/logo.png"]);
}

#[tokio::test]
async fn test_absolute_same_host_link_kept_as_written() {
    let server = MockServer::start().await;
    let base = server.uri();

    // Two spellings of the same page are two distinct registry keys
    let written = format!("{}/a/../target.html", base);
    mount_page(
        &server,
        "/",
        &format!(r#"<a href="{}">Dotted</a><a href="target.html">Plain</a>"#, written),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/target.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>target</p>"))
        .expect(2)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let registry = crawl(&Config::default(), &seed).await.unwrap();

    assert_eq!(
        urls(&registry),
        vec![seed, written, format!("{}/target.html", base)]
    );
}

#[tokio::test]
async fn test_resolved_policy_unifies_spellings() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &format!(
            r#"<a href="{}/a/../target.html">Dotted</a><a href="target.html">Plain</a>"#,
            base
        ),
    )
    .await;
    mount_page(&server, "/target.html", "<p>target</p>").await;

    let mut config = Config::default();
    config.crawler.store_policy = StorePolicy::Resolved;

    let seed = format!("{}/", base);
    let registry = crawl(&config, &seed).await.unwrap();

    assert_eq!(urls(&registry), vec![seed, format!("{}/target.html", base)]);
}

#[tokio::test]
async fn test_stylesheet_rel_case_insensitive() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<link REL="StyleSheet" href="main.css">
           <link rel="icon" href="favicon.ico">"#,
    )
    .await;

    let seed = format!("{}/", base);
    let registry = crawl(&Config::default(), &seed).await.unwrap();

    let home = registry.get(&seed).unwrap();
    assert_eq!(home.stylesheets(), &[format!("{}/main.css", base)]);
}

#[tokio::test]
async fn test_server_error_leaves_page_empty() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="broken.html">Broken</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/broken.html"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"<a href="never.html">Never</a>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let registry = crawl(&Config::default(), &seed).await.unwrap();

    assert_eq!(registry.len(), 2);
    let broken = registry.get(&format!("{}/broken.html", base)).unwrap();
    assert_eq!(broken.state(), PageState::HttpError);
    assert_eq!(broken.status_code(), Some(500));
    assert!(broken.links().is_empty());
    assert!(registry.get(&format!("{}/never.html", base)).is_none());
}

#[tokio::test]
async fn test_redirect_followed_and_resolved_against_request() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/old/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new/", base).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/new/", r#"<img src="pic.png">"#).await;

    let seed = format!("{}/old/", base);
    let registry = crawl(&Config::default(), &seed).await.unwrap();

    let page = registry.get(&seed).unwrap();
    assert_eq!(page.state(), PageState::Processed);
    assert_eq!(page.images(), &[format!("{}/old/pic.png", base)]);
}

#[tokio::test]
async fn test_unreachable_seed() {
    // Nothing listens on port 1
    let seed = "http://127.0.0.1:1/";
    let registry = crawl(&Config::default(), seed).await.unwrap();

    assert_eq!(registry.len(), 1);
    let page = registry.get(seed).unwrap();
    assert_eq!(page.state(), PageState::Unreachable);
    assert!(page.error().is_some());
}

#[tokio::test]
async fn test_invalid_seed_rejected() {
    let result = crawl(&Config::default(), "ftp://localhost/").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_report_for_crawled_site() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="leaf.html">Leaf</a>"#).await;
    mount_page(&server, "/leaf.html", "<p>leaf</p>").await;

    let seed = format!("{}/", base);
    let crawler = Crawler::new(&Config::default()).unwrap();
    let registry = crawler.run(&seed).await;

    let expected = format!(
        "URL: {base}/
    Links(1):
        {base}/leaf.html
    Images(0):
    Style Sheets(0):
    Script Files(0):
URL: {base}/leaf.html
    Links(0):
    Images(0):
    Style Sheets(0):
    Script Files(0):
",
        base = base
    );
    assert_eq!(format_report(&registry), expected);

    let seed_url = url::Url::parse(&seed).unwrap();
    let now = chrono::Utc::now();
    let summary = CrawlSummary::new(&seed_url, now, now, &registry);
    assert_eq!(summary.statistics.total_pages, 2);
    assert_eq!(summary.statistics.failed_pages(), 0);
}
