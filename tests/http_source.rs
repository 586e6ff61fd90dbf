//! End-to-end poll cycles against a local metrics server

use axum::{http::header, http::StatusCode, routing::get, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use heapdash::core::{
    HttpMetricsSource, MetricsPoller, MetricsSource, Page, PollOutcome, TargetName, Unavailable,
};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn source(endpoint: &str) -> Arc<HttpMetricsSource> {
    Arc::new(HttpMetricsSource::new(endpoint, Duration::from_millis(500)).unwrap())
}

fn full_page() -> Page {
    Page::with_elements(TargetName::ALL.map(|name| name.as_str()))
}

fn shown(page: &Page) -> (String, String, String, String) {
    let text = |name: TargetName| page.element(name.as_str()).unwrap().text;
    (
        text(TargetName::HeapUsed),
        text(TargetName::HeapMax),
        page.element("heap-bar").unwrap().width,
        text(TargetName::ThreadCount),
    )
}

fn degraded() -> (String, String, String, String) {
    ("—".into(), "—".into(), "0%".into(), "—".into())
}

#[tokio::test]
async fn test_success_renders_snapshot() {
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(|| async {
            (
                [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                r#"{"heapUsed":512,"heapMax":2048,"threadCount":12}"#,
            )
        }),
    ))
    .await;

    let page = full_page();
    let poller = MetricsPoller::init(&page, source(&endpoint)).unwrap();

    assert_eq!(poller.poll().await, PollOutcome::Rendered);
    assert_eq!(
        shown(&page),
        ("512 B".into(), "2.0 KB".into(), "25%".into(), "12".into())
    );
    assert_eq!(page.element("thread-spark").unwrap().text, "12");
}

#[tokio::test]
async fn test_trailing_slash_endpoint() {
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(|| async { r#"{"heapUsed":2097152,"heapMax":4194304}"# }),
    ))
    .await;

    let source = source(&format!("{}/", endpoint));
    assert_eq!(source.url(), format!("{}/api/metrics", endpoint));

    let snapshot = source.fetch().await.unwrap();
    assert_eq!(snapshot.heap_used, 2097152);
    assert_eq!(snapshot.thread_count, None);
}

#[tokio::test]
async fn test_server_error_degrades_without_reading_body() {
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"heapUsed":512,"heapMax":2048,"threadCount":12}"#,
            )
        }),
    ))
    .await;

    let source = source(&endpoint);
    match source.fetch().await {
        Err(Unavailable::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected a status failure, got {:?}", other),
    }

    let page = full_page();
    let poller = MetricsPoller::init(&page, source).unwrap();
    assert_eq!(poller.poll().await, PollOutcome::Degraded);
    assert_eq!(shown(&page), degraded());
}

#[tokio::test]
async fn test_not_found_degrades() {
    let endpoint = serve(Router::new()).await;

    let page = full_page();
    let poller = MetricsPoller::init(&page, source(&endpoint)).unwrap();
    assert_eq!(poller.poll().await, PollOutcome::Degraded);
    assert_eq!(shown(&page), degraded());
}

#[tokio::test]
async fn test_malformed_body_degrades() {
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(|| async { "<h1>maintenance</h1>" }),
    ))
    .await;

    let source = source(&endpoint);
    assert!(matches!(source.fetch().await, Err(Unavailable::Malformed(_))));

    let page = full_page();
    let poller = MetricsPoller::init(&page, source).unwrap();
    assert_eq!(poller.poll().await, PollOutcome::Degraded);
    assert_eq!(shown(&page), degraded());
}

#[tokio::test]
async fn test_array_body_degrades() {
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(|| async {
            (
                [(header::CONTENT_TYPE, "application/json")],
                "[1048576, 2097152, 7]",
            )
        }),
    ))
    .await;

    let source = source(&endpoint);
    assert!(matches!(source.fetch().await, Err(Unavailable::Malformed(_))));

    let page = full_page();
    let poller = MetricsPoller::init(&page, source).unwrap();
    assert_eq!(poller.poll().await, PollOutcome::Degraded);
    assert_eq!(shown(&page), degraded());
}

#[tokio::test]
async fn test_connection_refused_degrades() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = source(&format!("http://{}", addr));
    assert!(matches!(source.fetch().await, Err(Unavailable::Network(_))));

    let page = full_page();
    let poller = MetricsPoller::init(&page, source).unwrap();
    assert_eq!(poller.poll().await, PollOutcome::Degraded);
    assert_eq!(shown(&page), degraded());
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    ))
    .await;

    let page = full_page();
    let poller = MetricsPoller::init(&page, source(&endpoint)).unwrap();
    assert_eq!(poller.poll().await, PollOutcome::Degraded);
    assert_eq!(shown(&page), degraded());
}

#[tokio::test]
async fn test_failure_after_success_clears_display() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    (StatusCode::OK, r#"{"heapUsed":1536,"heapMax":3072,"threadCount":40}"#)
                } else {
                    (StatusCode::SERVICE_UNAVAILABLE, "")
                }
            }
        }),
    ))
    .await;

    let page = full_page();
    let poller = MetricsPoller::init(&page, source(&endpoint)).unwrap();

    assert_eq!(poller.poll().await, PollOutcome::Rendered);
    assert_eq!(
        shown(&page),
        ("1.5 KB".into(), "3.0 KB".into(), "50%".into(), "40".into())
    );

    assert_eq!(poller.poll().await, PollOutcome::Degraded);
    assert_eq!(shown(&page), degraded());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_page_without_dashboard_never_requests() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let endpoint = serve(Router::new().route(
        "/api/metrics",
        get(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { "{}" }
        }),
    ))
    .await;

    let page = Page::with_elements(["heap-max", "thread-count", "thread-spark"]);
    assert!(MetricsPoller::init(&page, source(&endpoint)).is_none());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(page.element("heap-max").unwrap().text, "");
}
