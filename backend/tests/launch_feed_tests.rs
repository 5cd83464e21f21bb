//! Tests for the HTTP launch feed client and conflict checks against a live feed.

mod support;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;

use launch_booking::db::repositories::LocalRepository;
use launch_booking::services::{
    ConflictResolver, FeedError, HttpLaunchFeed, LaunchFeed, Rejection, RejectionKind,
};
use support::{booking_request, christmas_2049, closed_port_url, launch, FakeFeed};

fn http_feed(url: String) -> HttpLaunchFeed {
    HttpLaunchFeed::new(url, Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_fetches_and_decodes_records() {
    let server = FakeFeed::with_records(&[
        launch("pad-a", "2049-12-25T10:00:00Z", "1"),
        launch("pad-b", "2049-12-26T10:00:00+02:00", "2"),
    ])
    .await;

    let records = http_feed(server.url()).fetch_launches().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].launchpad, "pad-b");
    assert_eq!(records[1].date_local, "2049-12-26T10:00:00+02:00");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = FakeFeed::serve(StatusCode::SERVICE_UNAVAILABLE, "[]".to_string()).await;
    let err = http_feed(server.url()).fetch_launches().await.unwrap_err();
    assert!(matches!(err, FeedError::Status(code) if code == StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn test_undecodable_body_is_an_error() {
    let server = FakeFeed::serve(StatusCode::OK, "{\"launches\": []}".to_string()).await;
    let err = http_feed(server.url()).fetch_launches().await.unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused_is_an_error() {
    let err = http_feed(closed_port_url().await)
        .fetch_launches()
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Request(_)));
}

#[tokio::test]
async fn test_resolver_detects_conflict_from_live_feed() {
    let server =
        FakeFeed::with_records(&[launch("test_launchpad", "2049-12-25T21:00:00-08:00", "live-1")])
            .await;
    let resolver = ConflictResolver::new(
        Arc::new(http_feed(server.url())),
        Arc::new(LocalRepository::with_default_destinations()),
    );

    let err = resolver
        .validate(&booking_request("test_launchpad", 6, christmas_2049()))
        .await
        .unwrap_err();
    assert!(matches!(err, Rejection::LaunchSiteConflict { ref record_id, .. } if record_id == "live-1"));
}

#[tokio::test]
async fn test_resolver_tolerates_malformed_records_from_live_feed() {
    let body = r#"[
        {"launchpad": "test_launchpad", "name": "undated", "date_local": null, "id": "u"},
        {"launchpad": "test_launchpad", "name": "bad", "date_local": "Dec 25 2049", "id": "b"},
        {"launchpad": "elsewhere", "name": "fine", "date_local": "2049-12-25T12:00:00Z", "id": "f"}
    ]"#;
    let server = FakeFeed::serve(StatusCode::OK, body.to_string()).await;
    let resolver = ConflictResolver::new(
        Arc::new(http_feed(server.url())),
        Arc::new(LocalRepository::with_default_destinations()),
    );

    let accepted = resolver
        .validate(&booking_request("test_launchpad", 6, christmas_2049()))
        .await
        .unwrap();
    assert_eq!(accepted.skipped_records, 2);
}

#[tokio::test]
async fn test_resolver_fails_closed_when_feed_is_down() {
    let resolver = ConflictResolver::new(
        Arc::new(http_feed(closed_port_url().await)),
        Arc::new(LocalRepository::with_default_destinations()),
    );

    let err = resolver
        .validate(&booking_request("test_launchpad", 6, christmas_2049()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), RejectionKind::Upstream);
}
