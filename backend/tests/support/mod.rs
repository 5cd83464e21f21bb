#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{http::StatusCode, routing::get, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};

use launch_booking::db::repositories::LocalRepository;
use launch_booking::http::AppState;
use launch_booking::models::{BookingRequest, DestinationId, ExternalLaunchRecord};
use launch_booking::services::{
    AdmissionConfig, AdmissionController, InMemoryLaunchFeed, ManualClock,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on drop (including unwinding) and serializes
/// access to the process environment across tests in the same binary.
///
/// `Some(v)` sets the variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// 2049-12-25, a Saturday: the default rotation expects destination 6.
pub fn christmas_2049() -> NaiveDate {
    NaiveDate::from_ymd_opt(2049, 12, 25).unwrap()
}

pub fn booking_request(launchpad: &str, destination: i64, launch_date: NaiveDate) -> BookingRequest {
    BookingRequest {
        first_name: "Test".into(),
        last_name: "User".into(),
        gender: "Non-binary".into(),
        birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
        launchpad_id: launchpad.into(),
        destination_id: DestinationId::new(destination),
        launch_date: Some(launch_date),
    }
}

/// JSON body as a client would send it, with full timestamps for the dates.
pub fn booking_json(launchpad: &str, destination: i64, launch_date: &str) -> Value {
    json!({
        "first_name": "Test",
        "last_name": "User",
        "gender": "Non-binary",
        "birthday": "1990-01-01T00:00:00Z",
        "launchpad_id": launchpad,
        "destination_id": destination,
        "launch_date": launch_date,
    })
}

pub fn launch(launchpad: &str, date_local: &str, id: &str) -> ExternalLaunchRecord {
    ExternalLaunchRecord::new(launchpad, format!("mission {id}"), date_local, id)
}

/// Everything a router test needs to observe and steer.
pub struct TestApp {
    pub state: AppState,
    pub repo: Arc<LocalRepository>,
    pub feed: Arc<InMemoryLaunchFeed>,
    pub clock: Arc<ManualClock>,
}

pub fn test_app() -> TestApp {
    test_app_with(AdmissionConfig::default())
}

pub fn test_app_with(admission: AdmissionConfig) -> TestApp {
    let repo = Arc::new(LocalRepository::with_default_destinations());
    let feed = Arc::new(InMemoryLaunchFeed::new());
    let clock = Arc::new(ManualClock::new());
    let controller = Arc::new(AdmissionController::with_clock(admission, clock.clone()));
    let state = AppState::new(repo.clone(), feed.clone(), controller);
    TestApp {
        state,
        repo,
        feed,
        clock,
    }
}

/// A local HTTP server standing in for the external launch feed.
pub struct FakeFeed {
    pub addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeFeed {
    /// Serve `body` with `status` at `GET /launches`.
    pub async fn serve(status: StatusCode, body: String) -> Self {
        let app = Router::new().route(
            "/launches",
            get(move || {
                let body = body.clone();
                async move { (status, [("content-type", "application/json")], body) }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, handle }
    }

    pub async fn with_records(records: &[ExternalLaunchRecord]) -> Self {
        Self::serve(StatusCode::OK, serde_json::to_string(records).unwrap()).await
    }

    pub fn url(&self) -> String {
        format!("http://{}/launches", self.addr)
    }
}

impl Drop for FakeFeed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/launches", addr)
}
