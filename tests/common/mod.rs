#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use vote_ledger::api::{self, AppState};
use vote_ledger::config::loader::RosterConfig;
use vote_ledger::ledger::{Ledger, Submission};

/// Router over a fresh ledger and the built-in roster
pub fn setup_test_app() -> (Router, AppState) {
    let state = AppState::new(Ledger::new(), RosterConfig::default());
    (api::router(state.clone()), state)
}

/// Ledger with one vote per (id, label, choice) triple
pub fn ledger_with_votes(votes: &[(&str, &str, &str)]) -> Ledger {
    let ledger = Ledger::new();
    for (id, label, choice) in votes {
        ledger
            .append(Submission::new(*id, *label, *choice))
            .expect("Failed to append test vote");
    }
    ledger
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
