//! HTTP boundary around the ledger
//!
//! Parses requests, checks field presence and candidate ids, then hands
//! typed submissions to the ledger. Owns nothing but presentation.

pub mod candidates;
pub mod chain;
pub mod vote;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::loader::RosterConfig;
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub roster: Arc<RosterConfig>,
}

impl AppState {
    pub fn new(ledger: Ledger, roster: RosterConfig) -> Self {
        Self {
            ledger: Arc::new(ledger),
            roster: Arc::new(roster),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(candidates::health_check))
        .route("/api/candidates", get(candidates::list_candidates))
        .route("/api/vote", post(vote::cast_vote))
        .route("/api/chain", get(chain::get_chain))
        .route("/api/results", get(chain::get_results))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
        .with_state(state)
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match &self {
            LedgerError::InvalidSubmission(_) | LedgerError::UnknownChoice(_) => {
                StatusCode::BAD_REQUEST
            }
            LedgerError::DuplicateSubmitter(_) => StatusCode::CONFLICT,
            LedgerError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
