use axum::{extract::State, response::Json};

use crate::api::AppState;
use crate::config::loader::Candidate;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "vote-ledger",
        "timestamp": chrono::Utc::now()
    }))
}

pub async fn list_candidates(State(state): State<AppState>) -> Json<Vec<Candidate>> {
    Json(state.roster.candidates.clone())
}
