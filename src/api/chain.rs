use axum::{extract::State, response::Json};
use serde::Serialize;
use tracing::debug;

use crate::api::AppState;
use crate::ledger::{tally_entries, LedgerSnapshot};

#[derive(Debug, Serialize)]
pub struct CandidateResult {
    pub id: String,
    pub name: String,
    pub votes: usize,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<CandidateResult>,
    pub total: usize,
    pub valid: bool,
}

/// Full ledger plus validity
pub async fn get_chain(State(state): State<AppState>) -> Json<LedgerSnapshot> {
    let snapshot = state.ledger.state();
    debug!(
        "Serving chain of {} entries (valid: {})",
        snapshot.chain.len(),
        snapshot.valid
    );
    Json(snapshot)
}

/// Vote counts per candidate, in roster order
pub async fn get_results(State(state): State<AppState>) -> Json<ResultsResponse> {
    let snapshot = state.ledger.state();
    let counts = tally_entries(&snapshot.chain);

    let results: Vec<CandidateResult> = state
        .roster
        .candidates
        .iter()
        .map(|candidate| CandidateResult {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            votes: counts.get(&candidate.id).copied().unwrap_or(0),
        })
        .collect();

    Json(ResultsResponse {
        total: counts.values().sum(),
        results,
        valid: snapshot.valid,
    })
}
