use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::AppState;
use crate::error::LedgerError;
use crate::ledger::Submission;

fn required_field<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload
        .get(name)
        .and_then(|v| v.as_str())
        .filter(|v| !v.trim().is_empty())
}

pub async fn cast_vote(State(state): State<AppState>, Json(payload): Json<Value>) -> Response {
    let (Some(voter_id), Some(voter_name), Some(candidate_id)) = (
        required_field(&payload, "voterId"),
        required_field(&payload, "voterName"),
        required_field(&payload, "candidateId"),
    ) else {
        warn!("Rejected vote with missing fields");
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Missing required fields." })),
        )
            .into_response();
    };

    if !state.roster.contains(candidate_id) {
        warn!("Rejected vote for unknown candidate {}", candidate_id);
        return LedgerError::unknown_choice(candidate_id).into_response();
    }

    let submission = Submission::new(voter_id, voter_name, candidate_id);
    match state.ledger.append(submission) {
        Ok(block) => {
            info!("Vote recorded at position {}", block.position());
            Json(serde_json::json!({
                "message": "Vote recorded!",
                "block": block
            }))
            .into_response()
        }
        Err(e) => e.into_response(),
    }
}
