//! Ledger Entry
//!
//! Defines the hash-linked entry that records one accepted vote,
//! plus the submission payload it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::error::LedgerError;

/// Previous-hash marker carried by the genesis entry
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// One vote as accepted by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submitter_id: String,
    pub submitter_label: String,
    pub choice_id: String,
}

impl Submission {
    pub fn new(
        submitter_id: impl Into<String>,
        submitter_label: impl Into<String>,
        choice_id: impl Into<String>,
    ) -> Self {
        Self {
            submitter_id: submitter_id.into(),
            submitter_label: submitter_label.into(),
            choice_id: choice_id.into(),
        }
    }

    /// Reject records with a missing or blank required field
    pub fn validate(&self) -> Result<(), LedgerError> {
        let fields = [
            ("submitterId", &self.submitter_id),
            ("submitterLabel", &self.submitter_label),
            ("choiceId", &self.choice_id),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(LedgerError::invalid_submission(name));
            }
        }

        Ok(())
    }

    /// Canonical JSON form used for hashing; object keys are emitted sorted
    fn canonical_value(&self) -> Value {
        json!({
            "choiceId": self.choice_id,
            "submitterId": self.submitter_id,
            "submitterLabel": self.submitter_label,
        })
    }
}

/// Immutable ledger position with its cached content hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    position: u64,
    created_at: DateTime<Utc>,
    payloads: Vec<Submission>,
    previous_hash: String,
    hash: String,
}

impl Entry {
    /// Build an entry and compute its hash once
    pub fn new(
        position: u64,
        created_at: DateTime<Utc>,
        payloads: Vec<Submission>,
        previous_hash: String,
    ) -> Self {
        let mut entry = Self {
            position,
            created_at,
            payloads,
            previous_hash,
            hash: String::new(),
        };

        entry.hash = entry.calculate_hash();
        entry
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn payloads(&self) -> &[Submission] {
        &self.payloads
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.position == 0
    }

    /// Create canonical string representation for hashing
    pub fn canonical_string(&self) -> String {
        format!(
            "position:{}|previous_hash:{}|created_at:{}|payloads:{}",
            self.position,
            self.previous_hash,
            self.created_at.to_rfc3339(),
            self.serialize_payloads()
        )
    }

    /// Calculate SHA256 hash of this entry from its stored fields
    pub fn calculate_hash(&self) -> String {
        let canonical = self.canonical_string();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }

    fn serialize_payloads(&self) -> String {
        Value::Array(
            self.payloads
                .iter()
                .map(Submission::canonical_value)
                .collect(),
        )
        .to_string()
    }

    /// Verify the stored hash against a fresh computation
    pub fn verify_hash(&self) -> bool {
        self.hash == self.calculate_hash()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        match self.payloads.first() {
            Some(vote) => format!(
                "entry {}: {} -> {} ({})",
                self.position, vote.submitter_id, vote.choice_id, self.hash
            ),
            None => format!("entry {}: genesis ({})", self.position, self.hash),
        }
    }

    #[cfg(test)]
    pub(crate) fn payloads_mut(&mut self) -> &mut Vec<Submission> {
        &mut self.payloads
    }

    #[cfg(test)]
    pub(crate) fn set_previous_hash(&mut self, previous_hash: &str) {
        self.previous_hash = previous_hash.to_string();
    }
}

/// Genesis entry anchoring the hash chain
pub fn create_genesis_entry(created_at: DateTime<Utc>) -> Entry {
    Entry::new(0, created_at, Vec::new(), GENESIS_PREVIOUS_HASH.to_string())
}
