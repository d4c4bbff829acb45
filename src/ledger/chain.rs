//! Vote Ledger
//!
//! Owns the append-only entry sequence and the set of voters who have
//! already submitted. Both live behind a single lock so the duplicate
//! check and the append happen as one step.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::error::LedgerError;
use crate::ledger::entry::{create_genesis_entry, Entry, Submission};
use crate::ledger::tally::tally_entries;
use crate::ledger::verify::{validate_entries, ValidationReport};

/// Full ledger contents plus validity, read at a single point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub chain: Vec<Entry>,
    pub valid: bool,
}

#[derive(Debug)]
struct LedgerState {
    entries: Vec<Entry>,
    known_submitters: HashSet<String>,
}

/// In-memory, hash-linked vote ledger
#[derive(Debug)]
pub struct Ledger {
    inner: RwLock<LedgerState>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create a ledger holding only the genesis entry
    pub fn new() -> Self {
        let genesis = create_genesis_entry(Utc::now());
        debug!("Created genesis entry {}", genesis.hash());

        Self {
            inner: RwLock::new(LedgerState {
                entries: vec![genesis],
                known_submitters: HashSet::new(),
            }),
        }
    }

    // The state is only mutated after every fallible step, so a poisoned
    // lock still guards a consistent ledger.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a vote as a new entry chained to the current tail
    pub fn append(&self, submission: Submission) -> Result<Entry, LedgerError> {
        submission.validate()?;

        let mut state = self.write();

        if state.known_submitters.contains(&submission.submitter_id) {
            warn!("Rejected duplicate vote from {}", submission.submitter_id);
            return Err(LedgerError::duplicate_submitter(&submission.submitter_id));
        }

        let submitter_id = submission.submitter_id.clone();
        let previous_hash = state
            .entries
            .last()
            .map(|tail| tail.hash().to_string())
            .unwrap_or_default();
        let entry = Entry::new(
            state.entries.len() as u64,
            Utc::now(),
            vec![submission],
            previous_hash,
        );

        state.known_submitters.insert(submitter_id);
        state.entries.push(entry.clone());

        info!("Appended {}", entry.summary());
        Ok(entry)
    }

    /// Re-scan every entry and report the first integrity failure
    pub fn validate(&self) -> ValidationReport {
        validate_entries(&self.read().entries)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().valid
    }

    /// Entries and validity taken under one read lock
    pub fn state(&self) -> LedgerSnapshot {
        let state = self.read();
        let report = validate_entries(&state.entries);
        LedgerSnapshot {
            chain: state.entries.clone(),
            valid: report.valid,
        }
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.read().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Always false: genesis is present from construction
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    pub fn head_hash(&self) -> String {
        self.read()
            .entries
            .last()
            .map(|tail| tail.hash().to_string())
            .unwrap_or_default()
    }

    pub fn has_submitted(&self, submitter_id: &str) -> bool {
        self.read().known_submitters.contains(submitter_id)
    }

    /// Votes per choice id
    pub fn tally(&self) -> BTreeMap<String, usize> {
        tally_entries(&self.read().entries)
    }

    #[cfg(test)]
    fn tamper<F: FnOnce(&mut Vec<Entry>)>(&self, f: F) {
        f(&mut self.write().entries);
    }
}
