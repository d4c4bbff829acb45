//! Vote Ledger
//!
//! Append-only, hash-linked record of accepted votes with a
//! re-scanning integrity check.

pub mod chain;
pub mod entry;
pub mod tally;
pub mod verify;

pub use chain::{Ledger, LedgerSnapshot};
pub use entry::{create_genesis_entry, Entry, Submission, GENESIS_PREVIOUS_HASH};
pub use tally::tally_entries;
pub use verify::{
    find_tampered_entries, load_entries_from_file, validate_entries, verify_ledger_file,
    FailureKind, ValidationFailure, ValidationReport,
};
