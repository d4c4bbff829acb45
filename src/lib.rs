pub mod api;
pub mod config;
pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{Entry, Ledger, Submission};
