//! Implementations of the stores backed by SQLite.

mod ledger;

pub use ledger::SQLiteLedger;
