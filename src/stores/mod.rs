//! Contains the ledger trait and its implementations.

mod ledger;

pub mod sqlite;

pub use ledger::Ledger;
