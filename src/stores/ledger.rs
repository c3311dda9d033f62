//! Defines the ledger trait.

use crate::{Error, transaction::Transaction};

/// Durable, append-only storage for transactions.
///
/// Stored transactions are never updated or deleted.
pub trait Ledger: Send + Sync {
    /// Store a new transaction and return its ID.
    ///
    /// # Errors
    /// Returns [Error::Storage] if the transaction could not be written.
    fn create(&self, transaction: &Transaction) -> Result<String, Error>;

    /// Retrieve the transaction with the given `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such transaction, or
    /// [Error::Storage] if the ledger could not be read.
    fn find_by_id(&self, id: &str) -> Result<Transaction, Error>;
}
