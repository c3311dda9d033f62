//! Assigns identifiers to new transactions.

use std::sync::Arc;

/// Produces a new, globally unique identifier each time it is called.
///
/// The generator is injected into [TransactionService](super::TransactionService)
/// so that tests can use fixed IDs.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Generate a random (version 4) UUID in its hyphenated text form.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The [IdGenerator] used in production.
pub fn uuid_generator() -> IdGenerator {
    Arc::new(new_uuid)
}
