//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    exchange_rate::RateProvider,
    stores::sqlite::SQLiteLedger,
    transaction::{IdGenerator, TransactionService},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The service that creates and converts transactions.
    pub transaction_service: TransactionService,
}

impl AppState {
    /// Create a new [AppState] that stores transactions in a SQLite database.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        rate_provider: Arc<dyn RateProvider>,
        new_id: IdGenerator,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let ledger = SQLiteLedger::new(Arc::new(Mutex::new(db_connection)));

        Ok(Self {
            transaction_service: TransactionService::new(Arc::new(ledger), rate_provider, new_id),
        })
    }
}

impl FromRef<AppState> for TransactionService {
    fn from_ref(state: &AppState) -> Self {
        state.transaction_service.clone()
    }
}
