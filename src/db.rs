//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, stores::sqlite::SQLiteLedger};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table(s) for the store if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// Create all of the application's tables.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an [Error::Storage] if the schema could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteLedger::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
