//! Implements a SQLite backed ledger.
use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;

use crate::{Error, db::CreateTable, stores::Ledger, transaction::Transaction};

/// Stores transactions in a SQLite database.
///
/// Amounts are stored as decimal text so that no precision is lost.
#[derive(Debug, Clone)]
pub struct SQLiteLedger {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedger {
    /// Create a new ledger for the SQLite `connection`.
    ///
    /// The schema must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::Storage("could not acquire the database lock".to_owned())
        })
    }

    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        let id = row.get(0)?;
        let description = row.get(1)?;
        let date = row.get(2)?;
        let amount_text: String = row.get(3)?;
        let amount = Decimal::from_str(&amount_text).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error))
        })?;

        Ok(Transaction {
            id,
            description,
            date,
            amount,
        })
    }
}

impl Ledger for SQLiteLedger {
    /// Insert a transaction into the database.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if there is an SQL error,
    /// including an ID that already exists.
    fn create(&self, transaction: &Transaction) -> Result<String, Error> {
        let connection = self.lock()?;

        connection.execute(
            "INSERT INTO \"transaction\" (id, description, date, amount)
             VALUES (?1, ?2, ?3, ?4)",
            (
                &transaction.id,
                &transaction.description,
                transaction.date,
                transaction.amount.to_string(),
            ),
        )?;

        Ok(transaction.id.clone())
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::Storage] there is some other SQL error.
    fn find_by_id(&self, id: &str) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        connection
            .prepare("SELECT id, description, date, amount FROM \"transaction\" WHERE id = :id")?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::NotFound(id.to_owned()),
                error => error.into(),
            })
    }
}

impl CreateTable for SQLiteLedger {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id TEXT PRIMARY KEY NOT NULL,
                    description TEXT NOT NULL,
                    date TEXT NOT NULL,
                    amount TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}
