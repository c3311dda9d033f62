//! In-memory stand-ins for the ledger and rate provider.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use time::Date;

use crate::{
    Error,
    exchange_rate::{ExchangeRateQuotation, RateProvider},
    stores::Ledger,
    transaction::{IdGenerator, Transaction},
};

/// An [IdGenerator] that always returns `id`.
pub(crate) fn fixed_id(id: &str) -> IdGenerator {
    let id = id.to_owned();
    Arc::new(move || id.clone())
}

/// A ledger that keeps transactions in a map and records every call.
#[derive(Debug, Default)]
pub(crate) struct StubLedger {
    transactions: Mutex<HashMap<String, Transaction>>,
    created: Mutex<Vec<Transaction>>,
    lookups: Mutex<Vec<String>>,
    failure: Option<Error>,
}

impl StubLedger {
    pub(crate) fn with_transaction(transaction: Transaction) -> Self {
        let ledger = Self::default();
        ledger
            .transactions
            .lock()
            .unwrap()
            .insert(transaction.id.clone(), transaction);
        ledger
    }

    /// A ledger where every call fails with `error`.
    pub(crate) fn failing(error: Error) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    /// The transactions passed to [Ledger::create], in order.
    pub(crate) fn created(&self) -> Vec<Transaction> {
        self.created.lock().unwrap().clone()
    }

    /// The IDs passed to [Ledger::find_by_id], in order.
    pub(crate) fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Ledger for StubLedger {
    fn create(&self, transaction: &Transaction) -> Result<String, Error> {
        self.created.lock().unwrap().push(transaction.clone());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        self.transactions
            .lock()
            .unwrap()
            .insert(transaction.id.clone(), transaction.clone());

        Ok(transaction.id.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Transaction, Error> {
        self.lookups.lock().unwrap().push(id.to_owned());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        self.transactions
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }
}

/// A rate provider that returns a canned result and records every request.
#[derive(Debug)]
pub(crate) struct StubRateProvider {
    result: Result<ExchangeRateQuotation, Error>,
    requests: Mutex<Vec<(Date, String, String)>>,
}

impl StubRateProvider {
    /// A provider that always quotes `rate` for Brazil-Real, recorded on `record_date`.
    pub(crate) fn with_rate(rate: &str, record_date: Date) -> Self {
        Self {
            result: Ok(ExchangeRateQuotation {
                country_currency_desc: "Brazil-Real".to_owned(),
                exchange_rate: rate.to_owned(),
                record_date,
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider where every request fails with `error`.
    pub(crate) fn failing(error: Error) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The (date, country, currency) of every request, in order.
    pub(crate) fn requests(&self) -> Vec<(Date, String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RateProvider for StubRateProvider {
    async fn get_rate(
        &self,
        date: Date,
        country: &str,
        currency: &str,
    ) -> Result<ExchangeRateQuotation, Error> {
        self.requests
            .lock()
            .unwrap()
            .push((date, country.to_owned(), currency.to_owned()));

        self.result.clone()
    }
}
