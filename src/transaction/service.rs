//! Orchestrates creating transactions and converting them into other currencies.

use std::sync::Arc;

use crate::{
    Error,
    exchange_rate::{RateProvider, convert, parse_rate},
    stores::Ledger,
    transaction::{
        core::{
            ConversionResult, CreateTransactionRequest, RetrieveTransactionQuery, Transaction,
            validate_id,
        },
        id::IdGenerator,
    },
};

/// The business logic for transactions.
///
/// The service holds no mutable state of its own, every call goes straight
/// to the ledger and the rate provider.
#[derive(Clone)]
pub struct TransactionService {
    ledger: Arc<dyn Ledger>,
    rate_provider: Arc<dyn RateProvider>,
    new_id: IdGenerator,
}

impl TransactionService {
    /// Create a service that stores transactions in `ledger`, converts them with
    /// rates from `rate_provider` and identifies them with IDs from `new_id`.
    pub fn new(
        ledger: Arc<dyn Ledger>,
        rate_provider: Arc<dyn RateProvider>,
        new_id: IdGenerator,
    ) -> Self {
        Self {
            ledger,
            rate_provider,
            new_id,
        }
    }

    /// Validate `request` and record it in the ledger.
    ///
    /// Returns the ID of the new transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the request breaks a rule, in which case nothing is written,
    /// - or [Error::Storage] if the ledger could not store the transaction.
    pub fn create(&self, request: &CreateTransactionRequest) -> Result<String, Error> {
        let new_transaction = request.validate()?;
        let transaction = Transaction::new((self.new_id)(), new_transaction);

        let id = self
            .ledger
            .create(&transaction)
            .map_err(into_storage_error)?;

        tracing::info!("Transaction created successfully with ID {id}");

        Ok(id)
    }

    /// Get the transaction with `id` and convert its amount into the currency
    /// named by `query`.
    ///
    /// The rate used is the most recent one published no later than the
    /// transaction date and no earlier than six months before it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if `id` is not a UUID or the currency is missing,
    ///   in which case the ledger is not consulted,
    /// - [Error::NotFound] if there is no transaction with `id`,
    /// - [Error::Storage] if the ledger could not be read,
    /// - [Error::RateUnavailable] if there is no rate within the six month window,
    /// - [Error::Upstream] if the rate provider could not be reached,
    /// - or [Error::RateFormat] if the provider returned a rate that is not a number.
    pub async fn retrieve(
        &self,
        id: &str,
        query: &RetrieveTransactionQuery,
    ) -> Result<ConversionResult, Error> {
        validate_id(id)?;
        query.validate()?;

        let transaction = self.ledger.find_by_id(id).map_err(|error| match error {
            Error::NotFound(_) => error,
            error => into_storage_error(error),
        })?;

        let quotation = self
            .rate_provider
            .get_rate(transaction.date, &query.country_currency, &query.currency)
            .await
            .map_err(|error| match error {
                Error::RateUnavailable { .. } | Error::Upstream(_) => error,
                error => Error::Upstream(error.to_string()),
            })?;

        let exchange_rate = parse_rate(&quotation.exchange_rate)?;
        let converted_amount = convert(transaction.amount, exchange_rate).ok_or_else(|| {
            Error::Validation(format!(
                "amount {} is too large to convert at a rate of {exchange_rate}",
                transaction.amount
            ))
        })?;

        tracing::info!(
            "Transaction {id} converted to {} using the rate recorded on {}",
            quotation.country_currency_desc,
            quotation.record_date
        );

        Ok(ConversionResult {
            id: transaction.id,
            description: transaction.description,
            transaction_date: transaction.date,
            original_amount: transaction.amount,
            exchange_rate,
            converted_amount,
        })
    }
}

fn into_storage_error(error: Error) -> Error {
    match error {
        Error::Storage(_) => error,
        error => Error::Storage(error.to_string()),
    }
}
