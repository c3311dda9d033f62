//! Defines the core data models for transactions and the rules for creating them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// The maximum number of characters allowed in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 50;

/// The number of fractional digits amounts are stored with, i.e. whole cents.
pub const AMOUNT_SCALE: u32 = 2;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// A purchase recorded in the ledger.
///
/// Transactions are immutable, there is no way to update or delete one once it
/// has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The UUID assigned to the transaction when it was created.
    pub id: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money spent, in US dollars with exactly two decimal places.
    pub amount: Decimal,
}

impl Transaction {
    /// Attach an identifier to a validated transaction.
    pub fn new(id: String, new_transaction: NewTransaction) -> Self {
        Self {
            id,
            description: new_transaction.description,
            date: new_transaction.date,
            amount: new_transaction.amount,
        }
    }
}

/// The fields of a transaction that passed validation but has not been
/// assigned an ID yet.
///
/// The only way to get one is through [CreateTransactionRequest::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    description: String,
    date: Date,
    amount: Decimal,
}

impl NewTransaction {
    /// The validated description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The validated transaction date.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The validated amount, scaled to exactly two decimal places.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// The request body for creating a transaction.
///
/// Every field is optional so that a missing field is reported as a
/// validation error instead of a JSON decoding error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// When the transaction happened, e.g. "2023-09-21" or "2023-09-21T00:00:00Z".
    #[serde(default)]
    pub transaction_date: Option<String>,
    /// The amount in US dollars.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl CreateTransactionRequest {
    /// Check the request against the rules for transactions.
    ///
    /// Rules are checked in order and the first violated rule is reported.
    ///
    /// # Errors
    /// Returns [Error::Validation] with a message naming the violated rule.
    pub fn validate(&self) -> Result<NewTransaction, Error> {
        let description = match self.description.as_deref() {
            Some(description) if !description.trim().is_empty() => description,
            _ => return Err(validation_error("description is required")),
        };

        if description.graphemes(true).count() > MAX_DESCRIPTION_LENGTH {
            return Err(validation_error(&format!(
                "description must not exceed {MAX_DESCRIPTION_LENGTH} characters"
            )));
        }

        let date = match self.transaction_date.as_deref() {
            Some(date) if !date.trim().is_empty() => parse_transaction_date(date.trim())
                .ok_or_else(|| {
                    validation_error("transaction_date must be a valid date (YYYY-MM-DD)")
                })?,
            _ => return Err(validation_error("transaction_date is required")),
        };

        let Some(mut amount) = self.amount else {
            return Err(validation_error("amount is required"));
        };

        if amount < Decimal::ZERO {
            return Err(validation_error("amount must be a positive number"));
        }

        if amount.normalize().scale() > AMOUNT_SCALE {
            return Err(validation_error(
                "amount must be rounded to two decimal places",
            ));
        }

        amount.rescale(AMOUNT_SCALE);

        Ok(NewTransaction {
            description: description.to_owned(),
            date,
            amount,
        })
    }
}

/// The response body after creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    /// The ID assigned to the new transaction.
    pub id: String,
}

/// The query parameters naming the currency to convert a transaction into.
///
/// The two parts are joined as "{country_currency}-{currency}" to match the
/// currency descriptions used by the exchange rate feed, e.g. "Brazil-Real".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrieveTransactionQuery {
    /// The country whose currency to convert to, e.g. "Brazil".
    #[serde(default)]
    pub country_currency: String,
    /// The name of the currency, e.g. "Real".
    #[serde(default)]
    pub currency: String,
}

impl RetrieveTransactionQuery {
    /// Check that both parts of the target currency were given.
    ///
    /// # Errors
    /// Returns [Error::Validation] if either part is empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.country_currency.trim().is_empty() {
            return Err(validation_error("country_currency is required"));
        }

        if self.currency.trim().is_empty() {
            return Err(validation_error("currency is required"));
        }

        Ok(())
    }
}

/// A stored transaction together with its amount in another currency.
///
/// Computed fresh on every retrieval and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    /// The ID of the transaction.
    pub id: String,
    /// The description of the transaction.
    pub description: String,
    /// When the transaction happened.
    pub transaction_date: Date,
    /// The amount in US dollars as it was recorded.
    #[serde(with = "rust_decimal::serde::float")]
    pub original_amount: Decimal,
    /// The exchange rate used for the conversion, as published by the feed.
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
    /// The original amount in the target currency, rounded to two decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    pub converted_amount: Decimal,
}

// ============================================================================
// HELPERS
// ============================================================================

fn validation_error(reason: &str) -> Error {
    Error::Validation(reason.to_owned())
}

/// Parse a date given either as a plain calendar date or an RFC 3339 date-time.
fn parse_transaction_date(text: &str) -> Option<Date> {
    Date::parse(text, DATE_FORMAT).ok().or_else(|| {
        OffsetDateTime::parse(text, &Rfc3339)
            .ok()
            .map(|date_time| date_time.date())
    })
}

/// Check that `id` is a well-formed UUID.
///
/// # Errors
/// Returns [Error::Validation] if it is not.
pub fn validate_id(id: &str) -> Result<(), Error> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| validation_error("id must be a valid UUID"))
}

// ============================================================================
// TESTS
// ============================================================================
