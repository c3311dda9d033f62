//! Converts amounts between currencies.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Error, transaction::AMOUNT_SCALE};

/// Parse an exchange rate as published by the feed, e.g. "5.033".
///
/// # Errors
/// Returns an [Error::RateFormat] if `text` is not a decimal number.
pub fn parse_rate(text: &str) -> Result<Decimal, Error> {
    Decimal::from_str(text.trim()).map_err(|_| Error::RateFormat(text.to_owned()))
}

/// Convert `amount` with `rate`, rounding the product half away from zero to
/// two decimal places.
///
/// Returns `None` if the product is too large to represent.
pub fn convert(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .map(|product| {
            product.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
        })
}
