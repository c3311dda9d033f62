//! Historical exchange rates and currency conversion.
//!
//! This module contains:
//! - The [RateProvider] trait and the quotation it returns
//! - The six month lookback window used to pick a quotation
//! - [TreasuryRateProvider], which reads the U.S. Treasury "Rates of Exchange" feed
//! - The arithmetic for converting an amount with a rate

mod conversion;
mod provider;
mod treasury;

pub use conversion::{convert, parse_rate};
pub use provider::{ExchangeRateQuotation, LookbackWindow, RateProvider, select_quotation};
pub use treasury::{DEFAULT_TIMEOUT, TREASURY_BASE_URL, TreasuryRateProvider};
