//! Reads exchange rates from the U.S. Treasury Reporting Rates of Exchange feed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    exchange_rate::provider::{
        ExchangeRateQuotation, LookbackWindow, RateProvider, select_quotation,
    },
};

/// The base URL of the Treasury fiscal data API.
pub const TREASURY_BASE_URL: &str = "https://api.fiscaldata.treasury.gov/services/api/fiscal_service";

/// How long to wait for the feed before giving up on a request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const RATES_OF_EXCHANGE_PATH: &str = "/v1/accounting/od/rates_of_exchange";
const FIELDS: &str = "country_currency_desc,exchange_rate,record_date";
const SORT_BY_RECORD_DATE_DESCENDING: &str = "-record_date";
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The body of a response from the rates of exchange endpoint.
#[derive(Debug, Deserialize)]
struct RatesOfExchangeResponse {
    data: Vec<ExchangeRateQuotation>,
}

/// A [RateProvider] backed by the Treasury rates of exchange API.
///
/// Every call makes exactly one request, rates are never cached.
#[derive(Debug, Clone)]
pub struct TreasuryRateProvider {
    client: Client,
    base_url: String,
}

impl TreasuryRateProvider {
    /// Create a provider that talks to the API at `base_url`, e.g. [TREASURY_BASE_URL].
    ///
    /// # Errors
    /// Returns an [Error::Upstream] if the HTTP client could not be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a provider that sends its requests with `client`.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl RateProvider for TreasuryRateProvider {
    async fn get_rate(
        &self,
        date: Date,
        country: &str,
        currency: &str,
    ) -> Result<ExchangeRateQuotation, Error> {
        let window = LookbackWindow::ending_on(date);
        let country_currency_desc = format!("{country}-{currency}");
        let filter = build_filter(&country_currency_desc, &window)?;
        let url = format!("{}{RATES_OF_EXCHANGE_PATH}", self.base_url);

        tracing::debug!("Fetching exchange rates from {url} with filter {filter}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", FIELDS),
                ("filter", filter.as_str()),
                ("sort", SORT_BY_RECORD_DATE_DESCENDING),
            ])
            .send()
            .await
            .map_err(|error| Error::Upstream(format!("failed to fetch exchange rates: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "API request failed with status code: {}",
                status.as_u16()
            )));
        }

        let body: RatesOfExchangeResponse = response.json().await.map_err(|error| {
            Error::Upstream(format!("failed to decode exchange rates response: {error}"))
        })?;

        tracing::debug!(
            "Received {} exchange rate(s) for {country_currency_desc}",
            body.data.len()
        );

        select_quotation(&body.data, &window, &country_currency_desc)
            .cloned()
            .ok_or_else(|| Error::RateUnavailable {
                country: country.to_owned(),
                currency: currency.to_owned(),
                date,
            })
    }
}

/// Build the `filter` query parameter that restricts the feed to one currency
/// and to the record dates in `window`.
fn build_filter(country_currency_desc: &str, window: &LookbackWindow) -> Result<String, Error> {
    let format_date = |date: Date| {
        date.format(DATE_FORMAT)
            .map_err(|error| Error::Upstream(format!("could not format date {date}: {error}")))
    };

    Ok(format!(
        "country_currency_desc:eq:{country_currency_desc},record_date:lte:{},record_date:gte:{}",
        format_date(window.end)?,
        format_date(window.start)?,
    ))
}
