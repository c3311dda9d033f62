//! Defines the exchange rate provider trait and the policy for choosing a quotation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::Error;

/// How far back from the transaction date a quotation may be.
pub const LOOKBACK_MONTHS: u8 = 6;

/// An exchange rate published for a currency on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateQuotation {
    /// The country and currency the rate is for, e.g. "Brazil-Real".
    pub country_currency_desc: String,
    /// The number of units of the currency per US dollar, as text.
    pub exchange_rate: String,
    /// The date the rate was recorded.
    pub record_date: Date,
}

/// Looks up the exchange rate that applies to a purchase.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the most recent quotation for `country`-`currency` that was
    /// recorded no later than `date` and no earlier than six months before it.
    ///
    /// # Errors
    /// Returns an [Error::RateUnavailable] if no quotation falls within the
    /// window, or an [Error::Upstream] if the rates could not be fetched.
    async fn get_rate(
        &self,
        date: Date,
        country: &str,
        currency: &str,
    ) -> Result<ExchangeRateQuotation, Error>;
}

/// The closed range of record dates a quotation must fall in to be used for
/// a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    /// The earliest acceptable record date.
    pub start: Date,
    /// The latest acceptable record date, i.e. the transaction date.
    pub end: Date,
}

impl LookbackWindow {
    /// The window ending on the transaction `date`.
    ///
    /// For dates within six months of [Date::MIN] the window saturates and
    /// starts at [Date::MIN].
    pub fn ending_on(date: Date) -> Self {
        let start = months_before(date, LOOKBACK_MONTHS).unwrap_or_else(|| {
            tracing::debug!("lookback window for {date} saturated at the earliest date");
            Date::MIN
        });

        Self { start, end: date }
    }

    /// Whether `date` lies inside the window, including both ends.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Pick the quotation for `country_currency_desc` with the latest record date
/// inside `window`.
///
/// The order of `quotations` is not relied on. When two quotations share the
/// latest date, the first one is chosen.
pub fn select_quotation<'a>(
    quotations: &'a [ExchangeRateQuotation],
    window: &LookbackWindow,
    country_currency_desc: &str,
) -> Option<&'a ExchangeRateQuotation> {
    quotations
        .iter()
        .filter(|quotation| window.contains(quotation.record_date))
        .filter(|quotation| {
            quotation
                .country_currency_desc
                .eq_ignore_ascii_case(country_currency_desc)
        })
        .reduce(|latest, quotation| {
            if quotation.record_date > latest.record_date {
                quotation
            } else {
                latest
            }
        })
}

/// Step back `months` calendar months from `date`.
///
/// If the day does not exist in the target month, the last day of that month
/// is used instead, e.g. six months before 2023-08-31 is 2023-02-28.
/// Returns `None` if the result is before the earliest representable date.
fn months_before(date: Date, months: u8) -> Option<Date> {
    let month_index =
        date.year() * 12 + i32::from(u8::from(date.month())) - 1 - i32::from(months);
    let year = month_index.div_euclid(12);
    let month = Month::try_from(u8::try_from(month_index.rem_euclid(12) + 1).ok()?).ok()?;
    let day = date.day().min(last_day_of_month(year, month));

    Date::from_calendar_date(year, month, day).ok()
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if time::util::is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use super::{ExchangeRateQuotation, LookbackWindow, months_before, select_quotation};

    fn quotation(rate: &str, record_date: Date) -> ExchangeRateQuotation {
        ExchangeRateQuotation {
            country_currency_desc: "Brazil-Real".to_owned(),
            exchange_rate: rate.to_owned(),
            record_date,
        }
    }

    #[test]
    fn window_spans_six_months() {
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        assert_eq!(window.start, date!(2023 - 03 - 21));
        assert_eq!(window.end, date!(2023 - 09 - 21));
    }

    #[test]
    fn window_includes_both_ends() {
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        assert!(window.contains(date!(2023 - 03 - 21)));
        assert!(window.contains(date!(2023 - 09 - 21)));
        assert!(!window.contains(date!(2023 - 03 - 20)));
        assert!(!window.contains(date!(2023 - 09 - 22)));
    }

    #[test]
    fn months_before_clamps_to_end_of_month() {
        assert_eq!(months_before(date!(2023 - 08 - 31), 6), Some(date!(2023 - 02 - 28)));
        assert_eq!(months_before(date!(2024 - 08 - 31), 6), Some(date!(2024 - 02 - 29)));
        assert_eq!(months_before(date!(2023 - 05 - 31), 6), Some(date!(2022 - 11 - 30)));
    }

    #[test]
    fn months_before_crosses_year_boundary() {
        assert_eq!(months_before(date!(2024 - 02 - 15), 6), Some(date!(2023 - 08 - 15)));
        assert_eq!(months_before(date!(2024 - 06 - 30), 6), Some(date!(2023 - 12 - 30)));
    }

    #[test]
    fn months_before_keeps_day_early_in_month() {
        assert_eq!(months_before(date!(2023 - 09 - 21), 6), Some(date!(2023 - 03 - 21)));
        assert_eq!(months_before(date!(2023 - 09 - 01), 6), Some(date!(2023 - 03 - 01)));
    }

    #[test]
    fn months_before_earliest_date_is_none() {
        assert_eq!(months_before(Date::MIN, 6), None);
    }

    #[test]
    fn window_near_earliest_date_starts_at_earliest_date() {
        let window = LookbackWindow::ending_on(Date::MIN);

        assert_eq!(window.start, Date::MIN);
        assert_eq!(window.end, Date::MIN);
    }

    #[test]
    fn stale_quotation_is_not_selected() {
        let quotations = [quotation("2.0", date!(2015 - 01 - 01))];
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        assert_eq!(select_quotation(&quotations, &window, "Brazil-Real"), None);
    }

    #[test]
    fn selects_closest_quotation_not_after_date() {
        let quotations = [
            quotation("3.1", date!(2023 - 09 - 01)),
            quotation("3.0", date!(2023 - 08 - 01)),
        ];
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        let selected = select_quotation(&quotations, &window, "Brazil-Real").unwrap();

        assert_eq!(selected.exchange_rate, "3.1");
    }

    #[test]
    fn selection_does_not_depend_on_order() {
        let quotations = [
            quotation("3.0", date!(2023 - 08 - 01)),
            quotation("3.1", date!(2023 - 09 - 01)),
            quotation("2.9", date!(2023 - 06 - 30)),
        ];
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        let selected = select_quotation(&quotations, &window, "Brazil-Real").unwrap();

        assert_eq!(selected.exchange_rate, "3.1");
    }

    #[test]
    fn first_quotation_wins_on_same_day() {
        let quotations = [
            quotation("3.1", date!(2023 - 09 - 01)),
            quotation("3.2", date!(2023 - 09 - 01)),
        ];
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        let selected = select_quotation(&quotations, &window, "Brazil-Real").unwrap();

        assert_eq!(selected.exchange_rate, "3.1");
    }

    #[test]
    fn ignores_quotations_outside_window() {
        let quotations = [
            quotation("3.5", date!(2023 - 09 - 30)),
            quotation("2.5", date!(2023 - 03 - 01)),
        ];
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        let selected = select_quotation(&quotations, &window, "Brazil-Real");

        assert_eq!(selected, None);
    }

    #[test]
    fn ignores_other_currencies() {
        let quotations = [ExchangeRateQuotation {
            country_currency_desc: "Canada-Dollar".to_owned(),
            ..quotation("1.35", date!(2023 - 09 - 01))
        }];
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        let selected = select_quotation(&quotations, &window, "Brazil-Real");

        assert_eq!(selected, None);
    }

    #[test]
    fn empty_feed_selects_nothing() {
        let window = LookbackWindow::ending_on(date!(2023 - 09 - 21));

        assert_eq!(select_quotation(&[], &window, "Brazil-Real"), None);
    }
}
