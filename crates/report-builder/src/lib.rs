//! Turns a provider's raw record into the fixed, categorized [`Report`].
//!
//! The builder is a pure function of its inputs. Missing or malformed source
//! fields null out individual report fields; they never remove a category or
//! fail the build.

mod categories;

use report_core::format::{number, percent_change, percent_change_label, scaled_billions};
use report_core::{first_numeric, QuoteSummary, RawRecord, Report};
use serde_json::Value;

pub use categories::*;

/// Live price first, regular-market price as fallback.
pub const CURRENT_PRICE_KEYS: [&str; 2] = ["currentPrice", "regularMarketPrice"];
/// Close first, regular-market previous close as fallback.
pub const PREVIOUS_CLOSE_KEYS: [&str; 2] = ["previousClose", "regularMarketPreviousClose"];

/// Values resolved once per build and shared by every category that shows them.
#[derive(Debug, Clone, Default)]
pub struct Anchors<'a> {
    pub current_price: Option<&'a Value>,
    pub previous_close: Option<&'a Value>,
    pub one_day_change: Option<String>,
    pub change_from_50_day_average: Option<f64>,
    pub change_from_200_day_average: Option<f64>,
}

impl<'a> Anchors<'a> {
    pub fn resolve(record: &'a RawRecord) -> Self {
        let current_price = first_numeric(record, &CURRENT_PRICE_KEYS);
        let previous_close = first_numeric(record, &PREVIOUS_CLOSE_KEYS);

        Self {
            current_price,
            previous_close,
            one_day_change: percent_change_label(current_price, previous_close),
            change_from_50_day_average: percent_change(
                current_price,
                record.get("fiftyDayAverage"),
            ),
            change_from_200_day_average: percent_change(
                current_price,
                record.get("twoHundredDayAverage"),
            ),
        }
    }
}

pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the full report. `ticker` is echoed upper-cased regardless of
    /// what symbol, if any, the record itself carries.
    pub fn build(&self, record: &RawRecord, ticker: &str) -> Report {
        let anchors = Anchors::resolve(record);

        tracing::debug!(
            ticker = %ticker,
            fields = record.len(),
            one_day_change = ?anchors.one_day_change,
            "building report"
        );

        Report {
            ticker: normalize_ticker(ticker),
            success: true,
            main_info: main_info(record, &anchors),
            company_info: company_info(record),
            valuation: valuation(record),
            ratios: ratios(record),
            returns: returns(record),
            growth: growth(record),
            price_performance: price_performance(record, &anchors),
            risk: risk(record),
            debt: debt(record),
            trading_info: trading_info(record, &anchors),
            price_targets: price_targets(record),
            dividends: dividends(record),
            earnings: earnings(record),
            company_business: company_business(record),
        }
    }

    /// Price and market cap only.
    pub fn quote(&self, record: &RawRecord, ticker: &str) -> QuoteSummary {
        QuoteSummary {
            ticker: normalize_ticker(ticker),
            price: number(first_numeric(record, &CURRENT_PRICE_KEYS)),
            market_cap: scaled_billions(record.get("marketCap")),
            success: true,
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper-case a requested symbol. Callers trim request input before it gets here.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.to_uppercase()
}
