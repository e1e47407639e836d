//! The categorized ticker report.
//!
//! Every category is a plain struct so its key set is fixed at compile time:
//! a field with no source value serializes as `null`, it is never omitted.
//! Several fields repeat across categories on purpose so each section can be
//! consumed on its own.

use serde::{Deserialize, Serialize};

/// Full report for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Report {
    /// Requested symbol, upper-cased.
    pub ticker: String,
    pub success: bool,
    pub main_info: MainInfo,
    pub company_info: CompanyInfo,
    pub valuation: Valuation,
    pub ratios: Ratios,
    pub returns: Returns,
    pub growth: Growth,
    pub price_performance: PricePerformance,
    pub risk: Risk,
    pub debt: Debt,
    pub trading_info: TradingInfo,
    pub price_targets: PriceTargets,
    pub dividends: Dividends,
    pub earnings: Earnings,
    pub company_business: CompanyBusiness,
}

/// Names of the fourteen categories, in serialization order.
pub const CATEGORY_NAMES: [&str; 14] = [
    "main_info",
    "company_info",
    "valuation",
    "ratios",
    "returns",
    "growth",
    "price_performance",
    "risk",
    "debt",
    "trading_info",
    "price_targets",
    "dividends",
    "earnings",
    "company_business",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MainInfo {
    pub symbol: Option<String>,
    pub short_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub currency: Option<String>,
    pub current_price: Option<f64>,
    /// Percent change from the previous close, e.g. `"1.25%"`.
    pub one_day_change: Option<String>,
    pub fifty_two_week_change: Option<String>,
    pub market_cap: Option<String>,
    #[serde(rename = "PS")]
    pub ps: Option<f64>,
    #[serde(rename = "PE")]
    pub pe: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    pub recommendation: Option<String>,
    #[serde(rename = "PT_Low")]
    pub pt_low: Option<f64>,
    #[serde(rename = "PT_High")]
    pub pt_high: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub website: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub full_time_employees: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub market_cap: Option<String>,
    pub enterprise_value: Option<String>,
    pub price_to_book: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub enterprise_to_revenue: Option<f64>,
    pub enterprise_to_ebitda: Option<f64>,
    pub shares_outstanding: Option<String>,
    pub float_shares: Option<String>,
    pub implied_shares_outstanding: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Ratios {
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub profit_margins: Option<String>,
    pub operating_margins: Option<String>,
    pub return_on_assets: Option<String>,
    pub return_on_equity: Option<String>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Returns {
    pub return_on_assets: Option<String>,
    pub return_on_equity: Option<String>,
    pub profit_margins: Option<String>,
    pub operating_margins: Option<String>,
    pub gross_margins: Option<String>,
    pub ebitda_margins: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub revenue_growth: Option<String>,
    pub earnings_growth: Option<String>,
    pub earnings_quarterly_growth: Option<String>,
    pub revenue_per_share: Option<f64>,
    pub earnings_per_share: Option<f64>,
    pub forward_eps: Option<f64>,
    pub book_value: Option<f64>,
    pub total_revenue: Option<String>,
    pub enterprise_value: Option<String>,
    pub peg_ratio: Option<f64>,
    pub trailing_peg_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PricePerformance {
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub open: Option<f64>,
    pub day_low: Option<f64>,
    pub day_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_day_average: Option<f64>,
    pub two_hundred_day_average: Option<f64>,
    pub fifty_two_week_change: Option<String>,
    /// S&P 500 change over the same 52 weeks.
    #[serde(rename = "SandP52WeekChange")]
    pub s_and_p_52_week_change: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub beta: Option<f64>,
    pub beta3_year: Option<f64>,
    pub overall_risk: Option<i64>,
    pub audit_risk: Option<i64>,
    pub board_risk: Option<i64>,
    pub compensation_risk: Option<i64>,
    pub share_holder_rights_risk: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub total_debt: Option<String>,
    pub total_cash: Option<String>,
    pub total_cash_per_share: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub free_cashflow: Option<String>,
    pub operating_cashflow: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TradingInfo {
    pub volume: Option<i64>,
    pub average_volume: Option<i64>,
    #[serde(rename = "averageVolume10days")]
    pub average_volume_10days: Option<i64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub bid_size: Option<i64>,
    pub ask_size: Option<i64>,
    pub fifty_day_average: Option<f64>,
    pub two_hundred_day_average: Option<f64>,
    #[serde(rename = "changeFrom50DayAverage")]
    pub change_from_50_day_average: Option<f64>,
    #[serde(rename = "changeFrom200DayAverage")]
    pub change_from_200_day_average: Option<f64>,
    pub one_day_change: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PriceTargets {
    pub target_high_price: Option<f64>,
    pub target_low_price: Option<f64>,
    pub target_mean_price: Option<f64>,
    pub target_median_price: Option<f64>,
    pub recommendation_mean: Option<f64>,
    pub recommendation_key: Option<String>,
    pub number_of_analyst_opinions: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Dividends {
    pub dividend_rate: Option<f64>,
    pub dividend_yield: Option<String>,
    pub payout_ratio: Option<String>,
    pub five_year_avg_dividend_yield: Option<String>,
    pub trailing_annual_dividend_yield: Option<String>,
    /// Epoch seconds, as supplied.
    pub ex_dividend_date: Option<i64>,
    pub trailing_annual_dividend_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Earnings {
    pub trailing_eps: Option<f64>,
    pub forward_eps: Option<f64>,
    pub most_recent_quarter: Option<i64>,
    pub net_income_to_common: Option<String>,
    pub trailing_peg_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyBusiness {
    pub short_name: Option<String>,
    pub long_business_summary: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "logo_url")]
    pub logo_url: Option<String>,
}

/// Compact quote: price and market cap only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub ticker: String,
    pub price: Option<f64>,
    pub market_cap: Option<String>,
    pub success: bool,
}

/// Body returned whenever a request fails. Never carries report data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorReport {
    pub error: String,
    pub success: bool,
}

impl ErrorReport {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            success: false,
        }
    }
}
