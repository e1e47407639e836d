//! One assembly function per report category.
//!
//! Each function is a flat list of `field: primitive(source)` lines so the
//! mapping from provider keys to report keys can be read top to bottom.

use report_core::format::{
    number, passthrough_int, passthrough_str, percentage, scaled_billions, scaled_millions,
};
use report_core::{
    CompanyBusiness, CompanyInfo, Debt, Dividends, Earnings, Growth, MainInfo, PricePerformance,
    PriceTargets, Ratios, RawRecord, Returns, Risk, TradingInfo, Valuation,
};
use serde_json::Value;

use crate::Anchors;

/// First non-`None` result of `primitive` over `keys`.
fn first_of<T>(
    record: &RawRecord,
    keys: &[&str],
    primitive: fn(Option<&Value>) -> Option<T>,
) -> Option<T> {
    keys.iter().find_map(|key| primitive(record.get(*key)))
}

pub fn main_info(r: &RawRecord, anchors: &Anchors<'_>) -> MainInfo {
    MainInfo {
        symbol: passthrough_str(r.get("symbol")),
        short_name: passthrough_str(r.get("shortName")),
        sector: passthrough_str(r.get("sector")),
        industry: passthrough_str(r.get("industry")),
        currency: passthrough_str(r.get("currency")),
        current_price: number(anchors.current_price),
        one_day_change: anchors.one_day_change.clone(),
        fifty_two_week_change: percentage(r.get("52WeekChange")),
        market_cap: scaled_billions(r.get("marketCap")),
        ps: number(r.get("priceToSalesTrailing12Months")),
        pe: number(r.get("trailingPE")),
        forward_pe: number(r.get("forwardPE")),
        recommendation: passthrough_str(r.get("recommendationKey")),
        pt_low: number(r.get("targetLowPrice")),
        pt_high: number(r.get("targetHighPrice")),
    }
}

pub fn company_info(r: &RawRecord) -> CompanyInfo {
    CompanyInfo {
        website: passthrough_str(r.get("website")),
        address1: passthrough_str(r.get("address1")),
        city: passthrough_str(r.get("city")),
        state: passthrough_str(r.get("state")),
        zip: passthrough_str(r.get("zip")),
        country: passthrough_str(r.get("country")),
        phone: passthrough_str(r.get("phone")),
        sector: passthrough_str(r.get("sector")),
        industry: passthrough_str(r.get("industry")),
        full_time_employees: passthrough_int(r.get("fullTimeEmployees")),
    }
}

pub fn valuation(r: &RawRecord) -> Valuation {
    Valuation {
        market_cap: scaled_billions(r.get("marketCap")),
        enterprise_value: scaled_billions(r.get("enterpriseValue")),
        price_to_book: number(r.get("priceToBook")),
        price_to_sales: number(r.get("priceToSalesTrailing12Months")),
        enterprise_to_revenue: number(r.get("enterpriseToRevenue")),
        enterprise_to_ebitda: number(r.get("enterpriseToEbitda")),
        shares_outstanding: scaled_millions(r.get("sharesOutstanding")),
        float_shares: scaled_millions(r.get("floatShares")),
        implied_shares_outstanding: scaled_millions(r.get("impliedSharesOutstanding")),
    }
}

pub fn ratios(r: &RawRecord) -> Ratios {
    Ratios {
        trailing_pe: number(r.get("trailingPE")),
        forward_pe: number(r.get("forwardPE")),
        peg_ratio: number(r.get("pegRatio")),
        price_to_book: number(r.get("priceToBook")),
        price_to_sales: number(r.get("priceToSalesTrailing12Months")),
        profit_margins: percentage(r.get("profitMargins")),
        operating_margins: percentage(r.get("operatingMargins")),
        return_on_assets: percentage(r.get("returnOnAssets")),
        return_on_equity: percentage(r.get("returnOnEquity")),
        current_ratio: number(r.get("currentRatio")),
        quick_ratio: number(r.get("quickRatio")),
        debt_to_equity: number(r.get("debtToEquity")),
    }
}

pub fn returns(r: &RawRecord) -> Returns {
    Returns {
        return_on_assets: percentage(r.get("returnOnAssets")),
        return_on_equity: percentage(r.get("returnOnEquity")),
        profit_margins: percentage(r.get("profitMargins")),
        operating_margins: percentage(r.get("operatingMargins")),
        gross_margins: percentage(r.get("grossMargins")),
        ebitda_margins: percentage(r.get("ebitdaMargins")),
    }
}

pub fn growth(r: &RawRecord) -> Growth {
    Growth {
        revenue_growth: percentage(r.get("revenueGrowth")),
        earnings_growth: percentage(r.get("earningsGrowth")),
        earnings_quarterly_growth: percentage(r.get("earningsQuarterlyGrowth")),
        revenue_per_share: number(r.get("revenuePerShare")),
        earnings_per_share: number(r.get("trailingEps")),
        forward_eps: number(r.get("forwardEps")),
        book_value: number(r.get("bookValue")),
        total_revenue: scaled_billions(r.get("totalRevenue")),
        enterprise_value: scaled_billions(r.get("enterpriseValue")),
        peg_ratio: number(r.get("pegRatio")),
        trailing_peg_ratio: number(r.get("trailingPegRatio")),
    }
}

pub fn price_performance(r: &RawRecord, anchors: &Anchors<'_>) -> PricePerformance {
    PricePerformance {
        current_price: number(anchors.current_price),
        previous_close: number(anchors.previous_close),
        open: first_of(r, &["open", "regularMarketOpen"], number),
        day_low: first_of(r, &["dayLow", "regularMarketDayLow"], number),
        day_high: first_of(r, &["dayHigh", "regularMarketDayHigh"], number),
        fifty_two_week_low: number(r.get("fiftyTwoWeekLow")),
        fifty_two_week_high: number(r.get("fiftyTwoWeekHigh")),
        fifty_day_average: number(r.get("fiftyDayAverage")),
        two_hundred_day_average: number(r.get("twoHundredDayAverage")),
        fifty_two_week_change: percentage(r.get("52WeekChange")),
        s_and_p_52_week_change: percentage(r.get("SandP52WeekChange")),
    }
}

pub fn risk(r: &RawRecord) -> Risk {
    Risk {
        beta: number(r.get("beta")),
        beta3_year: number(r.get("beta3Year")),
        overall_risk: passthrough_int(r.get("overallRisk")),
        audit_risk: passthrough_int(r.get("auditRisk")),
        board_risk: passthrough_int(r.get("boardRisk")),
        compensation_risk: passthrough_int(r.get("compensationRisk")),
        share_holder_rights_risk: passthrough_int(r.get("shareHolderRightsRisk")),
    }
}

pub fn debt(r: &RawRecord) -> Debt {
    Debt {
        total_debt: scaled_billions(r.get("totalDebt")),
        total_cash: scaled_billions(r.get("totalCash")),
        total_cash_per_share: number(r.get("totalCashPerShare")),
        debt_to_equity: number(r.get("debtToEquity")),
        current_ratio: number(r.get("currentRatio")),
        quick_ratio: number(r.get("quickRatio")),
        free_cashflow: scaled_billions(r.get("freeCashflow")),
        operating_cashflow: scaled_billions(r.get("operatingCashflow")),
    }
}

pub fn trading_info(r: &RawRecord, anchors: &Anchors<'_>) -> TradingInfo {
    TradingInfo {
        volume: first_of(r, &["volume", "regularMarketVolume"], passthrough_int),
        average_volume: passthrough_int(r.get("averageVolume")),
        average_volume_10days: passthrough_int(r.get("averageVolume10days")),
        bid: number(r.get("bid")),
        ask: number(r.get("ask")),
        bid_size: passthrough_int(r.get("bidSize")),
        ask_size: passthrough_int(r.get("askSize")),
        fifty_day_average: number(r.get("fiftyDayAverage")),
        two_hundred_day_average: number(r.get("twoHundredDayAverage")),
        change_from_50_day_average: anchors.change_from_50_day_average,
        change_from_200_day_average: anchors.change_from_200_day_average,
        one_day_change: anchors.one_day_change.clone(),
    }
}

pub fn price_targets(r: &RawRecord) -> PriceTargets {
    PriceTargets {
        target_high_price: number(r.get("targetHighPrice")),
        target_low_price: number(r.get("targetLowPrice")),
        target_mean_price: number(r.get("targetMeanPrice")),
        target_median_price: number(r.get("targetMedianPrice")),
        recommendation_mean: number(r.get("recommendationMean")),
        recommendation_key: passthrough_str(r.get("recommendationKey")),
        number_of_analyst_opinions: passthrough_int(r.get("numberOfAnalystOpinions")),
    }
}

pub fn dividends(r: &RawRecord) -> Dividends {
    Dividends {
        dividend_rate: number(r.get("dividendRate")),
        dividend_yield: percentage(r.get("dividendYield")),
        payout_ratio: percentage(r.get("payoutRatio")),
        five_year_avg_dividend_yield: percentage(r.get("fiveYearAvgDividendYield")),
        trailing_annual_dividend_yield: percentage(r.get("trailingAnnualDividendYield")),
        ex_dividend_date: passthrough_int(r.get("exDividendDate")),
        trailing_annual_dividend_rate: number(r.get("trailingAnnualDividendRate")),
    }
}

pub fn earnings(r: &RawRecord) -> Earnings {
    Earnings {
        trailing_eps: number(r.get("trailingEps")),
        forward_eps: number(r.get("forwardEps")),
        most_recent_quarter: passthrough_int(r.get("mostRecentQuarter")),
        net_income_to_common: scaled_billions(r.get("netIncomeToCommon")),
        trailing_peg_ratio: number(r.get("trailingPegRatio")),
    }
}

pub fn company_business(r: &RawRecord) -> CompanyBusiness {
    CompanyBusiness {
        short_name: passthrough_str(r.get("shortName")),
        long_business_summary: passthrough_str(r.get("longBusinessSummary")),
        sector: passthrough_str(r.get("sector")),
        industry: passthrough_str(r.get("industry")),
        website: passthrough_str(r.get("website")),
        logo_url: passthrough_str(r.get("logo_url")),
    }
}
