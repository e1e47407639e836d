//! Ticker report API routes
//!
//! Each endpoint takes the symbol from the `ticker` query parameter, fetches
//! the raw record once and shapes it. Fetch failures surface as 500s with an
//! `ErrorReport` body; a missing symbol is a 400.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
    routing::get,
    Router,
};
use report_builder::normalize_ticker;
use report_core::{strip_personnel, QuoteSummary, RawRecord, Report, ReportError};

use crate::{AppError, AppState, PrettyJson};

const MISSING_TICKER: &str = "Missing ticker parameter";

#[derive(Debug, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TickerQuery {
    /// Ticker symbol, case-insensitive.
    pub ticker: Option<String>,
}

impl TickerQuery {
    /// Pick the `ticker` value out of decoded query pairs. A repeated key
    /// resolves to its first occurrence.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            ticker: pairs
                .into_iter()
                .find(|(key, _)| key == "ticker")
                .map(|(_, value)| value),
        }
    }

    /// Normalized symbol, or a MissingInput error when absent or blank.
    pub fn symbol(&self) -> Result<String, ReportError> {
        self.ticker
            .as_deref()
            .map(str::trim)
            .map(normalize_ticker)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ReportError::MissingInput(MISSING_TICKER.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TickerQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Decoding into pairs rather than a struct tolerates repeated keys.
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("unreadable query string: {}", e);
                AppError::MissingInput(MISSING_TICKER.to_string())
            })?;
        Ok(Self::from_pairs(pairs))
    }
}

pub fn ticker_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ticker", get(get_ticker_report))
        .route("/api/ticker/raw", get(get_raw_ticker))
        .route("/api/ticker/quote", get(get_ticker_quote))
}

async fn fetch_record(state: &AppState, symbol: &str) -> Result<RawRecord, AppError> {
    match state.provider.fetch(symbol).await {
        Ok(record) => {
            tracing::debug!(symbol = %symbol, fields = record.len(), "fetched raw record");
            Ok(record)
        }
        Err(e) => {
            tracing::warn!(symbol = %symbol, "fetch failed: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/ticker",
    params(TickerQuery),
    responses(
        (status = 200, description = "Categorized ticker report", body = Report),
        (status = 400, description = "Missing ticker parameter", body = report_core::ErrorReport),
        (status = 500, description = "Provider failure", body = report_core::ErrorReport)
    ),
    tag = "Ticker"
)]
pub async fn get_ticker_report(
    State(state): State<AppState>,
    query: TickerQuery,
) -> Result<PrettyJson<Report>, AppError> {
    let symbol = query.symbol()?;
    let record = fetch_record(&state, &symbol).await?;
    Ok(PrettyJson(state.builder.build(&record, &symbol)))
}

#[utoipa::path(
    get,
    path = "/api/ticker/raw",
    params(TickerQuery),
    responses(
        (status = 200, description = "Raw provider record without personnel fields"),
        (status = 400, description = "Missing ticker parameter", body = report_core::ErrorReport),
        (status = 500, description = "Provider failure", body = report_core::ErrorReport)
    ),
    tag = "Ticker"
)]
pub async fn get_raw_ticker(
    State(state): State<AppState>,
    query: TickerQuery,
) -> Result<PrettyJson<RawRecord>, AppError> {
    let symbol = query.symbol()?;
    let record = fetch_record(&state, &symbol).await?;
    Ok(PrettyJson(strip_personnel(record)))
}

#[utoipa::path(
    get,
    path = "/api/ticker/quote",
    params(TickerQuery),
    responses(
        (status = 200, description = "Price and market cap", body = QuoteSummary),
        (status = 400, description = "Missing ticker parameter", body = report_core::ErrorReport),
        (status = 500, description = "Provider failure", body = report_core::ErrorReport)
    ),
    tag = "Ticker"
)]
pub async fn get_ticker_quote(
    State(state): State<AppState>,
    query: TickerQuery,
) -> Result<PrettyJson<QuoteSummary>, AppError> {
    let symbol = query.symbol()?;
    let record = fetch_record(&state, &symbol).await?;
    Ok(PrettyJson(state.builder.quote(&record, &symbol)))
}
