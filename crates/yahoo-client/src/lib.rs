use async_trait::async_trait;
use report_core::{MarketDataProvider, RawRecord, ReportError};
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Quote-summary modules requested per symbol. Earlier modules win when two
/// of them carry the same key.
pub const MODULES: [&str; 7] = [
    "financialData",
    "quoteType",
    "defaultKeyStatistics",
    "assetProfile",
    "summaryDetail",
    "price",
    "calendarEvents",
];

/// Connection settings for [`YahooClient`].
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub cookie_url: String,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Cookie and crumb pair Yahoo requires on quote-summary calls.
#[derive(Debug, Clone)]
struct Session {
    cookie: String,
    crumb: String,
}

/// Yahoo Finance quote-summary client.
///
/// Every fetch opens its own session and makes a single attempt: nothing is
/// cached, retried or shared between calls.
#[derive(Clone)]
pub struct YahooClient {
    config: YahooConfig,
    client: Client,
}

impl YahooClient {
    pub fn new(config: YahooConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    async fn send_request(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ReportError> {
        builder
            .send()
            .await
            .map_err(|e| ReportError::Provider(format!("Yahoo request failed: {}", e)))
    }

    /// Obtain a session cookie, then trade it for a crumb.
    async fn open_session(&self) -> Result<Session, ReportError> {
        // The cookie endpoint answers 404 but still sets the cookie.
        let response = self.send_request(self.client.get(&self.config.cookie_url)).await?;
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        if cookie.is_empty() {
            return Err(ReportError::Provider("Yahoo did not issue a session cookie".to_string()));
        }

        let url = format!("{}/v1/test/getcrumb", self.config.base_url.trim_end_matches('/'));
        let response = self
            .send_request(self.client.get(&url).header(COOKIE, &cookie))
            .await?;

        let status = response.status();
        let crumb = response.text().await.unwrap_or_default().trim().to_string();
        if !status.is_success() || crumb.is_empty() {
            return Err(ReportError::Provider(format!(
                "Failed to obtain Yahoo crumb: HTTP {}",
                status
            )));
        }

        tracing::debug!("Yahoo session established");
        Ok(Session { cookie, crumb })
    }

    fn quote_summary_url(&self, symbol: &str) -> Result<Url, ReportError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ReportError::Provider(format!("Invalid Yahoo base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ReportError::Provider("Invalid Yahoo base URL".to_string()))?
            .pop_if_empty()
            .extend(["v10", "finance", "quoteSummary", symbol]);
        Ok(url)
    }

    /// Fetch the quote summary for `symbol` and flatten it into a raw record.
    pub async fn get_quote_summary(&self, symbol: &str) -> Result<RawRecord, ReportError> {
        let session = self.open_session().await?;
        let url = self.quote_summary_url(symbol)?;
        let modules = MODULES.join(",");

        let response = self
            .send_request(
                self.client
                    .get(url)
                    .header(COOKIE, &session.cookie)
                    .query(&[("modules", modules.as_str()), ("crumb", session.crumb.as_str())]),
            )
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReportError::Provider(format!("Yahoo response unreadable: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<QuoteSummaryEnvelope>(&body)
                .ok()
                .and_then(|env| env.quote_summary.error)
                .and_then(|err| err.description)
                .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
            tracing::debug!(symbol = %symbol, %status, "Yahoo quote summary failed: {}", message);
            return Err(ReportError::Provider(message));
        }

        let envelope: QuoteSummaryEnvelope = serde_json::from_str(&body)
            .map_err(|e| ReportError::InvalidResponse(e.to_string()))?;
        parse_quote_summary(envelope, symbol)
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn fetch(&self, symbol: &str) -> Result<RawRecord, ReportError> {
        self.get_quote_summary(symbol).await
    }
}

fn parse_quote_summary(
    envelope: QuoteSummaryEnvelope,
    symbol: &str,
) -> Result<RawRecord, ReportError> {
    let QuoteSummaryBody { result, error } = envelope.quote_summary;

    if let Some(err) = error {
        let message = err
            .description
            .or(err.code)
            .unwrap_or_else(|| format!("Yahoo rejected symbol {}", symbol));
        return Err(ReportError::Provider(message));
    }

    let first = result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ReportError::Provider(format!("No data found for symbol {}", symbol)))?;

    Ok(flatten_modules(&first, &MODULES))
}

/// Merge quote-summary modules into one flat record.
///
/// `{"raw": x, "fmt": ..}` becomes `x`, `{"fmt": s, ..}` without `raw` becomes `s`, and
/// `{}` counts as absent. The first module that supplies a key keeps it.
pub fn flatten_modules(result: &Map<String, Value>, modules: &[&str]) -> RawRecord {
    let mut record = RawRecord::new();

    for module in modules {
        let Some(Value::Object(fields)) = result.get(*module) else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" || record.contains_key(key) {
                continue;
            }
            if let Some(value) = unwrap_value(value) {
                record.insert(key.clone(), value);
            }
        }
    }

    record
}

fn unwrap_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(obj) if obj.is_empty() => None,
        Value::Object(obj) => {
            if let Some(raw) = obj.get("raw") {
                Some(raw.clone())
            } else if let Some(fmt) = obj.get("fmt") {
                Some(fmt.clone())
            } else {
                Some(value.clone())
            }
        }
        other => Some(other.clone()),
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<QuoteSummaryError>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryError {
    code: Option<String>,
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{AppendHeaders, IntoResponse};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn fixture() -> Value {
        json!({
            "quoteSummary": {
                "result": [{
                    "financialData": {
                        "maxAge": 86400,
                        "currentPrice": {"raw": 189.98, "fmt": "189.98"},
                        "targetHighPrice": {"raw": 250.0, "fmt": "250.00"},
                        "recommendationKey": "buy",
                        "ebitdaMargins": {}
                    },
                    "summaryDetail": {
                        "previousClose": {"raw": 187.5, "fmt": "187.50"},
                        "volume": {"raw": 52000000, "fmt": "52M", "longFmt": "52,000,000"},
                        "currency": "USD",
                        "currentPrice": {"raw": 1.0, "fmt": "1.00"}
                    },
                    "defaultKeyStatistics": {
                        "52WeekChange": {"raw": 0.2134, "fmt": "21.34%"},
                        "mostRecentQuarter": {"raw": 1711756800, "fmt": "2024-03-30"},
                        "lastSplitFactor": {"fmt": "4:1"},
                        "lastSplitDate": {"fmt": "2020-08-31", "longFmt": "August 31, 2020"}
                    },
                    "assetProfile": {
                        "sector": "Technology",
                        "fullTimeEmployees": 161000,
                        "companyOfficers": [{"name": "someone"}]
                    },
                    "unrequested": {"secret": 1}
                }],
                "error": null
            }
        })
    }

    #[test]
    fn test_flatten_unwraps_raw_values() {
        let env: QuoteSummaryEnvelope = serde_json::from_value(fixture()).unwrap();
        let record = parse_quote_summary(env, "AAPL").unwrap();

        assert_eq!(record.get("currentPrice"), Some(&json!(189.98)));
        assert_eq!(record.get("previousClose"), Some(&json!(187.5)));
        assert_eq!(record.get("volume"), Some(&json!(52000000)));
        assert_eq!(record.get("recommendationKey"), Some(&json!("buy")));
        assert_eq!(record.get("52WeekChange"), Some(&json!(0.2134)));
        assert_eq!(record.get("mostRecentQuarter"), Some(&json!(1711756800)));
        assert_eq!(record.get("lastSplitFactor"), Some(&json!("4:1")));
        assert_eq!(record.get("lastSplitDate"), Some(&json!("2020-08-31")));
        assert_eq!(record.get("fullTimeEmployees"), Some(&json!(161000)));
        assert!(record.get("companyOfficers").is_some());
    }

    #[test]
    fn test_flatten_drops_empty_objects_and_metadata() {
        let env: QuoteSummaryEnvelope = serde_json::from_value(fixture()).unwrap();
        let record = parse_quote_summary(env, "AAPL").unwrap();

        assert!(!record.contains_key("ebitdaMargins"));
        assert!(!record.contains_key("maxAge"));
        assert!(!record.contains_key("secret"));
    }

    #[test]
    fn test_flatten_first_module_wins() {
        let env: QuoteSummaryEnvelope = serde_json::from_value(fixture()).unwrap();
        let record = parse_quote_summary(env, "AAPL").unwrap();
        // financialData precedes summaryDetail
        assert_eq!(record.get("currentPrice"), Some(&json!(189.98)));
    }

    #[test]
    fn test_provider_error_description_is_surfaced() {
        let env: QuoteSummaryEnvelope = serde_json::from_value(json!({
            "quoteSummary": {
                "result": null,
                "error": {
                    "code": "Not Found",
                    "description": "Quote not found for ticker symbol: ZZZZ"
                }
            }
        }))
        .unwrap();
        let err = parse_quote_summary(env, "ZZZZ").unwrap_err();
        assert_eq!(
            err,
            ReportError::Provider("Quote not found for ticker symbol: ZZZZ".to_string())
        );
    }

    #[test]
    fn test_empty_result_is_an_error() {
        let env: QuoteSummaryEnvelope =
            serde_json::from_value(json!({"quoteSummary": {"result": [], "error": null}})).unwrap();
        assert!(parse_quote_summary(env, "ZZZZ").is_err());
    }

    #[test]
    fn test_quote_summary_url_escapes_symbol() {
        let client = YahooClient::new(YahooConfig {
            base_url: "http://localhost:9999/".to_string(),
            ..YahooConfig::default()
        });
        let url = client.quote_summary_url("BRK/B").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9999/v10/finance/quoteSummary/BRK%2FB");
    }

    async fn crumb(headers: HeaderMap) -> impl IntoResponse {
        match headers.get("cookie").and_then(|v| v.to_str().ok()) {
            Some("A3=session; B=other") => (StatusCode::OK, "crumb-123".to_string()),
            _ => (StatusCode::UNAUTHORIZED, String::new()),
        }
    }

    async fn quote_summary(
        Path(symbol): Path<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        if params.get("crumb").map(String::as_str) != Some("crumb-123") {
            return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
        }
        if symbol == "AAPL" {
            return Json(fixture()).into_response();
        }
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "quoteSummary": {
                    "result": null,
                    "error": {
                        "code": "Not Found",
                        "description": format!("Quote not found for ticker symbol: {}", symbol)
                    }
                }
            })),
        )
            .into_response()
    }

    async fn spawn_stub() -> YahooConfig {
        let app = Router::new()
            .route(
                "/cookie",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        AppendHeaders([
                            ("set-cookie", "A3=session; Domain=.yahoo.com; Path=/"),
                            ("set-cookie", "B=other; Path=/"),
                        ]),
                    )
                }),
            )
            .route("/v1/test/getcrumb", get(crumb))
            .route("/v10/finance/quoteSummary/:symbol", get(quote_summary));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        YahooConfig {
            base_url: format!("http://{}", addr),
            cookie_url: format!("http://{}/cookie", addr),
            ..YahooConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_against_stub_server() {
        let client = YahooClient::new(spawn_stub().await);
        let record = client.fetch("AAPL").await.unwrap();
        assert_eq!(record.get("currentPrice"), Some(&json!(189.98)));
        assert_eq!(record.get("sector"), Some(&json!("Technology")));
    }

    #[tokio::test]
    async fn test_fetch_unknown_symbol_fails_with_provider_message() {
        let client = YahooClient::new(spawn_stub().await);
        let err = client.fetch("ZZZZ").await.unwrap_err();
        assert_eq!(err.to_string(), "Quote not found for ticker symbol: ZZZZ");
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_provider() {
        let client = YahooClient::new(YahooConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            cookie_url: "http://127.0.0.1:1/cookie".to_string(),
            ..YahooConfig::default()
        });
        let err = client.fetch("AAPL").await.unwrap_err();
        assert!(matches!(err, ReportError::Provider(_)));
    }
}
