#[cfg(test)]
mod tests {
    use super::super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use report_core::{RawRecord, CATEGORY_NAMES};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// In-memory provider: known symbols return their record, anything else
    /// fails the way Yahoo does for an unknown ticker.
    #[derive(Default)]
    struct StubProvider {
        records: HashMap<String, RawRecord>,
        calls: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn with(mut self, symbol: &str, record: Value) -> Self {
            self.records
                .insert(symbol.to_string(), record.as_object().cloned().unwrap_or_default());
            self
        }
    }

    #[async_trait]
    impl MarketDataProvider for StubProvider {
        async fn fetch(&self, symbol: &str) -> Result<RawRecord, ReportError> {
            self.calls.lock().unwrap().push(symbol.to_string());
            self.records.get(symbol).cloned().ok_or_else(|| {
                ReportError::Provider(format!("Quote not found for ticker symbol: {}", symbol))
            })
        }
    }

    fn stub() -> StubProvider {
        StubProvider::default()
            .with(
                "AAPL",
                json!({
                    "symbol": "AAPL",
                    "shortName": "Apple Inc.",
                    "currentPrice": 150,
                    "previousClose": 100,
                    "fiftyDayAverage": 120,
                    "marketCap": 2_500_000_000_i64,
                    "companyOfficers": [{"name": "someone"}],
                    "fullTimeEmployees": 161000
                }),
            )
            .with("EMPTY", json!({}))
    }

    async fn get(
        provider: Arc<StubProvider>,
        uri: &str,
    ) -> (StatusCode, axum::http::HeaderMap, String) {
        let app = create_app(AppState::new(provider));
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_ticker_is_bad_request() {
        let provider = Arc::new(stub());
        for uri in ["/api/ticker", "/api/ticker?ticker=", "/api/ticker?ticker=%20%20"] {
            let (status, _, body) = get(provider.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let value: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(value, json!({"error": "Missing ticker parameter", "success": false}));
        }
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_ticker_uses_first_value() {
        let provider = Arc::new(stub().with("MSFT", json!({"currentPrice": 400})));
        let (status, headers, body) =
            get(provider.clone(), "/api/ticker?ticker=aapl&ticker=msft").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(*provider.calls.lock().unwrap(), vec!["AAPL".to_string()]);

        let (status, _, body) = get(provider, "/api/ticker/quote?ticker=msft&ticker=aapl").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ticker"], "MSFT");
        assert_eq!(value["price"], json!(400.0));
    }

    #[tokio::test]
    async fn test_report_success() {
        let provider = Arc::new(stub());
        let (status, headers, body) = get(provider.clone(), "/api/ticker?ticker=aapl").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
        assert!(body.contains("\n  \"ticker\": \"AAPL\""), "body is not pretty-printed: {body}");

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["success"], true);
        for name in CATEGORY_NAMES {
            assert!(value[name].is_object(), "missing category {name}");
        }
        assert_eq!(value["main_info"]["currentPrice"], json!(150.0));
        assert_eq!(value["main_info"]["marketCap"], "2.50B$");
        assert_eq!(value["main_info"]["oneDayChange"], "50.00%");
        assert_eq!(value["main_info"]["oneDayChange"], value["trading_info"]["oneDayChange"]);
        assert_eq!(value["trading_info"]["changeFrom50DayAverage"], json!(25.0));
        assert!(value["trading_info"]["changeFrom200DayAverage"].is_null());

        assert_eq!(*provider.calls.lock().unwrap(), vec!["AAPL".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_record_still_returns_full_shape() {
        let (status, _, body) = get(Arc::new(stub()), "/api/ticker?ticker=empty").await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ticker"], "EMPTY");
        for name in CATEGORY_NAMES {
            let category = value[name].as_object().unwrap();
            assert!(category.values().all(Value::is_null), "{name} has non-null fields");
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_server_error() {
        let (status, headers, body) = get(Arc::new(stub()), "/api/ticker?ticker=zzzz").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({"error": "Quote not found for ticker symbol: ZZZZ", "success": false})
        );
    }

    #[tokio::test]
    async fn test_raw_endpoint_strips_personnel() {
        let (status, _, body) = get(Arc::new(stub()), "/api/ticker/raw?ticker=AAPL").await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["shortName"], "Apple Inc.");
        assert!(value.get("companyOfficers").is_none());
        assert!(value.get("fullTimeEmployees").is_none());
    }

    #[tokio::test]
    async fn test_quote_endpoint() {
        let (status, _, body) = get(Arc::new(stub()), "/api/ticker/quote?ticker=aapl").await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({"ticker": "AAPL", "price": 150.0, "marketCap": "2.50B$", "success": true})
        );

        let (status, _, _) = get(Arc::new(stub()), "/api/ticker/quote").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_request_id_is_generated_and_propagated() {
        let (_, headers, _) = get(Arc::new(stub()), "/health").await;
        let generated = headers.get("x-request-id").unwrap().to_str().unwrap();
        assert_eq!(generated.len(), 36);

        let app = create_app(AppState::new(Arc::new(stub())));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
    }

    #[tokio::test]
    async fn test_health_and_openapi() {
        let (status, _, body) = get(Arc::new(stub()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "ok");

        let (status, _, body) = get(Arc::new(stub()), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert!(value["paths"].get("/api/ticker").is_some());
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            AppError::from(ReportError::MissingInput("Missing ticker parameter".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ReportError::Provider("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ReportError::InvalidResponse("bad json".into())).to_string(),
            "Invalid provider response: bad json"
        );
    }
}
