//! HTTP boundary for the ticker report service.
//!
//! The service is stateless between requests: every call fetches a fresh raw
//! record, shapes it and discards it.

mod config;
mod request_id;
mod ticker_routes;

#[cfg(test)]
mod routes_tests;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use report_builder::ReportBuilder;
use report_core::{ErrorReport, MarketDataProvider, ReportError};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use yahoo_client::YahooClient;

pub use config::ServerConfig;
pub use request_id::{make_request_span, request_id_middleware};
pub use ticker_routes::{ticker_routes, TickerQuery};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MarketDataProvider>,
    pub builder: Arc<ReportBuilder>,
}

impl AppState {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            builder: Arc::new(ReportBuilder::new()),
        }
    }
}

/// Request-level failure, rendered as an [`ErrorReport`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    Fetch(String),

    #[error("{0}")]
    Internal(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MissingInput(msg) => AppError::MissingInput(msg),
            other => AppError::Fetch(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(ErrorReport::new(self.to_string()))).into_response()
    }
}

/// JSON body serialized with two-space indentation.
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            Err(e) => {
                AppError::Internal(format!("Failed to serialize response: {}", e)).into_response()
            }
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        ticker_routes::get_ticker_report,
        ticker_routes::get_raw_ticker,
        ticker_routes::get_ticker_quote,
    ),
    components(schemas(report_core::Report, report_core::QuoteSummary, report_core::ErrorReport)),
    tags((name = "Ticker", description = "Categorized ticker reports"))
)]
pub struct ApiDoc;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(ticker_routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(cors)
        .with_state(state)
}

/// Install the global tracing subscriber. `RUST_LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter()).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let provider = YahooClient::new(config.yahoo.clone());
    let app = create_app(AppState::new(Arc::new(provider)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("ticker-api listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
