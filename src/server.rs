//! HTTP API.
//!
//! | Route                                   | Response                               |
//! |-----------------------------------------|----------------------------------------|
//! | `GET /currency-prices`                  | display name → price or `null`         |
//! | `GET /exchange-rate?currency1=&currency2=` | `{"exchange_rate": f64}`            |
//! | `GET /currencies`                       | tracked currencies, registry order     |
//! | `GET /health`                           | `{"status": "ok"}`                     |
//!
//! Errors are `{"detail": "..."}` bodies.

use anyhow::{Context, Result};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::{Currency, PriceSnapshot, RateError, registry};
use crate::providers::tgju::TgjuProvider;
use crate::rates::RateService;

pub const FETCH_FAILED_DETAIL: &str = "Error fetching currency data";
pub const UNKNOWN_CURRENCY_DETAIL: &str =
    "Currency not found. Use /currencies to see available currencies.";
pub const PRICE_UNAVAILABLE_DETAIL: &str = "Could not fetch prices for the selected currencies.";
pub const MALFORMED_PRICE_DETAIL: &str =
    "Upstream returned a malformed price for the selected currencies.";
pub const EXTRACTION_FAILED_DETAIL: &str = "Error processing currency data";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::UpstreamUnavailable(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_DETAIL)
            }
            RateError::UnknownCurrency(_) => {
                ApiError::new(StatusCode::NOT_FOUND, UNKNOWN_CURRENCY_DETAIL)
            }
            RateError::PriceUnavailable(_) => {
                ApiError::new(StatusCode::NOT_FOUND, PRICE_UNAVAILABLE_DETAIL)
            }
            RateError::MalformedPrice(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, MALFORMED_PRICE_DETAIL)
            }
            RateError::Extraction(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, EXTRACTION_FAILED_DETAIL)
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ExchangeRateParams {
    currency1: String,
    currency2: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExchangeRateResponse {
    pub exchange_rate: f64,
}

pub fn router(service: RateService) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health))
        .route("/currencies", get(list_currencies))
        .route("/currency-prices", get(currency_prices))
        .route("/exchange-rate", get(exchange_rate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let provider = TgjuProvider::new(&config.upstream.url, config.upstream.timeout())
        .context("Failed to build HTTP client")?;
    let app = router(RateService::new(Arc::new(provider)));

    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(upstream = %config.upstream.url, "Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_currencies() -> Json<&'static [Currency]> {
    Json(registry::all())
}

async fn currency_prices(
    State(service): State<RateService>,
) -> Result<Json<PriceSnapshot>, ApiError> {
    Ok(Json(service.get_price_snapshot().await?))
}

async fn exchange_rate(
    State(service): State<RateService>,
    params: Result<Query<ExchangeRateParams>, QueryRejection>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let Query(params) = params?;
    let exchange_rate = service
        .get_exchange_rate(&params.currency1, &params.currency2)
        .await?;
    Ok(Json(ExchangeRateResponse { exchange_rate }))
}
