use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use eyre::Report;
use http::HeaderValue;
use std::env;
use std::sync::Arc;
use tourpay_core::app_state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Checkout is called from the public tour pages, so origins default
/// to permissive; `CORS_ORIGINS` narrows them to an explicit list.
pub fn build_cors() -> Result<CorsLayer, Report> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match env::var("CORS_ORIGINS") {
        Ok(origins) => {
            let allowed_origins = origins
                .split(',')
                .map(|s| s.trim().parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| eyre::eyre!("Invalid CORS origin: {}", e))?;

            Ok(cors.allow_origin(allowed_origins))
        }
        Err(_) => Ok(cors.allow_origin(Any)),
    }
}

pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    } else {
        info!("No .env file found, using system environment");
    }
}

pub fn build_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Result<Router, Report> {
    let cors = build_cors()?;

    Ok(tourpay_api::app::create_router(state, metric_layer, metric_handle).layer(cors))
}
