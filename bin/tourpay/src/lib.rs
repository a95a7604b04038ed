mod observability;

pub mod utility;

pub use tourpay_primitives::error::ApiError;

use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, load_env};
use eyre::Report;
use tourpay_core::app_state::AppState;
use tourpay_primitives::models::app_state::AppConfig;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();

    info!("Starting Tourpay application...");

    // 3. load configuration
    let config = AppConfig::from_env()?;

    // 4. build application state
    let state = AppState::new(config)?;

    // 5. initialize metrics
    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    // 6. build axum router
    let app = build_router(state, metric_layer, metric_handle)?;

    // 7. start HTTP server
    serve(app).await?;

    info!("Tourpay application shut down gracefully");
    Ok(())
}
