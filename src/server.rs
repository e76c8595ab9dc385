use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    banner,
    config::Config,
    estimator::PriceEstimator,
    handlers::{self, AppState},
    metrics,
    model::ModelState,
    signals::setup_signal_handlers,
};

/// Start the predictor web server
///
/// This function:
/// 1. Initializes metrics
/// 2. Loads the model artifact and fetches the banner
/// 3. Sets up signal handlers for graceful shutdown
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    let app_state = build_state(config.clone()).await;
    if !app_state.estimator.model_state().is_loaded() {
        tracing::warn!("Serving without a model; predictions will report an error");
    }

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(&config, app_state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting Area-Price Predictor on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Load the model, fetch the banner and assemble the shared state
pub async fn build_state(config: Config) -> AppState {
    let model = ModelState::load_from(&config.model.path);
    metrics::set_model_loaded(model.is_loaded());

    let banner = banner::load_banner(&config.banner).await.map(Arc::new);

    AppState {
        config: Arc::new(config),
        estimator: Arc::new(PriceEstimator::new(model)),
        banner,
    }
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    config: &Config,
    app_state: AppState,
    metrics_handle: Option<Arc<PrometheusHandle>>,
) -> Router {
    let app_routes = Router::new()
        .route("/", get(handlers::form::show_form))
        .route("/predict", post(handlers::form::submit_form))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/v1/predict", post(handlers::api::predict))
        .with_state(app_state);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/cities", get(handlers::api::list_cities))
        .merge(app_routes);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route(
                    &config.metrics.endpoint,
                    get(handlers::metrics_handler::metrics),
                )
                .with_state(handle),
        );
    }

    router
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
}
