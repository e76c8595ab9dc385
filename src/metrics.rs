use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

use crate::city::City;

/// Install the Prometheus recorder and describe all metrics
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "price_predictions_total",
        "Total number of price predictions, by city and outcome"
    );
    describe_counter!(
        "price_prediction_errors_total",
        "Total number of failed price predictions, by error type"
    );
    describe_histogram!(
        "price_prediction_duration_seconds",
        "Time spent computing a price estimate"
    );
    describe_gauge!(
        "area_price_model_loaded",
        "1 when the regression model is loaded, 0 otherwise"
    );
    describe_gauge!("area_price_info", "Predictor version information");

    gauge!("area_price_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a prediction attempt
pub fn record_prediction(city: City, outcome: &'static str) {
    counter!(
        "price_predictions_total",
        "city" => city.as_str(),
        "outcome" => outcome,
    )
    .increment(1);
}

/// Record estimate duration
pub fn record_duration(city: City, duration: Duration) {
    histogram!("price_prediction_duration_seconds", "city" => city.as_str())
        .record(duration.as_secs_f64());
}

/// Record an error
pub fn record_error(error_type: &'static str) {
    counter!("price_prediction_errors_total", "error_type" => error_type).increment(1);
}

pub fn set_model_loaded(loaded: bool) {
    gauge!("area_price_model_loaded").set(if loaded { 1.0 } else { 0.0 });
}
