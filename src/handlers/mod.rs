//! HTTP handlers
//!
//! - form: the HTML prediction form
//! - api: JSON city list and prediction endpoints
//! - health: liveness and readiness probes
//! - metrics_handler: Prometheus exposition

pub mod api;
pub mod form;
pub mod health;
pub mod metrics_handler;

use std::sync::Arc;

use crate::{banner::Banner, config::Config, estimator::PriceEstimator};

/// Application state shared by all handlers; immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub estimator: Arc<PriceEstimator>,
    pub banner: Option<Arc<Banner>>,
}
