use std::{fmt, time::Instant};
use tracing::{debug, warn};

use crate::{
    city::City,
    error::PredictionError,
    input::Area,
    metrics,
    model::{ModelState, PriceModel},
};

/// Result of a single price estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub area: Area,
    pub city: City,
    pub base_price: f64,
    pub factor: f64,
    pub price: f64,
}

impl Estimate {
    /// Price formatted as rupees with two decimals
    pub fn formatted_price(&self) -> String {
        format_inr(self.price)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Predicted Price: {} for {} sqft in {}",
            self.formatted_price(),
            self.area,
            self.city
        )
    }
}

pub fn format_inr(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// Applies the regression model and the city multiplier
///
/// Holds no mutable state, so repeated calls with the same inputs return
/// the same estimate.
#[derive(Debug, Clone)]
pub struct PriceEstimator {
    model: ModelState,
}

impl PriceEstimator {
    pub fn new(model: ModelState) -> Self {
        Self { model }
    }

    pub fn with_model(model: impl PriceModel + 'static) -> Self {
        Self::new(ModelState::loaded(model))
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    pub fn estimate(&self, area: Area, city: City) -> Result<Estimate, PredictionError> {
        let start = Instant::now();
        let result = self.compute(area, city);
        metrics::record_duration(city, start.elapsed());

        match &result {
            Ok(estimate) => {
                debug!(
                    area = %area,
                    city = %city,
                    base_price = estimate.base_price,
                    price = estimate.price,
                    "Estimated price"
                );
                metrics::record_prediction(city, "success");
            }
            Err(err) => {
                warn!(area = %area, city = %city, error = %err, "Price estimate failed");
                metrics::record_prediction(city, "error");
                metrics::record_error(prediction_error_kind(err));
            }
        }

        result
    }

    fn compute(&self, area: Area, city: City) -> Result<Estimate, PredictionError> {
        let model = self.model.model()?;
        let base_price = model.predict(area.sqft())?;
        let factor = city.factor();
        let price = base_price * factor;

        if !price.is_finite() {
            return Err(PredictionError::NonFiniteOutput { area: area.sqft() });
        }

        Ok(Estimate {
            area,
            city,
            base_price,
            factor,
            price,
        })
    }
}

fn prediction_error_kind(err: &PredictionError) -> &'static str {
    match err {
        PredictionError::ModelUnavailable(_) => "model_unavailable",
        PredictionError::NonFiniteOutput { .. } => "non_finite_output",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelLoadError;
    use std::path::PathBuf;

    struct ConstantModel(f64);

    impl PriceModel for ConstantModel {
        fn predict(&self, _area: f64) -> Result<f64, PredictionError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_chennai_keeps_base_price() {
        let estimator = PriceEstimator::with_model(ConstantModel(100.0));
        let estimate = estimator.estimate(Area::default(), City::Chennai).unwrap();
        assert_eq!(estimate.price, 100.0);
        assert_eq!(estimate.formatted_price(), "₹100.00");
    }

    #[test]
    fn test_mumbai_applies_factor() {
        let estimator = PriceEstimator::with_model(ConstantModel(100.0));
        let estimate = estimator.estimate(Area::default(), City::Mumbai).unwrap();
        assert_eq!(estimate.price, 150.0);
        assert_eq!(estimate.formatted_price(), "₹150.00");
    }

    #[test]
    fn test_unloaded_model_reports_error() {
        let estimator = PriceEstimator::new(ModelState::unloaded(ModelLoadError::Invalid {
            path: PathBuf::from("area_price_model.json"),
            reason: "corrupt".to_string(),
        }));
        let err = estimator.estimate(Area::default(), City::Delhi).unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable(_)));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_failed_estimate_is_timed() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let estimator = PriceEstimator::new(ModelState::unloaded(ModelLoadError::Invalid {
            path: PathBuf::from("area_price_model.json"),
            reason: "corrupt".to_string(),
        }));

        let result = ::metrics::with_local_recorder(&recorder, || {
            estimator.estimate(Area::default(), City::Delhi)
        });

        assert!(result.is_err());
        let rendered = handle.render();
        assert!(rendered.contains("price_prediction_duration_seconds_count{city=\"Delhi\"} 1"));
        assert!(rendered.contains("price_predictions_total{city=\"Delhi\",outcome=\"error\"} 1"));
    }

    #[test]
    fn test_display_message() {
        let estimator = PriceEstimator::with_model(ConstantModel(2_000_000.0));
        let area = Area::new(1_250.0).unwrap();
        let estimate = estimator.estimate(area, City::Pune).unwrap();
        assert_eq!(
            estimate.to_string(),
            "Predicted Price: ₹1700000.00 for 1250 sqft in Pune"
        );
    }
}
