use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    city::City,
    error::{AppError, InputError},
    estimator::Estimate,
    handlers::AppState,
    input::Area,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub object: String,
    pub data: Vec<CityObject>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CityObject {
    pub name: String,
    pub factor: f64,
    pub info: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub area: f64,
    pub city: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub area: f64,
    pub city: String,
    pub base_price: f64,
    pub factor: f64,
    pub price: f64,
    pub formatted_price: String,
}

impl From<Estimate> for PredictResponse {
    fn from(estimate: Estimate) -> Self {
        Self {
            area: estimate.area.sqft(),
            city: estimate.city.to_string(),
            base_price: estimate.base_price,
            factor: estimate.factor,
            price: estimate.price,
            formatted_price: estimate.formatted_price(),
        }
    }
}

/// Handle /api/v1/cities
pub async fn list_cities() -> Json<CitiesResponse> {
    Json(CitiesResponse {
        object: "list".to_string(),
        data: City::ALL
            .iter()
            .map(|city| CityObject {
                name: city.to_string(),
                factor: city.factor(),
                info: city.info().to_string(),
            })
            .collect(),
    })
}

/// Handle /api/v1/predict
///
/// The API takes an exact area, so out-of-range values are rejected
/// instead of clamped. Undecodable bodies are reported as input errors.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| InputError::InvalidBody(rejection.body_text()))?;
    let city: City = request.city.parse()?;
    let area = Area::new(request.area)?;

    tracing::info!(area = %area, city = %city, "Handling prediction request");

    let estimate = state.estimator.estimate(area, city)?;
    Ok(Json(estimate.into()))
}
