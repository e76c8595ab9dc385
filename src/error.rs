use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::{fmt, path::PathBuf, sync::Arc};
use thiserror::Error;

/// Failure to bring the regression artifact into memory
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("cannot read model artifact {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse model artifact {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact {}: {}", .path.display(), .reason)]
    Invalid { path: PathBuf, reason: String },
}

/// Failure while turning an area into a price
#[derive(Debug, Clone, Error)]
pub enum PredictionError {
    /// The artifact never loaded; carries the load failure
    #[error("model is not loaded ({0})")]
    ModelUnavailable(Arc<ModelLoadError>),

    #[error("model produced a non-finite price for {area} sqft")]
    NonFiniteOutput { area: f64 },
}

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("no area was provided")]
    Missing,

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max} sqft, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// Request body could not be decoded into the expected fields
    #[error("malformed request: {0}")]
    InvalidBody(String),
}

/// Failure fetching the decorative banner image
#[derive(Debug, Error)]
pub enum BannerError {
    #[error("only HTTP(S) URLs are supported for the banner, got '{0}'")]
    UnsupportedScheme(String),

    #[error("banner request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("banner fetch failed with status: {0}")]
    Status(reqwest::StatusCode),

    #[error("banner URL does not point to a supported image (content-type: {0})")]
    NotAnImage(String),

    #[error("banner image too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Bad area or city
    Input(InputError),
    /// Estimator failure
    Prediction(PredictionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(err) => write!(f, "Invalid input: {}", err),
            Self::Prediction(err) => write!(f, "Prediction failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Input(_) => StatusCode::BAD_REQUEST,
            Self::Prediction(PredictionError::ModelUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Prediction(PredictionError::NonFiniteOutput { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            Self::Input(err) => err.to_string(),
            Self::Prediction(err) => err.to_string(),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

pub fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Input(InputError::UnknownCity(_)) => "unknown_city",
        AppError::Input(_) => "invalid_input",
        AppError::Prediction(PredictionError::ModelUnavailable(_)) => "model_unavailable",
        AppError::Prediction(PredictionError::NonFiniteOutput { .. }) => "prediction_failed",
    }
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        Self::Prediction(err)
    }
}
