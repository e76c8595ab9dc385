//! Pre-trained regression artifact
//!
//! The artifact is a flat JSON file with the coefficients of a
//! single-feature linear regression. It is read once at startup and never
//! written back.

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info, warn};

use crate::error::{ModelLoadError, PredictionError};

pub const LINEAR_REGRESSION: &str = "linear_regression";

/// Anything that can turn an area into a base price
pub trait PriceModel: Send + Sync {
    fn predict(&self, area: f64) -> Result<f64, PredictionError>;

    fn describe(&self) -> String {
        "custom model".to_string()
    }
}

/// On-disk representation of the regression artifact
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub model_type: String,
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// `base = intercept + coefficient * area`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    pub coefficient: f64,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn new(coefficient: f64, intercept: f64) -> Self {
        Self {
            coefficient,
            intercept,
        }
    }

    /// Read and validate an artifact file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading model artifact");

        let raw = fs::read(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: ModelArtifact =
            serde_json::from_slice(&raw).map_err(|source| ModelLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_artifact(path, artifact)
    }

    pub fn from_artifact(path: &Path, artifact: ModelArtifact) -> Result<Self, ModelLoadError> {
        let invalid = |reason: String| ModelLoadError::Invalid {
            path: path.to_path_buf(),
            reason,
        };

        if artifact.model_type != LINEAR_REGRESSION {
            return Err(invalid(format!(
                "unsupported model_type '{}' (expected '{}')",
                artifact.model_type, LINEAR_REGRESSION
            )));
        }

        let coefficient = match artifact.coefficients.as_slice() {
            [single] => *single,
            other => {
                return Err(invalid(format!(
                    "expected exactly 1 coefficient, found {}",
                    other.len()
                )))
            }
        };

        if !artifact.feature_names.is_empty()
            && artifact.feature_names.len() != artifact.coefficients.len()
        {
            return Err(invalid(format!(
                "{} feature names for {} coefficients",
                artifact.feature_names.len(),
                artifact.coefficients.len()
            )));
        }

        if !coefficient.is_finite() || !artifact.intercept.is_finite() {
            return Err(invalid("coefficients must be finite".to_string()));
        }

        Ok(Self::new(coefficient, artifact.intercept))
    }
}

impl PriceModel for LinearRegression {
    fn predict(&self, area: f64) -> Result<f64, PredictionError> {
        let base = self.intercept + self.coefficient * area;
        if !base.is_finite() {
            return Err(PredictionError::NonFiniteOutput { area });
        }
        Ok(base)
    }

    fn describe(&self) -> String {
        format!(
            "linear regression (coefficient {}, intercept {})",
            self.coefficient, self.intercept
        )
    }
}

/// The model dependency handed to the estimator
///
/// A failed load is kept rather than discarded so every later prediction
/// can report why the model is missing.
#[derive(Clone)]
pub enum ModelState {
    Loaded(Arc<dyn PriceModel>),
    Unloaded(Arc<ModelLoadError>),
}

impl ModelState {
    pub fn loaded(model: impl PriceModel + 'static) -> Self {
        Self::Loaded(Arc::new(model))
    }

    pub fn unloaded(err: ModelLoadError) -> Self {
        Self::Unloaded(Arc::new(err))
    }

    /// Load the artifact at `path`, capturing a failure instead of propagating it
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match LinearRegression::load(&path) {
            Ok(model) => {
                info!(path = %path.display(), model = %model.describe(), "Model loaded");
                Self::loaded(model)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Model loading failed");
                Self::unloaded(err)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn load_error(&self) -> Option<&ModelLoadError> {
        match self {
            Self::Loaded(_) => None,
            Self::Unloaded(err) => Some(err.as_ref()),
        }
    }

    pub fn model(&self) -> Result<&dyn PriceModel, PredictionError> {
        match self {
            Self::Loaded(model) => Ok(model.as_ref()),
            Self::Unloaded(err) => Err(PredictionError::ModelUnavailable(err.clone())),
        }
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(model) => f.debug_tuple("Loaded").field(&model.describe()).finish(),
            Self::Unloaded(err) => f.debug_tuple("Unloaded").field(err).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(coefficients: Vec<f64>, intercept: f64) -> ModelArtifact {
        ModelArtifact {
            model_type: LINEAR_REGRESSION.to_string(),
            feature_names: vec![],
            coefficients,
            intercept,
        }
    }

    #[test]
    fn test_linear_prediction() {
        let model = LinearRegression::new(4_500.0, 125_000.0);
        assert_eq!(model.predict(1_000.0).unwrap(), 4_625_000.0);
    }

    #[test]
    fn test_artifact_requires_single_coefficient() {
        let err = LinearRegression::from_artifact(Path::new("m.json"), artifact(vec![1.0, 2.0], 0.0))
            .unwrap_err();
        assert!(err.to_string().contains("expected exactly 1 coefficient, found 2"));

        let err =
            LinearRegression::from_artifact(Path::new("m.json"), artifact(vec![], 0.0)).unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid { .. }));
    }

    #[test]
    fn test_artifact_rejects_unknown_model_type() {
        let mut a = artifact(vec![1.0], 0.0);
        a.model_type = "random_forest".to_string();
        let err = LinearRegression::from_artifact(Path::new("m.json"), a).unwrap_err();
        assert!(err.to_string().contains("unsupported model_type 'random_forest'"));
    }

    #[test]
    fn test_artifact_feature_names_must_match() {
        let mut a = artifact(vec![1.0], 0.0);
        a.feature_names = vec!["area".to_string(), "rooms".to_string()];
        assert!(LinearRegression::from_artifact(Path::new("m.json"), a).is_err());
    }

    #[test]
    fn test_non_finite_prediction_is_an_error() {
        let model = LinearRegression::new(f64::MAX, f64::MAX);
        assert!(matches!(
            model.predict(10_000.0),
            Err(PredictionError::NonFiniteOutput { .. })
        ));
    }

    #[test]
    fn test_missing_file_yields_unloaded_state() {
        let state = ModelState::load_from("/definitely/not/here/area_price_model.json");
        assert!(!state.is_loaded());
        assert!(matches!(state.load_error(), Some(ModelLoadError::Io { .. })));
        assert!(matches!(
            state.model(),
            Err(PredictionError::ModelUnavailable(_))
        ));
    }
}
