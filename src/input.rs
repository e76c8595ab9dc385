//! Area input handling
//!
//! The form offers two ways to enter the area: a slider and a manual
//! number field. Slider values are widget positions and get clamped and
//! snapped onto the slider grid; manual values are taken as typed and
//! rejected when outside the bounds. Which of the two wins is an explicit
//! [`InputPrecedence`] policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;

pub const MIN_AREA: f64 = 500.0;
pub const MAX_AREA: f64 = 10_000.0;
pub const AREA_STEP: f64 = 50.0;
pub const DEFAULT_AREA: f64 = 1_000.0;

pub const SLIDER_FIELD: &str = "area_slider";
pub const MANUAL_FIELD: &str = "area_manual";

/// Property area in square feet, always within `[MIN_AREA, MAX_AREA]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Area(f64);

impl Area {
    /// Accept an exact value, rejecting anything outside the bounds
    pub fn new(value: f64) -> Result<Self, InputError> {
        Self::checked("area", value)
    }

    /// Interpret a value as a slider position: clamp to the bounds and snap to the step grid
    pub fn from_slider(value: f64) -> Result<Self, InputError> {
        if !value.is_finite() {
            return Err(InputError::NotANumber {
                field: SLIDER_FIELD,
                value: value.to_string(),
            });
        }

        let clamped = value.clamp(MIN_AREA, MAX_AREA);
        let snapped = MIN_AREA + ((clamped - MIN_AREA) / AREA_STEP).round() * AREA_STEP;
        Ok(Self(snapped.min(MAX_AREA)))
    }

    pub fn sqft(&self) -> f64 {
        self.0
    }

    fn checked(field: &'static str, value: f64) -> Result<Self, InputError> {
        if !value.is_finite() {
            return Err(InputError::NotANumber {
                field,
                value: value.to_string(),
            });
        }
        if !(MIN_AREA..=MAX_AREA).contains(&value) {
            return Err(InputError::OutOfRange {
                field,
                value,
                min: MIN_AREA,
                max: MAX_AREA,
            });
        }
        Ok(Self(value))
    }
}

impl Default for Area {
    fn default() -> Self {
        Self(DEFAULT_AREA)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which input wins when both the slider and the manual field carry a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPrecedence {
    /// Manual entry wins whenever it is supplied
    #[default]
    Manual,
    /// Slider wins whenever it is supplied
    Slider,
}

/// Raw area inputs as submitted by the form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AreaInputs {
    #[serde(default)]
    pub area_slider: Option<String>,
    #[serde(default)]
    pub area_manual: Option<String>,
}

impl AreaInputs {
    pub fn new(slider: Option<&str>, manual: Option<&str>) -> Self {
        Self {
            area_slider: slider.map(str::to_string),
            area_manual: manual.map(str::to_string),
        }
    }

    /// Pick the winning input under `precedence` and validate it
    ///
    /// Blank fields count as absent. A supplied but invalid winner is an
    /// error; there is no fallback to the other input in that case.
    pub fn resolve(&self, precedence: InputPrecedence) -> Result<Area, InputError> {
        let slider = non_blank(self.area_slider.as_deref());
        let manual = non_blank(self.area_manual.as_deref());

        match (precedence, slider, manual) {
            (_, None, None) => Err(InputError::Missing),
            (InputPrecedence::Manual, _, Some(text)) | (InputPrecedence::Slider, None, Some(text)) => {
                let value = parse_number(MANUAL_FIELD, text)?;
                Area::checked(MANUAL_FIELD, value)
            }
            (InputPrecedence::Slider, Some(text), _) | (InputPrecedence::Manual, Some(text), None) => {
                let value = parse_number(SLIDER_FIELD, text)?;
                Area::from_slider(value)
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, InputError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            field,
            value: text.to_string(),
        })
}
