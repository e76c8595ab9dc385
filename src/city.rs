use crate::error::InputError;

/// Supported cities, in display order
///
/// Each city carries a fixed price multiplier applied on top of the
/// model's base price, plus a short market description shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Mumbai,
    Delhi,
    Bangalore,
    Hyderabad,
    Chennai,
    Kolkata,
    Ahmedabad,
    Pune,
}

impl City {
    /// All cities in the order they are presented
    pub const ALL: [City; 8] = [
        City::Mumbai,
        City::Delhi,
        City::Bangalore,
        City::Hyderabad,
        City::Chennai,
        City::Kolkata,
        City::Ahmedabad,
        City::Pune,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Mumbai => "Mumbai",
            City::Delhi => "Delhi",
            City::Bangalore => "Bangalore",
            City::Hyderabad => "Hyderabad",
            City::Chennai => "Chennai",
            City::Kolkata => "Kolkata",
            City::Ahmedabad => "Ahmedabad",
            City::Pune => "Pune",
        }
    }

    /// Location multiplier applied to the base price
    pub fn factor(&self) -> f64 {
        match self {
            City::Mumbai => 1.5,
            City::Delhi => 1.3,
            City::Bangalore => 1.2,
            City::Hyderabad => 1.1,
            City::Chennai => 1.0,
            City::Kolkata => 0.9,
            City::Ahmedabad => 0.8,
            City::Pune => 0.85,
        }
    }

    pub fn info(&self) -> &'static str {
        match self {
            City::Mumbai => "Financial hub with high property prices.",
            City::Delhi => "Capital city with high demand.",
            City::Bangalore => "IT hub with growing property value.",
            City::Hyderabad => "Emerging market with steady growth.",
            City::Chennai => "Steady property prices.",
            City::Kolkata => "Affordable property market.",
            City::Ahmedabad => "Developing market with lower costs.",
            City::Pune => "Affordable IT city with growth potential.",
        }
    }
}

impl Default for City {
    fn default() -> Self {
        City::ALL[0]
    }
}

impl std::str::FromStr for City {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        City::ALL
            .iter()
            .copied()
            .find(|city| city.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownCity(s.to_string()))
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
