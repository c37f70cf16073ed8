use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Area units offered by the area input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    #[default]
    #[serde(rename = "m²")]
    SquareMeter,
    #[serde(rename = "sqft")]
    SquareFoot,
    #[serde(rename = "acre")]
    Acre,
    #[serde(rename = "ha")]
    Hectare,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 4] = [
        AreaUnit::SquareMeter,
        AreaUnit::SquareFoot,
        AreaUnit::Acre,
        AreaUnit::Hectare,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareFoot => "sqft",
            AreaUnit::Acre => "acre",
            AreaUnit::Hectare => "ha",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "Square meters",
            AreaUnit::SquareFoot => "Square feet",
            AreaUnit::Acre => "Acres",
            AreaUnit::Hectare => "Hectares",
        }
    }

    /// How many of this unit make up one square meter.
    pub fn per_square_meter(self) -> f64 {
        match self {
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::SquareFoot => 10.764,
            AreaUnit::Acre => 0.000_247_105,
            AreaUnit::Hectare => 0.0001,
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown area unit '{0}'")]
pub struct UnknownAreaUnit(pub String);

impl FromStr for AreaUnit {
    type Err = UnknownAreaUnit;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m²" | "m2" | "sqm" => Ok(Self::SquareMeter),
            "sqft" | "ft²" | "ft2" => Ok(Self::SquareFoot),
            "acre" | "acres" | "ac" => Ok(Self::Acre),
            "ha" | "hectare" => Ok(Self::Hectare),
            _ => Err(UnknownAreaUnit(value.to_string())),
        }
    }
}

/// Converts through square meters. Identity conversions return `value` untouched.
pub fn convert(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    if from == to {
        return value;
    }
    let square_meters = value / from.per_square_meter();
    square_meters * to.per_square_meter()
}
