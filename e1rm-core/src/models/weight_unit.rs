use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit a weight is expressed in. Weights themselves stay plain `f64`.
///
/// Serializes as `kg`/`lb`; deserializing goes through [`WeightUnit::parse`]
/// so config files accept the same names as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum WeightUnit {
    #[serde(rename = "kg")]
    Kilograms,
    #[default]
    #[serde(rename = "lb")]
    Pounds,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown weight unit '{0}' (expected 'kg' or 'lb')")]
pub struct ParseWeightUnitError(pub String);

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "kgs" | "kilo" | "kilos" | "kilograms" => Some(Self::Kilograms),
            "lb" | "lbs" | "pound" | "pounds" => Some(Self::Pounds),
            _ => None,
        }
    }

    pub fn from_is_metric(is_metric: bool) -> Self {
        if is_metric {
            Self::Kilograms
        } else {
            Self::Pounds
        }
    }

    pub fn is_metric(&self) -> bool {
        matches!(self, Self::Kilograms)
    }

    /// Increment the weight slider snaps to.
    pub fn slider_step(&self) -> f64 {
        match self {
            Self::Kilograms => 2.5,
            Self::Pounds => 5.0,
        }
    }

    /// Upper bound of the weight slider.
    pub fn slider_max(&self) -> f64 {
        match self {
            Self::Kilograms => 250.0,
            Self::Pounds => 600.0,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = ParseWeightUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseWeightUnitError(s.to_string()))
    }
}

impl TryFrom<String> for WeightUnit {
    type Error = ParseWeightUnitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
