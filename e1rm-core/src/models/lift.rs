use serde::{Deserialize, Serialize};

use crate::Formula;
use crate::calculations::{EstimateError, estimate};

/// A performed set: `reps` repetitions at `weight`.
///
/// The unit is contextual; estimates come back in whatever unit `weight` was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lift {
    pub reps: u32,
    pub weight: f64,
}

impl Lift {
    pub fn new(
        reps: u32,
        weight: f64,
    ) -> Self {
        Self { reps, weight }
    }

    /// Estimated one-rep max for this set using `formula`.
    pub fn estimate(
        &self,
        formula: Formula,
    ) -> Result<f64, EstimateError> {
        estimate(self.reps, self.weight, formula)
    }
}

/// One row of a side-by-side formula comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormulaEstimate {
    pub formula: Formula,
    pub estimate: f64,
}
