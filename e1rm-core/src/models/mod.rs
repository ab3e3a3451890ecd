mod formula;
mod lift;
mod weight_unit;

pub use formula::{Formula, ParseFormulaError};
pub use lift::{FormulaEstimate, Lift};
pub use weight_unit::{ParseWeightUnitError, WeightUnit};
