pub mod calculations;
pub mod models;
pub mod state;

pub use calculations::{EstimateError, estimate, estimate_all};
pub use models::*;
pub use state::{CalculatorState, StateError};
