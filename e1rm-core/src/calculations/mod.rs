//! One-rep-max estimation and the unit conversions that surround it.
//!
//! Everything here is a pure function of its arguments: no shared state,
//! no I/O, safe to call from any thread.

pub mod common;
pub mod estimate;
pub mod units;

pub use estimate::{EstimateError, estimate, estimate_all};
pub use units::{LB_PER_KG, convert, kg_to_lb, lb_to_kg, quantize_weight};
