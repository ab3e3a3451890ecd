//! Estimated one-rep max (E1RM) from a multi-rep set.
//!
//! Each [`Formula`] is a published regression equation. Given `r` reps at
//! weight `w`:
//!
//! | Formula | Estimate (before rounding) |
//! |---------|----------------------------|
//! | Epley | `w × (1 + r/30)` |
//! | McGlothin | `100w / (101.3 − 2.67123r)` |
//! | Lombardi | `w × r^0.1` |
//! | Mayhew | `100w / (52.2 + 41.9e^(−0.055r))` |
//! | OConner | `w × (1 + r/40)` |
//! | Wathen | `100w / (48.8 + 53.8e^(−0.075r))` |
//! | Brzycki | `w / (1.0278 − 0.0278r)` |
//!
//! Results are rounded to a whole number with [`round_half_up`]. A single
//! (`r == 1`) is already a measured max and is returned as given.
//!
//! # Example
//!
//! ```
//! use e1rm_core::{Formula, estimate};
//!
//! assert_eq!(estimate(5, 225.0, Formula::Brzycki).unwrap(), 253.0);
//! assert_eq!(estimate(5, 225.0, Formula::Epley).unwrap(), 263.0);
//! assert_eq!(estimate(1, 227.5, Formula::Epley).unwrap(), 227.5);
//! ```

use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::{Formula, FormulaEstimate};

/// Errors that can occur while estimating a one-rep max.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum EstimateError {
    /// Reps must be at least 1.
    #[error("reps must be at least 1, got {0}")]
    InvalidReps(u32),

    /// Weight must be positive and finite.
    #[error("weight must be a positive finite number, got {0}")]
    InvalidWeight(f64),

    /// The formula has no meaningful value at this rep count (its
    /// denominator is zero or negative).
    #[error("{formula} formula is undefined at {reps} reps")]
    DegenerateFormula { formula: Formula, reps: u32 },
}

/// Estimates the one-rep max for `reps` repetitions at `weight`.
///
/// The result is in the same unit as `weight`.
///
/// # Errors
///
/// Returns [`EstimateError`] if:
/// - `reps` is zero
/// - `weight` is zero, negative, or not finite
/// - the formula's denominator is not positive at this rep count
///   (Brzycki from 37 reps, McGlothin from 38 reps)
pub fn estimate(
    reps: u32,
    weight: f64,
    formula: Formula,
) -> Result<f64, EstimateError> {
    validate(reps, weight)?;

    if reps == 1 {
        return Ok(weight);
    }

    let projected = project(reps, weight, formula)?;
    let rounded = round_half_up(projected);

    debug!(reps, weight, %formula, projected, rounded, "estimated one-rep max");
    Ok(rounded)
}

/// Estimates the one-rep max with every formula, in [`Formula::ALL`] order.
///
/// # Errors
///
/// Fails with the first [`EstimateError`] any formula reports.
pub fn estimate_all(
    reps: u32,
    weight: f64,
) -> Result<Vec<FormulaEstimate>, EstimateError> {
    Formula::ALL
        .into_iter()
        .map(|formula| {
            estimate(reps, weight, formula).map(|estimate| FormulaEstimate { formula, estimate })
        })
        .collect()
}

fn validate(
    reps: u32,
    weight: f64,
) -> Result<(), EstimateError> {
    if reps < 1 {
        return Err(EstimateError::InvalidReps(reps));
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(EstimateError::InvalidWeight(weight));
    }
    Ok(())
}

/// Unrounded estimate for `reps >= 2`.
fn project(
    reps: u32,
    weight: f64,
    formula: Formula,
) -> Result<f64, EstimateError> {
    let r = f64::from(reps);
    let degenerate = EstimateError::DegenerateFormula { formula, reps };

    let ratio = |numerator: f64, denominator: f64| {
        if denominator > 0.0 {
            Ok(numerator / denominator)
        } else {
            Err(degenerate)
        }
    };

    let projected = match formula {
        Formula::Epley => weight * (1.0 + r / 30.0),
        Formula::McGlothin => ratio(100.0 * weight, 101.3 - 2.67123 * r)?,
        Formula::Lombardi => weight * r.powf(0.1),
        Formula::Mayhew => ratio(100.0 * weight, 52.2 + 41.9 * (-0.055 * r).exp())?,
        Formula::OConner => weight * (1.0 + r / 40.0),
        Formula::Wathen => ratio(100.0 * weight, 48.8 + 53.8 * (-0.075 * r).exp())?,
        Formula::Brzycki => ratio(weight, 1.0278 - 0.0278 * r)?,
    };

    if projected.is_finite() && projected >= 0.0 {
        Ok(projected)
    } else {
        Err(degenerate)
    }
}
