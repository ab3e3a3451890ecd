//! Pound/kilogram conversion and weight quantization.
//!
//! Conversions round to whole numbers, so a round trip may drift by one unit:
//!
//! ```
//! use e1rm_core::calculations::{kg_to_lb, lb_to_kg};
//!
//! assert_eq!(lb_to_kg(225.0), 102.0);
//! assert_eq!(kg_to_lb(102.0), 225.0);
//! assert_eq!(kg_to_lb(lb_to_kg(100.0)), 99.0);
//! ```

use crate::WeightUnit;
use crate::calculations::common::{round_half_up, snap_up_to_step};

/// Pounds in one kilogram.
pub const LB_PER_KG: f64 = 2.2046;

/// Converts pounds to kilograms, rounded to a whole kilogram.
pub fn lb_to_kg(lb: f64) -> f64 {
    round_half_up(lb / LB_PER_KG)
}

/// Converts kilograms to pounds, rounded to a whole pound.
pub fn kg_to_lb(kg: f64) -> f64 {
    round_half_up(kg * LB_PER_KG)
}

/// Converts `weight` between units. Same-unit conversion returns `weight`
/// untouched (no rounding).
pub fn convert(
    weight: f64,
    from: WeightUnit,
    to: WeightUnit,
) -> f64 {
    match (from, to) {
        (WeightUnit::Pounds, WeightUnit::Kilograms) => lb_to_kg(weight),
        (WeightUnit::Kilograms, WeightUnit::Pounds) => kg_to_lb(weight),
        _ => weight,
    }
}

/// Snaps a slider value up to the unit's plate increment
/// (2.5 kg or 5 lb).
pub fn quantize_weight(
    value: f64,
    unit: WeightUnit,
) -> f64 {
    snap_up_to_step(value, unit.slider_step())
}
