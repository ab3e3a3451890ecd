//! Common numeric helpers shared by the estimator and the unit converters.
//!
//! This module holds the rounding policy applied to every displayed weight
//! and the step quantization used by the weight slider.

/// Rounds to the nearest whole number, with halves rounded away from zero.
///
/// Estimates and converted weights are always positive, so this is the same
/// as rounding halves up.
///
/// # Examples
///
/// ```
/// use e1rm_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(262.49), 262.0);
/// assert_eq!(round_half_up(262.5), 263.0);
/// assert_eq!(round_half_up(-2.5), -3.0); // Away from zero
/// ```
pub fn round_half_up(value: f64) -> f64 {
    value.round()
}

/// Snaps `value` up to the next multiple of `step` (`step * ceil(value / step)`).
///
/// Values already on a multiple are returned unchanged.
///
/// # Examples
///
/// ```
/// use e1rm_core::calculations::common::snap_up_to_step;
///
/// assert_eq!(snap_up_to_step(101.0, 2.5), 102.5);
/// assert_eq!(snap_up_to_step(100.0, 2.5), 100.0);
/// assert_eq!(snap_up_to_step(101.0, 5.0), 105.0);
/// ```
pub fn snap_up_to_step(
    value: f64,
    step: f64,
) -> f64 {
    step * (value / step).ceil()
}
