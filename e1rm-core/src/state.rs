//! Calculator state and its plain-string encoding.
//!
//! The state is what a front end needs to restore a calculation: reps,
//! weight and the unit. It is encoded as `reps=<int>&weight=<real>&isMetric=<bool>`
//! so it can live in a query string or any string key/value store.
//! Hydration is explicit: callers pass the stored pairs to
//! [`CalculatorState::from_params`] instead of the state reading any store itself.

use std::ops::RangeInclusive;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::{EstimateError, convert, estimate, quantize_weight};
use crate::{Formula, Lift, WeightUnit};

pub const DEFAULT_REPS: u32 = 5;
pub const DEFAULT_WEIGHT: f64 = 225.0;

/// Range of the reps slider.
pub const REPS_RANGE: RangeInclusive<u32> = 1..=20;

pub const REPS_KEY: &str = "reps";
pub const WEIGHT_KEY: &str = "weight";
pub const IS_METRIC_KEY: &str = "isMetric";

/// Errors raised while decoding stored state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("reps must be a whole number of at least 1, got '{0}'")]
    InvalidReps(String),

    #[error("weight must be a positive number, got '{0}'")]
    InvalidWeight(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub reps: u32,
    pub weight: f64,
    pub unit: WeightUnit,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            reps: DEFAULT_REPS,
            weight: DEFAULT_WEIGHT,
            unit: WeightUnit::Pounds,
        }
    }
}

impl CalculatorState {
    pub fn new(
        reps: u32,
        weight: f64,
        unit: WeightUnit,
    ) -> Self {
        Self { reps, weight, unit }
    }

    /// Builds state from stored key/value pairs.
    ///
    /// Missing or empty values keep their defaults. `isMetric` counts only
    /// when it is exactly `"true"`. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] when `reps` is not a positive integer or
    /// `weight` is not a positive finite number.
    pub fn from_params<'a, I>(params: I) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut state = Self::default();

        for (key, value) in params {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key {
                REPS_KEY => state.reps = parse_reps(value)?,
                WEIGHT_KEY => state.weight = parse_weight(value)?,
                IS_METRIC_KEY => state.unit = WeightUnit::from_is_metric(value == "true"),
                _ => debug!(key, "ignoring unknown state key"),
            }
        }

        Ok(state)
    }

    /// Parses `reps=5&weight=225&isMetric=false`. A leading `?` is allowed.
    /// Keys and values are percent-decoded, so `weight=102%2E5` reads as
    /// `102.5`.
    ///
    /// ```
    /// use e1rm_core::{CalculatorState, WeightUnit};
    ///
    /// let state = CalculatorState::from_query_string("?reps=3&weight=102.5&isMetric=true").unwrap();
    ///
    /// assert_eq!(state.reps, 3);
    /// assert_eq!(state.weight, 102.5);
    /// assert_eq!(state.unit, WeightUnit::Kilograms);
    /// assert_eq!(state.to_query_string(), "reps=3&weight=102.5&isMetric=true");
    /// ```
    pub fn from_query_string(query: &str) -> Result<Self, StateError> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs: Vec<_> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (
                    percent_decode_str(key).decode_utf8_lossy(),
                    percent_decode_str(value).decode_utf8_lossy(),
                )
            })
            .collect();

        Self::from_params(
            pairs
                .iter()
                .map(|(key, value)| (key.as_ref(), value.as_ref())),
        )
    }

    /// Encodes the state as key/value pairs, in a fixed order.
    pub fn to_params(&self) -> [(&'static str, String); 3] {
        [
            (REPS_KEY, self.reps.to_string()),
            (WEIGHT_KEY, self.weight.to_string()),
            (IS_METRIC_KEY, self.unit.is_metric().to_string()),
        ]
    }

    pub fn to_query_string(&self) -> String {
        self.to_params()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn lift(&self) -> Lift {
        Lift::new(self.reps, self.weight)
    }

    /// Sets reps from the slider, clamped to [`REPS_RANGE`].
    pub fn set_reps_from_slider(
        &mut self,
        reps: u32,
    ) {
        self.reps = reps.clamp(*REPS_RANGE.start(), *REPS_RANGE.end());
    }

    /// Sets weight from the slider, snapped up to the unit's increment and
    /// kept within `slider_step()..=slider_max()` so the state always
    /// encodes to a decodable query string. NaN lands on the lower bound.
    pub fn set_weight_from_slider(
        &mut self,
        value: f64,
    ) {
        self.weight = quantize_weight(value, self.unit)
            .max(self.unit.slider_step())
            .min(self.unit.slider_max());
    }

    /// Switches units, converting the current weight when the unit changes.
    pub fn set_unit(
        &mut self,
        unit: WeightUnit,
    ) {
        if unit == self.unit {
            return;
        }
        self.weight = convert(self.weight, self.unit, unit);
        self.unit = unit;
    }

    /// Estimated one-rep max in the state's unit.
    pub fn estimate(
        &self,
        formula: Formula,
    ) -> Result<f64, EstimateError> {
        estimate(self.reps, self.weight, formula)
    }
}

fn parse_reps(value: &str) -> Result<u32, StateError> {
    match value.parse::<u32>() {
        Ok(reps) if reps >= 1 => Ok(reps),
        _ => {
            warn!(input = %value, "rejecting stored reps");
            Err(StateError::InvalidReps(value.to_string()))
        }
    }
}

fn parse_weight(value: &str) -> Result<f64, StateError> {
    match value.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight > 0.0 => Ok(weight),
        _ => {
            warn!(input = %value, "rejecting stored weight");
            Err(StateError::InvalidWeight(value.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // decoding
    // =========================================================================

    #[test]
    fn empty_query_uses_defaults() {
        let state = CalculatorState::from_query_string("").unwrap();

        assert_eq!(state, CalculatorState::default());
        assert_eq!(state.reps, 5);
        assert_eq!(state.weight, 225.0);
        assert_eq!(state.unit, WeightUnit::Pounds);
    }

    #[test]
    fn from_params_reads_every_key() {
        let state = CalculatorState::from_params([
            ("reps", "8"),
            ("weight", "102.5"),
            ("isMetric", "true"),
        ])
        .unwrap();

        assert_eq!(state, CalculatorState::new(8, 102.5, WeightUnit::Kilograms));
    }

    #[test]
    fn empty_values_keep_defaults() {
        let state = CalculatorState::from_params([("reps", ""), ("weight", "  ")]).unwrap();

        assert_eq!(state, CalculatorState::default());
    }

    #[test]
    fn is_metric_requires_exact_true() {
        for value in ["TRUE", "1", "yes", "false"] {
            let state = CalculatorState::from_params([("isMetric", value)]).unwrap();

            assert_eq!(state.unit, WeightUnit::Pounds, "isMetric={value}");
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let state = CalculatorState::from_params([("formula", "Epley"), ("reps", "3")]).unwrap();

        assert_eq!(state.reps, 3);
    }

    #[test]
    fn zero_reps_is_rejected() {
        assert_eq!(
            CalculatorState::from_params([("reps", "0")]),
            Err(StateError::InvalidReps("0".to_string()))
        );
    }

    #[test]
    fn fractional_reps_is_rejected() {
        assert_eq!(
            CalculatorState::from_params([("reps", "5.5")]),
            Err(StateError::InvalidReps("5.5".to_string()))
        );
    }

    #[test]
    fn bad_weight_is_rejected() {
        for value in ["abc", "0", "-10", "inf", "NaN"] {
            assert_eq!(
                CalculatorState::from_params([("weight", value)]),
                Err(StateError::InvalidWeight(value.to_string())),
                "weight={value}"
            );
        }
    }

    #[test]
    fn query_string_with_leading_question_mark() {
        let state = CalculatorState::from_query_string("?reps=10&weight=135").unwrap();

        assert_eq!(state, CalculatorState::new(10, 135.0, WeightUnit::Pounds));
    }

    #[test]
    fn query_string_tolerates_stray_separators() {
        let state = CalculatorState::from_query_string("reps=2&&isMetric&").unwrap();

        assert_eq!(state, CalculatorState::new(2, 225.0, WeightUnit::Pounds));
    }

    #[test]
    fn query_string_is_percent_decoded() {
        let state =
            CalculatorState::from_query_string("reps=%33&weight=102%2E5&%69sMetric=%74rue").unwrap();

        assert_eq!(state, CalculatorState::new(3, 102.5, WeightUnit::Kilograms));
    }

    #[test]
    fn malformed_escape_is_rejected_as_bad_value() {
        assert_eq!(
            CalculatorState::from_query_string("weight=%FF"),
            Err(StateError::InvalidWeight("\u{FFFD}".to_string()))
        );
    }

    // =========================================================================
    // encoding
    // =========================================================================

    #[test]
    fn to_query_string_encodes_plain_values() {
        let state = CalculatorState::new(5, 225.0, WeightUnit::Pounds);

        assert_eq!(state.to_query_string(), "reps=5&weight=225&isMetric=false");
    }

    #[test]
    fn encoding_round_trips() {
        let state = CalculatorState::new(12, 62.5, WeightUnit::Kilograms);

        let decoded = CalculatorState::from_query_string(&state.to_query_string()).unwrap();

        assert_eq!(decoded, state);
    }

    // =========================================================================
    // updates
    // =========================================================================

    #[test]
    fn reps_slider_is_clamped() {
        let mut state = CalculatorState::default();

        state.set_reps_from_slider(0);
        assert_eq!(state.reps, 1);

        state.set_reps_from_slider(25);
        assert_eq!(state.reps, 20);
    }

    #[test]
    fn weight_slider_snaps_per_unit() {
        let mut state = CalculatorState::default();
        state.set_weight_from_slider(221.0);
        assert_eq!(state.weight, 225.0);

        state.set_unit(WeightUnit::Kilograms);
        state.set_weight_from_slider(101.0);
        assert_eq!(state.weight, 102.5);
    }

    #[test]
    fn weight_slider_is_clamped_to_unit_bounds() {
        let cases = [
            (WeightUnit::Pounds, 0.0, 5.0),
            (WeightUnit::Pounds, -3.0, 5.0),
            (WeightUnit::Pounds, 1000.0, 600.0),
            (WeightUnit::Pounds, f64::NAN, 5.0),
            (WeightUnit::Kilograms, 0.0, 2.5),
            (WeightUnit::Kilograms, -40.0, 2.5),
            (WeightUnit::Kilograms, 300.0, 250.0),
        ];

        for (unit, value, expected) in cases {
            let mut state = CalculatorState::new(5, 100.0, unit);

            state.set_weight_from_slider(value);

            assert_eq!(state.weight, expected, "{value}{unit}");
            assert!(state.estimate(Formula::Brzycki).is_ok(), "{value}{unit}");
        }
    }

    #[test]
    fn clamped_weight_round_trips_through_query_string() {
        for value in [0.0, -3.0, 1000.0] {
            let mut state = CalculatorState::default();
            state.set_weight_from_slider(value);

            let decoded = CalculatorState::from_query_string(&state.to_query_string());

            assert_eq!(decoded, Ok(state), "slider={value}");
        }
    }

    #[test]
    fn set_unit_converts_weight() {
        let mut state = CalculatorState::default();

        state.set_unit(WeightUnit::Kilograms);
        assert_eq!(state.weight, 102.0);
        assert_eq!(state.unit, WeightUnit::Kilograms);

        state.set_unit(WeightUnit::Pounds);
        assert_eq!(state.weight, 225.0);
    }

    #[test]
    fn set_unit_to_same_unit_is_noop() {
        let mut state = CalculatorState::new(5, 227.3, WeightUnit::Pounds);

        state.set_unit(WeightUnit::Pounds);

        assert_eq!(state.weight, 227.3);
    }

    #[test]
    fn estimate_uses_state_values() {
        let state = CalculatorState::default();

        assert_eq!(state.estimate(Formula::Brzycki), Ok(253.0));
        assert_eq!(state.lift(), Lift::new(5, 225.0));
    }
}
