//! Plain-text rendering of estimates.

use e1rm_core::calculations::convert;
use e1rm_core::{EstimateError, Formula, FormulaEstimate, Lift, WeightUnit};

use crate::csv_loader::LiftRecord;

/// Outcome of estimating one CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub row: usize,
    pub lift: Lift,
    pub unit: WeightUnit,
    pub formula: Formula,
    pub outcome: Result<f64, EstimateError>,
}

/// Estimates every record, filling empty `unit`/`formula` cells with the
/// batch defaults. A failing row does not stop the batch.
pub fn estimate_batch(
    records: &[LiftRecord],
    default_formula: Formula,
    default_unit: WeightUnit,
) -> Vec<BatchRow> {
    records
        .iter()
        .map(|record| {
            let formula = record.formula.unwrap_or(default_formula);
            BatchRow {
                row: record.row,
                lift: record.lift,
                unit: record.unit.unwrap_or(default_unit),
                formula,
                outcome: record.lift.estimate(formula),
            }
        })
        .collect()
}

/// Formats a weight without a trailing `.0` for whole numbers.
pub fn format_weight(weight: f64) -> String {
    weight.to_string()
}

/// One-line summary, e.g. `5 x 225lb -> 253lb (Brzycki)`.
pub fn render_estimate(
    lift: &Lift,
    unit: WeightUnit,
    formula: Formula,
    estimate: f64,
) -> String {
    format!(
        "{} x {}{unit} -> {}{unit} ({formula})",
        lift.reps,
        format_weight(lift.weight),
        format_weight(estimate),
    )
}

/// Converts `weight` into `to` from the other unit, e.g. `225lb = 102kg`.
///
/// # Errors
///
/// [`EstimateError::InvalidWeight`] when `weight` is zero, negative or not
/// finite.
pub fn render_conversion(
    weight: f64,
    to: WeightUnit,
) -> Result<String, EstimateError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(EstimateError::InvalidWeight(weight));
    }

    let from = match to {
        WeightUnit::Kilograms => WeightUnit::Pounds,
        WeightUnit::Pounds => WeightUnit::Kilograms,
    };
    let converted = convert(weight, from, to);

    Ok(format!(
        "{}{from} = {}{to}",
        format_weight(weight),
        format_weight(converted)
    ))
}

/// Side-by-side table of every formula's estimate.
pub fn render_comparison(
    lift: &Lift,
    unit: WeightUnit,
    rows: &[FormulaEstimate],
) -> String {
    let mut out = format!("{} x {}{unit}\n", lift.reps, format_weight(lift.weight));
    for row in rows {
        out.push_str(&format!(
            "  {:<10} {:>8}{unit}\n",
            row.formula.as_str(),
            format_weight(row.estimate)
        ));
    }
    out
}

/// Renders batch results, one line per row; failed rows show the error.
pub fn render_batch(rows: &[BatchRow]) -> String {
    rows.iter()
        .map(|row| match &row.outcome {
            Ok(estimate) => format!(
                "row {}: {}\n",
                row.row,
                render_estimate(&row.lift, row.unit, row.formula, *estimate)
            ),
            Err(error) => format!("row {}: error: {error}\n", row.row),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(
        row: usize,
        reps: u32,
        weight: f64,
    ) -> LiftRecord {
        LiftRecord {
            row,
            lift: Lift::new(reps, weight),
            unit: None,
            formula: None,
        }
    }

    #[test]
    fn format_weight_drops_trailing_zero() {
        assert_eq!(format_weight(253.0), "253");
        assert_eq!(format_weight(102.5), "102.5");
    }

    #[test]
    fn render_estimate_single_line() {
        let line = render_estimate(
            &Lift::new(5, 225.0),
            WeightUnit::Pounds,
            Formula::Brzycki,
            253.0,
        );

        assert_eq!(line, "5 x 225lb -> 253lb (Brzycki)");
    }

    #[test]
    fn render_conversion_goes_to_the_other_unit() {
        assert_eq!(
            render_conversion(225.0, WeightUnit::Kilograms),
            Ok("225lb = 102kg".to_string())
        );
        assert_eq!(
            render_conversion(100.0, WeightUnit::Pounds),
            Ok("100kg = 220lb".to_string())
        );
    }

    #[test]
    fn render_conversion_rejects_non_positive_weight() {
        for weight in [0.0, -5.0, f64::INFINITY] {
            assert_eq!(
                render_conversion(weight, WeightUnit::Kilograms),
                Err(EstimateError::InvalidWeight(weight)),
                "weight={weight}"
            );
        }
        assert!(render_conversion(f64::NAN, WeightUnit::Pounds).is_err());
    }

    #[test]
    fn render_batch_of_nothing_is_empty() {
        assert_eq!(render_batch(&[]), "");
    }

    #[test]
    fn render_comparison_lists_every_formula() {
        let lift = Lift::new(5, 225.0);
        let rows = e1rm_core::estimate_all(lift.reps, lift.weight).unwrap();

        let table = render_comparison(&lift, WeightUnit::Pounds, &rows);

        assert_eq!(
            table,
            "5 x 225lb\n\
             \x20 Epley           263lb\n\
             \x20 McGlothin       256lb\n\
             \x20 Lombardi        264lb\n\
             \x20 Mayhew          268lb\n\
             \x20 OConner         253lb\n\
             \x20 Wathen          262lb\n\
             \x20 Brzycki         253lb\n"
        );
    }

    #[test]
    fn estimate_batch_applies_defaults_and_overrides() {
        let mut records = vec![record(1, 5, 225.0), record(2, 3, 100.0)];
        records[1].unit = Some(WeightUnit::Kilograms);
        records[1].formula = Some(Formula::Epley);

        let rows = estimate_batch(&records, Formula::Brzycki, WeightUnit::Pounds);

        assert_eq!(rows[0].formula, Formula::Brzycki);
        assert_eq!(rows[0].unit, WeightUnit::Pounds);
        assert_eq!(rows[0].outcome, Ok(253.0));
        assert_eq!(rows[1].formula, Formula::Epley);
        assert_eq!(rows[1].unit, WeightUnit::Kilograms);
        assert_eq!(rows[1].outcome, Ok(110.0));
    }

    #[test]
    fn estimate_batch_keeps_going_after_failure() {
        let records = vec![record(1, 0, 225.0), record(2, 1, 140.0)];

        let rows = estimate_batch(&records, Formula::Brzycki, WeightUnit::Pounds);

        assert_eq!(rows[0].outcome, Err(EstimateError::InvalidReps(0)));
        assert_eq!(rows[1].outcome, Ok(140.0));
    }

    #[test]
    fn render_batch_shows_errors_inline() {
        let records = vec![record(1, 5, 225.0), record(2, 40, 100.0)];
        let rows = estimate_batch(&records, Formula::Brzycki, WeightUnit::Pounds);

        assert_eq!(
            render_batch(&rows),
            "row 1: 5 x 225lb -> 253lb (Brzycki)\n\
             row 2: error: Brzycki formula is undefined at 40 reps\n"
        );
    }
}
