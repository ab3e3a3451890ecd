//! CSV loader for batches of lifts.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter.
//! Whitespace around values is trimmed.
//!
//! | Column | Required | Type | Notes |
//! |-----------|----------|---------|------------------------------------------------|
//! | `reps` | yes | integer | e.g. `5` |
//! | `weight` | yes | decimal | e.g. `102.5` |
//! | `unit` | no | string | `kg` or `lb`; empty uses the batch default |
//! | `formula` | no | string | Formula name; unknown names fall back to Brzycki |
//!
//! ### Example
//!
//! ```csv
//! reps,weight,unit,formula
//! 5,225,lb,Epley
//! 3,102.5,kg,
//! ```
use std::path::Path;

use e1rm_core::{Formula, Lift, WeightUnit};
use serde::Deserialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    reps: u32,
    weight: f64,
    unit: Option<String>,
    formula: Option<String>,
}

/// One parsed CSV row. `unit` and `formula` are `None` when the cell was
/// empty or the column was absent.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftRecord {
    /// 1-based row number, header excluded.
    pub row: usize,
    pub lift: Lift,
    pub unit: Option<WeightUnit>,
    pub formula: Option<Formula>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `unit` cell was neither `kg` nor `lb`.
    #[error("unrecognised unit '{unit}' on row {row}")]
    InvalidUnit { unit: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|value| !value.trim().is_empty())
}

/// Convert a single CSV row into a LiftRecord.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LiftRecord, CsvLoadError> {
    let unit = non_empty(row.unit)
        .map(|unit| {
            WeightUnit::parse(&unit).ok_or(CsvLoadError::InvalidUnit {
                unit,
                row: row_number,
            })
        })
        .transpose()?;

    let formula = non_empty(row.formula).map(|name| Formula::parse_or_default(&name));

    Ok(LiftRecord {
        row: row_number,
        lift: Lift::new(row.reps, row.weight),
        unit,
        formula,
    })
}

/// Parse CSV text and return the lifts in file order.
///
/// Reps and weight are not range-checked here; the estimator rejects
/// invalid values per row.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::InvalidUnit] – if any row names an unknown unit.
pub fn load_from_str(input: &str) -> Result<Vec<LiftRecord>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let records = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = records.len(), "parsed lift records");
    Ok(records)
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<LiftRecord>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
