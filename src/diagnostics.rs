use serde::Serialize;
use std::fmt;

use crate::summary::ValueColumn;
use crate::table::Column;

/// Non-fatal conditions reported alongside a result.
///
/// Computations never fail on data-shape irregularities; they shrink their
/// output and attach one of these so the caller can show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A column the computation needs was not present in the source table.
    InputShape { column: Column },
    /// Every candidate had the same value, so the column contributed nothing.
    DegenerateRange { column: Column },
    /// Weights do not add up to 1.0; scores are used as-is.
    WeightSum { sum: f64 },
    /// Records whose value could not be read as a number.
    Coercion { column: ValueColumn, count: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InputShape { column } => {
                write!(f, "column '{}' is missing from the program table", column)
            }
            Warning::DegenerateRange { column } => write!(
                f,
                "all candidates share the same {}; it does not affect the score",
                column
            ),
            Warning::WeightSum { sum } => write!(
                f,
                "weights add up to {:.2}, not 1.00; adjust them for a true weighted average",
                sum
            ),
            Warning::Coercion { column, count } => write!(
                f,
                "{} record(s) skipped: no numeric {}",
                count,
                column.label()
            ),
        }
    }
}
