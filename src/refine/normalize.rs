use crate::data::model::{Table, Value};
use crate::error::RefineError;

/// Coerce every column to nullable integers.
///
/// Text that does not parse as a number becomes `Missing`. A column holding a
/// number with no integer representation (fractional, infinite, out of range)
/// is reported as a [`RefineError::ColumnConversion`] and keeps its loaded
/// form: numeric fields as `Float`, anything else as `Text`.
pub fn normalize_types(mut table: Table) -> (Table, Vec<RefineError>) {
    let mut failures = Vec::new();

    for column in &mut table.columns {
        match convert_column(&column.values) {
            Ok(values) => column.values = values,
            Err(reason) => {
                log::warn!("leaving column '{}' unconverted: {reason}", column.name);
                column.values = column.values.drain(..).map(float_cell).collect();
                failures.push(RefineError::ColumnConversion {
                    column: column.name.clone(),
                    reason,
                });
            }
        }
    }

    (table, failures)
}

fn convert_column(values: &[Value]) -> Result<Vec<Value>, String> {
    values
        .iter()
        .map(|value| match value {
            Value::Text(text) => parse_cell(text),
            other => Ok(other.clone()),
        })
        .collect()
}

/// Parse one field. `Ok(Missing)` for non-numeric text, `Err` for numbers that
/// exist but cannot be held as an `i64`.
fn parse_cell(text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Value::Integer(i));
    }

    let Ok(f) = trimmed.parse::<f64>() else {
        return Ok(Value::Missing);
    };

    if f.is_nan() {
        Ok(Value::Missing)
    } else if f.is_infinite() {
        Err(format!("cannot convert infinite value '{trimmed}' to integer"))
    } else if f.fract() != 0.0 {
        Err(format!("cannot safely cast non-equivalent float '{trimmed}' to integer"))
    } else if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        Err(format!("value '{trimmed}' is out of range for a 64-bit integer"))
    } else {
        Ok(Value::Integer(f as i64))
    }
}

/// Fallback for unconvertible columns: numbers stay numeric so later stages
/// can still compare them, other text is kept verbatim.
fn float_cell(value: Value) -> Value {
    match value {
        Value::Text(text) => match text.trim().parse::<f64>() {
            Ok(f) if f.is_nan() => Value::Missing,
            Ok(f) => Value::Float(f),
            Err(_) => Value::Text(text),
        },
        other => other,
    }
}
