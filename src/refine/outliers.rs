use crate::data::model::{Table, Value};

/// Null values of `column` strictly above `threshold`.
///
/// Returns `None` when the column is absent (the check is skipped), otherwise
/// the number of values replaced.
pub fn flag_outliers(mut table: Table, column: &str, threshold: i64) -> (Table, Option<usize>) {
    if !table.has_column(column) {
        log::debug!("outlier column '{column}' not present, skipping");
        return (table, None);
    }

    let mut flagged = 0;
    if let Some(target) = table.column_mut(column) {
        for value in &mut target.values {
            if value.as_f64().is_some_and(|v| v > threshold as f64) {
                *value = Value::Missing;
                flagged += 1;
            }
        }
    }

    (table, Some(flagged))
}
