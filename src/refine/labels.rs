use std::collections::BTreeSet;

use crate::data::dictionary::{CodeDictionary, DictionaryEntry};
use crate::data::model::{Column, Table, Value};

/// Outcome of validating and labelling one dictionary column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOutcome {
    pub column: String,
    pub label_column: String,
    pub inadmissible: usize,
}

/// Outcome of the whole validation/labelling stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelReport {
    /// Processed columns, in dictionary order.
    pub columns: Vec<LabelOutcome>,
    /// Dictionary entries naming a column the table does not have.
    pub unknown_columns: Vec<String>,
}

/// Validate coded columns against `dictionary` and derive `<column>_LABEL`
/// columns from it.
///
/// The schema is matched up front: entries for absent columns are skipped and
/// listed in [`LabelReport::unknown_columns`].
pub fn apply_dictionary(
    mut table: Table,
    dictionary: &CodeDictionary,
    sentinel: i64,
) -> (Table, LabelReport) {
    let (present, unknown) = dictionary.match_schema(&table);
    let mut report = LabelReport {
        columns: Vec::with_capacity(present.len()),
        unknown_columns: unknown.into_iter().map(str::to_string).collect(),
    };

    for entry in present {
        let Some(source) = table.column(&entry.column) else {
            continue;
        };

        let admissible = entry.admissible_keys(sentinel);
        let inadmissible = count_inadmissible(&source.values, &admissible, sentinel);
        let labels = label_values(&source.values, entry);

        log::debug!(
            "column '{}': {inadmissible} inadmissible of {} values",
            entry.column,
            source.values.len()
        );

        let label_column = entry.label_column();
        table.upsert_column(Column::new(label_column.clone(), labels));
        report.columns.push(LabelOutcome {
            column: entry.column.clone(),
            label_column,
            inadmissible,
        });
    }

    (table, report)
}

/// A value is inadmissible when it is present, is not the sentinel, and is not
/// one of the admissible codes. Whole floats compare as their integer code;
/// fractions and unconverted text never match.
fn is_inadmissible(value: &Value, admissible: &BTreeSet<i64>, sentinel: i64) -> bool {
    if value == &Value::Missing {
        return false;
    }
    match value.as_code() {
        Some(code) => code != sentinel && !admissible.contains(&code),
        None => true,
    }
}

fn count_inadmissible(values: &[Value], admissible: &BTreeSet<i64>, sentinel: i64) -> usize {
    values
        .iter()
        .filter(|v| is_inadmissible(v, admissible, sentinel))
        .count()
}

fn label_values(values: &[Value], entry: &DictionaryEntry) -> Vec<Value> {
    values
        .iter()
        .map(|value| {
            value
                .as_code()
                .and_then(|code| entry.label_for(code))
                .map_or(Value::Missing, |label| Value::Text(label.to_string()))
        })
        .collect()
}
