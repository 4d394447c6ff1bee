use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use crate::error::RefineError;

use super::dictionary::CodeDictionary;
use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: comma-delimited, header row, one record per row.
///
/// Every non-empty field is loaded as `Value::Text`; type coercion happens
/// later in the pipeline. Ragged rows and empty or duplicate header names are
/// rejected.
pub fn load_table(path: &Path) -> Result<Table, RefineError> {
    let file = File::open(path).map_err(|e| RefineError::open("CSV", path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| RefineError::malformed_table(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut seen = BTreeSet::new();
    for (idx, header) in headers.iter().enumerate() {
        if header.trim().is_empty() {
            return Err(RefineError::malformed_table(
                path,
                format!("column {idx} has an empty name in header"),
            ));
        }
        if !seen.insert(header.as_str()) {
            return Err(RefineError::malformed_table(
                path,
                format!("duplicate column '{header}' in header"),
            ));
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| RefineError::malformed_table(path, format!("row {row_no}: {e}")))?;
        rows.push(record.iter().map(Value::from_field).collect());
    }

    log::debug!(
        "loaded {} rows x {} columns from {}",
        rows.len(),
        headers.len(),
        path.display()
    );
    Ok(Table::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON dictionary loader
// ---------------------------------------------------------------------------

/// Load the code dictionary document. See [`CodeDictionary::from_json_str`]
/// for the expected layout.
pub fn load_dictionary(path: &Path) -> Result<CodeDictionary, RefineError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| RefineError::open("JSON", path, e))?;
    let dictionary = CodeDictionary::from_json_str(&text)
        .map_err(|reason| RefineError::malformed_dictionary(path, reason))?;

    log::debug!(
        "loaded {} dictionary entries from {}",
        dictionary.entries().len(),
        path.display()
    );
    Ok(dictionary)
}
