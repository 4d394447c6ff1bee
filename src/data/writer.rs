use std::path::Path;

use crate::error::RefineError;

use super::model::Table;

/// Write `table` as CSV with a header row and no index column.
/// Missing cells become empty fields.
pub fn write_table(table: &Table, path: &Path) -> Result<(), RefineError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| RefineError::write(path, e))?;

    writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .map_err(|e| RefineError::write(path, e))?;

    for row in 0..table.height() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|c| c.values[row].as_field().into_owned())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| RefineError::write(path, e))?;
    }

    writer.flush().map_err(|e| RefineError::write(path, e))?;
    Ok(())
}
