use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::RefineConfig;
use crate::data::dictionary::CodeDictionary;
use crate::data::loader::{load_dictionary, load_table};
use crate::data::model::Table;
use crate::data::writer::write_table;
use crate::refine::dedup::drop_duplicates;
use crate::refine::labels::apply_dictionary;
use crate::refine::normalize::normalize_types;
use crate::refine::outliers::flag_outliers;
use crate::refine::sentinel::replace_sentinel;

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Shape of the table that was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub columns: usize,
}

/// Load `csv_path` and `json_path`, refine, and write the result to
/// `config.output`. Progress lines go to `out`.
///
/// Nothing is written to disk unless both inputs load.
pub fn run<W: Write>(
    csv_path: &Path,
    json_path: &Path,
    config: &RefineConfig,
    out: &mut W,
) -> Result<RunSummary> {
    let table = load_table(csv_path)?;
    let dictionary = load_dictionary(json_path)?;
    writeln!(out, "Loaded {} rows", table.height())?;

    let table = refine(table, &dictionary, config, out)?;

    write_table(&table, &config.output)?;
    writeln!(out, "Refined data saved to {}", config.output.display())?;
    writeln!(out, "Final data shape: ({}, {})", table.height(), table.width())?;

    Ok(RunSummary {
        rows: table.height(),
        columns: table.width(),
    })
}

/// Run every refinement stage over an already-loaded table.
pub fn refine<W: Write>(
    table: Table,
    dictionary: &CodeDictionary,
    config: &RefineConfig,
    out: &mut W,
) -> Result<Table> {
    let (table, removed) = drop_duplicates(table);
    writeln!(out, "Removed {removed} duplicate rows")?;

    let (table, failures) = normalize_types(table);
    for failure in &failures {
        writeln!(out, "{failure}")?;
    }

    let (table, replaced) =
        replace_sentinel(table, config.sentinel, config.sentinel_scope, dictionary);
    writeln!(
        out,
        "Sentinel code '{}' replaced with missing in {replaced} cells",
        config.sentinel
    )?;

    let (table, report) = apply_dictionary(table, dictionary, config.sentinel);
    for column in &report.unknown_columns {
        log::warn!("dictionary names column '{column}' which is not in the dataset");
        writeln!(out, "Dictionary column '{column}' not found in dataset; skipping")?;
    }
    for outcome in &report.columns {
        if outcome.inadmissible > 0 {
            writeln!(
                out,
                "'{}' column contains {} inadmissible values",
                outcome.column, outcome.inadmissible
            )?;
        }
        writeln!(
            out,
            "Created new column '{}' using dictionary mapping",
            outcome.label_column
        )?;
    }

    let (table, flagged) = flag_outliers(table, &config.outlier_column, config.outlier_threshold);
    if let Some(count) = flagged.filter(|&n| n > 0) {
        writeln!(
            out,
            "Anomaly Check: {count} records in '{}' exceed {} hours per week",
            config.outlier_column, config.outlier_threshold
        )?;
        writeln!(
            out,
            "Outliers in '{}' replaced with missing",
            config.outlier_column
        )?;
    }

    Ok(table)
}
