use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while refining a census extract.
///
/// Everything except [`RefineError::ColumnConversion`] is fatal and ends the
/// run with a non-zero exit status. Conversion failures are reported and the
/// offending column keeps its numeric cells as floats.
#[derive(Debug, Error)]
pub enum RefineError {
    /// An input file does not exist.
    #[error("{kind} file not found at {}", path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    /// An input file exists but could not be read.
    #[error("unable to read {kind} file at {}", path.display())]
    Read {
        kind: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The code dictionary is not a JSON object of `code -> label` objects.
    #[error("unable to decode JSON dictionary file at {}: {reason}", path.display())]
    MalformedDictionary { path: PathBuf, reason: String },

    /// The CSV extract could not be parsed.
    #[error("unable to parse CSV file at {}: {reason}", path.display())]
    MalformedTable { path: PathBuf, reason: String },

    /// A column holds values that have no nullable-integer representation.
    #[error("Unable to convert column '{column}' to nullable integer: {reason}")]
    ColumnConversion { column: String, reason: String },

    /// The refined table could not be persisted.
    #[error("could not save the refined data to {}", path.display())]
    Write { path: PathBuf, source: csv::Error },
}

impl RefineError {
    /// Classify an I/O failure on an input file.
    pub fn open(kind: &'static str, path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            RefineError::NotFound {
                kind,
                path: path.to_path_buf(),
            }
        } else {
            RefineError::Read {
                kind,
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    pub fn malformed_dictionary(path: &Path, reason: impl ToString) -> Self {
        RefineError::MalformedDictionary {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed_table(path: &Path, reason: impl ToString) -> Self {
        RefineError::MalformedTable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: &Path, source: impl Into<csv::Error>) -> Self {
        RefineError::Write {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
