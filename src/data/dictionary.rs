use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value as JsonValue;

use super::model::Table;

// ---------------------------------------------------------------------------
// Code dictionary
// ---------------------------------------------------------------------------

/// The `code -> label` mapping for one coded column.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    pub column: String,
    pub codes: BTreeMap<i64, String>,
}

impl DictionaryEntry {
    pub fn label_for(&self, code: i64) -> Option<&str> {
        self.codes.get(&code).map(String::as_str)
    }

    /// Codes a value may legitimately take, i.e. every key except the sentinel.
    pub fn admissible_keys(&self, sentinel: i64) -> BTreeSet<i64> {
        self.codes.keys().copied().filter(|&k| k != sentinel).collect()
    }

    /// Name of the derived label column.
    pub fn label_column(&self) -> String {
        format!("{}_LABEL", self.column)
    }
}

/// Ordered list of dictionary entries, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeDictionary {
    entries: Vec<DictionaryEntry>,
}

impl CodeDictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        CodeDictionary { entries }
    }

    /// Parse the JSON document:
    ///
    /// ```json
    /// {
    ///   "FAMILY_TYPE": { "1": "Married couple", "-8": "No code required" },
    ///   "SEX": { "1": "Male", "2": "Female" }
    /// }
    /// ```
    ///
    /// Keys must be integers; labels must be strings.
    pub fn from_json_str(text: &str) -> Result<Self, String> {
        let root: JsonValue = serde_json::from_str(text).map_err(|e| e.to_string())?;
        let columns = root
            .as_object()
            .ok_or("expected a top-level JSON object")?;

        let mut entries = Vec::with_capacity(columns.len());
        for (column, mapping) in columns {
            let mapping = mapping
                .as_object()
                .ok_or_else(|| format!("entry '{column}' is not a JSON object"))?;

            let mut codes = BTreeMap::new();
            for (key, label) in mapping {
                let code: i64 = key
                    .trim()
                    .parse()
                    .map_err(|_| format!("entry '{column}': key '{key}' is not an integer code"))?;
                let label = label
                    .as_str()
                    .ok_or_else(|| format!("entry '{column}': label for '{key}' is not a string"))?;
                codes.insert(code, label.to_string());
            }

            entries.push(DictionaryEntry {
                column: column.clone(),
                codes,
            });
        }

        Ok(CodeDictionary::new(entries))
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn covers(&self, column: &str) -> bool {
        self.entries.iter().any(|e| e.column == column)
    }

    /// Split entries into those whose column exists in `table` and the names
    /// of those that do not.
    pub fn match_schema(&self, table: &Table) -> (Vec<&DictionaryEntry>, Vec<&str>) {
        let mut present = Vec::new();
        let mut unknown = Vec::new();
        for entry in &self.entries {
            if table.has_column(&entry.column) {
                present.push(entry);
            } else {
                unknown.push(entry.column.as_str());
            }
        }
        (present, unknown)
    }
}
