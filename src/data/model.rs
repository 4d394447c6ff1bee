use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A cell of the census table.
///
/// Freshly loaded cells are `Text` (or `Missing` for empty fields). After type
/// normalization data columns hold `Integer` and `Missing`, except a column
/// that has no integer representation: its numbers stay `Float`. Label columns
/// hold `Text` and `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    /// Never NaN; unparseable numbers are `Missing`.
    Float(f64),
    Text(String),
    Missing,
}

// -- Manual Eq/Hash so rows can be put in a HashSet --

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Integer(i) => i.hash(state),
            // 0.0 == -0.0, so they must hash alike
            Value::Float(f) => (f + 0.0).to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Missing => {}
        }
    }
}

impl Value {
    /// Build a cell from a raw CSV field. Empty fields are missing.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Value::Missing
        } else {
            Value::Text(field.to_string())
        }
    }

    /// Numeric view of the cell, for threshold comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The integer code this cell stands for: integers, and floats with no
    /// fractional part.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    /// The CSV field for this cell. Missing cells serialize as empty fields.
    pub fn as_field(&self) -> Cow<'_, str> {
        match self {
            Value::Integer(i) => Cow::Owned(i.to_string()),
            // `{:?}` keeps the decimal point on whole floats ("35.0")
            Value::Float(f) => Cow::Owned(format!("{f:?}")),
            Value::Text(s) => Cow::Borrowed(s),
            Value::Missing => Cow::Borrowed(""),
        }
    }
}

impl From<Option<i64>> for Value {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Value::Missing, Value::Integer)
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor for nullable-integer columns.
    #[cfg(test)]
    pub fn integers(name: impl Into<String>, values: &[Option<i64>]) -> Self {
        Column::new(name, values.iter().copied().map(Value::from).collect())
    }
}

/// The full dataset: ordered columns of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].values.len() == w[1].values.len()),
            "columns must have equal length"
        );
        Table { columns }
    }

    /// Build a column-oriented table from header names and row records.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }
        Table::new(columns)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Insert a column, replacing the values of an existing column with the
    /// same name in place.
    pub fn upsert_column(&mut self, column: Column) {
        match self.column_mut(&column.name) {
            Some(existing) => existing.values = column.values,
            None => self.columns.push(column),
        }
    }

    /// Cells of row `index` in column order.
    pub fn row(&self, index: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    /// Keep only the rows whose flag in `keep` is set.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column
                .values
                .retain(|_| flags.next().copied().unwrap_or(false));
        }
    }
}
