use crate::config::SentinelScope;
use crate::data::dictionary::CodeDictionary;
use crate::data::model::{Table, Value};

/// Replace the "not applicable" sentinel with `Missing`.
///
/// With [`SentinelScope::All`] every column is rewritten; with
/// [`SentinelScope::Dictionary`] only columns named in `dictionary`.
/// Returns the number of cells replaced.
pub fn replace_sentinel(
    mut table: Table,
    sentinel: i64,
    scope: SentinelScope,
    dictionary: &CodeDictionary,
) -> (Table, usize) {
    let mut replaced = 0;

    for column in &mut table.columns {
        if scope == SentinelScope::Dictionary && !dictionary.covers(&column.name) {
            continue;
        }
        for value in &mut column.values {
            if value.as_f64() == Some(sentinel as f64) {
                *value = Value::Missing;
                replaced += 1;
            }
        }
    }

    (table, replaced)
}
