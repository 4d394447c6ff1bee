use std::collections::HashSet;

use crate::data::model::Table;

/// Drop rows that exactly repeat an earlier row, keeping the first occurrence.
/// Returns the table and the number of rows removed.
pub fn drop_duplicates(mut table: Table) -> (Table, usize) {
    let mut keep = Vec::with_capacity(table.height());
    {
        let mut seen = HashSet::with_capacity(table.height());
        for i in 0..table.height() {
            keep.push(seen.insert(table.row(i)));
        }
    }

    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        table.retain_rows(&keep);
    }
    (table, removed)
}
