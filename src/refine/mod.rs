/// Refinement stages. Each stage takes the table by value and hands back the
/// updated table with what it did.
///
/// ```text
///   dedup ──► normalize ──► sentinel ──► labels ──► outliers
/// ```

pub mod dedup;
pub mod labels;
pub mod normalize;
pub mod outliers;
pub mod sentinel;
