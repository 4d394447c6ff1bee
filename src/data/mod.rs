/// Data layer: core types, loading, and writing.
///
/// Architecture:
/// ```text
///  census.csv     dictionary.json
///      │                │
///      ▼                ▼
///   ┌──────────────────────┐
///   │        loader        │  parse files → Table, CodeDictionary
///   └──────────────────────┘
///      │
///      ▼
///   ┌──────────┐
///   │  Table   │  named columns of Value cells
///   └──────────┘
///      │   (refine stages)
///      ▼
///   ┌──────────┐
///   │  writer  │  Table → refined CSV
///   └──────────┘
/// ```

pub mod dictionary;
pub mod loader;
pub mod model;
pub mod writer;
