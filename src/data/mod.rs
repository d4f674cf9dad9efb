/// Data layer: decoding, parsing, table building, element detection.
///
/// Architecture:
/// ```text
///   uploaded bytes (Latin-1)
///        │
///        ▼
///   ┌──────────┐
///   │  reader   │  bytes → RawDocument (lines)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  header at line 14, rows with enough fields
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  table    │  typed columns, "Point" dropped
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ elements  │  columns between "Distance" and "SED"
///   └──────────┘
/// ```
///
/// `filter` and `writer` serve the table preview (search/sort, CSV export).

pub mod elements;
pub mod filter;
pub mod model;
pub mod parser;
pub mod reader;
pub mod table;
pub mod writer;
