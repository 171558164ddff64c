/// Data layer: record types, loading, integration and the response spectrum.
///
/// Architecture:
/// ```text
///  .ACC (fixed width) / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → AccelerogramRecord
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌───────────┐        ┌────────────┐
///   │ integrate  │        │  spectrum   │  a / g → SDOF bank → Sd, Sv, Sa
///   └───────────┘        └────────────┘
///        │  v, d                │
///        └──────────┬───────────┘
///                   ▼
///          ┌──────────────────┐
///          │ GroundMotionAnalysis │
///          └──────────────────┘
/// ```

pub mod analysis;
pub mod integrate;
pub mod loader;
pub mod model;
pub mod spectrum;
