/// Data layer: record types, the startup pipeline, views and chart summaries.
///
/// Architecture:
/// ```text
///  devices.js        column_map.json
///        │                  │
///        ▼                  ▼
///   ┌──────────────────────────┐
///   │ loader + js_literal      │  extract `var x = [...]`, repair → JSON → Dataset
///   └──────────────────────────┘
///        │
///        ▼
///   normalize ─► dedupe ─► eligibility ─► indexes
///        │
///        ▼
///   ┌──────────────┐
///   │ DeviceCatalog │  immutable, shared via Arc
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌─────────┐
///   │  filter   │ ──► │ summary │  per-interaction view → chart numbers
///   └──────────┘      └─────────┘
/// ```

pub mod dedupe;
pub mod eligibility;
pub mod filter;
pub mod indexes;
pub mod js_literal;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod summary;
