/// Data layer: parsing, filtering, statistics, chart series and export.
///
/// Architecture:
/// ```text
///   uploaded .csv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Table (column types inferred once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  select_column + `value > threshold` → FilteredView
///   └──────────┘
///        │
///        ├──────────────┬───────────────┐
///        ▼              ▼               ▼
///   ┌─────────┐    ┌─────────┐     ┌─────────┐
///   │  stats   │    │ series  │     │ export  │
///   └─────────┘    └─────────┘     └─────────┘
///   summary,        points,         filtered
///   describe        pie, bins       rows → CSV
/// ```
///
/// `pipeline::evaluate` runs the whole chain for one user interaction.

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod series;
pub mod stats;

pub use error::{ParseError, ValidationError};
pub use export::to_download;
pub use filter::{apply_filter, select_column, ColumnSelection, FilteredView};
pub use loader::{load_file, parse};
pub use model::{CellValue, Column, ColumnKind, Table};
pub use pipeline::{evaluate, Evaluation, Query};
pub use series::{to_chart_series, ChartKind, ChartSeries, HistogramBin};
pub use stats::{describe, summarize, ColumnDescription, SummaryStatistics};
