//! Report formatting and table conversion
//!
//! Adapters between coordinate tables and the core mapping pipeline.

pub mod report;
pub mod tabular;

pub use report::{format_report, format_row, header, write_report, ReportMode};
pub use tabular::{convert_file, convert_tabular, ConversionStats, ConvertOptions};
