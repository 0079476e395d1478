//! Profile reporting: filter parsing, shared selection, aggregates, and the
//! deterministic PDF export.

pub mod export;
pub mod filter;
pub mod pdf;
pub mod summary;
pub mod views;

pub use export::{export_rows, render_report_pdf, ExportRow};
pub use filter::{normalize_zone, ReportFilter, ReportQuery};
pub use summary::{build_report, filter_options, select, statistics};
pub use views::{FilterOptionsView, ReportStatisticsView, ReportView};
