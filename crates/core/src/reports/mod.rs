//! Reports module - deterministic settlement report and CSV generation.

mod csv_export;
mod html_report;
mod labels;
mod report_model;

#[cfg(test)]
mod reports_tests;

// Re-export the public interface
pub use csv_export::{csv_export_filename, settlements_to_csv};
pub use html_report::render_settlement_html;
pub use labels::{direction_label, status_label};
pub use report_model::{DateFormat, ExportOptions, OrderExportRow, SettlementExportData};
