// src/report/mod.rs
// =============================================================================
// This module turns a finished run into output.
//
// Submodules:
// - table: terminal table / JSON and summary
// - export: CSV file export
// =============================================================================

mod export;
mod table;

pub use export::{export_filename, export_to_file};
pub use table::print_report;
