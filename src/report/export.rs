// src/report/export.rs
// =============================================================================
// CSV export of a finished run.
//
// Format:
//   Source URL,Resource URL,Type,Status,Reason
//   "https://example.com/a","https://example.com/b","Link","Broken","HTTP status: 404"
//
// The header line is plain; every data field is quoted and embedded quotes
// are doubled. Default file name: resource_validation_<YYYY-MM-DD_HH-MM>.csv
// in local time.
// =============================================================================

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use csv::{QuoteStyle, WriterBuilder};

use crate::checker::ValidationResult;
use crate::error::ExportError;

pub const CSV_HEADER: &str = "Source URL,Resource URL,Type,Status,Reason";

/// File name for an export made at `now`
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("resource_validation_{}.csv", now.format("%Y-%m-%d_%H-%M"))
}

pub fn write_csv<W: Write>(mut writer: W, results: &[ValidationResult]) -> Result<(), ExportError> {
    writeln!(writer, "{CSV_HEADER}")?;

    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    for result in results {
        let kind = result.kind.to_string();
        let status = result.status.to_string();
        csv.write_record([
            result.source_url.as_str(),
            result.url.as_str(),
            kind.as_str(),
            status.as_str(),
            result.reason_text(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

pub fn export_to_file(path: &Path, results: &[ValidationResult]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), results)
}
