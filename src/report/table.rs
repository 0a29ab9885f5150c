// src/report/table.rs
// =============================================================================
// Terminal output for a finished run: a table (or JSON), a summary with one
// count per status, and the list of source pages that had to be skipped.
// =============================================================================

use anyhow::Result;

use crate::checker::{ValidationResult, ValidationStatus};
use crate::pipeline::RunReport;

const URL_WIDTH: usize = 50;

// Prints the report either as a table or JSON
pub fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if report.has_results() {
        print_table(&report.results);
        print_summary(report);
    } else {
        println!("⚠️  No results: no resources could be checked");
    }

    print_skipped(report);
    Ok(())
}

fn print_table(results: &[ValidationResult]) {
    println!(
        "{:<52} {:<52} {:<6} {:<16} {}",
        "SOURCE", "RESOURCE", "TYPE", "STATUS", "REASON"
    );
    println!("{}", "=".repeat(150));

    for result in results {
        println!(
            "{:<52} {:<52} {:<6} {:<16} {}",
            truncate(&result.source_url),
            truncate(&result.url),
            result.kind.to_string(),
            format_status(result.status),
            result.reason_text()
        );
    }

    println!();
}

fn print_summary(report: &RunReport) {
    println!("📊 Summary:");
    for status in ValidationStatus::ALL {
        let count = report.count(status);
        if count > 0 {
            println!("   {}: {}", format_status(status), count);
        }
    }
    println!("   📋 Total: {}", report.results.len());
}

fn print_skipped(report: &RunReport) {
    if report.skipped.is_empty() {
        return;
    }

    println!();
    println!("⏭️  Skipped {} source page(s):", report.skipped.len());
    for skipped in &report.skipped {
        println!("   {} ({})", skipped.source_url, skipped.reason);
    }
}

fn format_status(status: ValidationStatus) -> String {
    match status {
        ValidationStatus::Valid => "✅ VALID".to_string(),
        ValidationStatus::LikelyValid => "🟡 LIKELY VALID".to_string(),
        ValidationStatus::Broken => "❌ BROKEN".to_string(),
        ValidationStatus::Unknown => "❔ UNKNOWN".to_string(),
        ValidationStatus::Empty => "📭 EMPTY".to_string(),
    }
}

// Shortens long URLs for display, on a char boundary
fn truncate(text: &str) -> String {
    if text.chars().count() <= URL_WIDTH {
        return text.to_string();
    }

    let kept: String = text.chars().take(URL_WIDTH - 3).collect();
    format!("{kept}...")
}
