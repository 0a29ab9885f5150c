// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Collect the source URLs (arguments and/or a file)
// 3. Run the validation pipeline
// 4. Print the report, optionally export it to CSV
// 5. Exit with proper code (0 = nothing broken, 1 = broken resources,
//    2 = rejected input or unexpected error)
// =============================================================================

mod checker; // src/checker/ - extraction, resolution, validation
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - runtime settings
mod error; // src/error.rs - typed errors
mod fetch; // src/fetch/ - relay, direct and probe requests
mod logging; // src/logging.rs - tracing setup
mod pipeline; // src/pipeline/ - the per-page loop
mod report; // src/report/ - table, JSON and CSV output

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use config::Config;
use fetch::{HttpTransport, Relay, Transport};
use pipeline::Pipeline;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Anything that gets here ends the run; partial results are dropped
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Validate {
            urls,
            file,
            json,
            csv,
            relay_url,
            pacing_ms,
            timeout_secs,
        } => {
            let relay = Relay::new(&relay_url)
                .with_context(|| format!("Invalid relay URL '{}'", relay_url))?;

            let config = Config::default()
                .with_relay(relay)
                .with_pacing(Duration::from_millis(pacing_ms))
                .with_request_timeout(Duration::from_secs(timeout_secs));

            let sources = collect_sources(urls, file.as_deref())?;
            handle_validate(config, &sources, json, csv).await
        }
    }
}

// Gathers source URLs from the positional arguments and the optional file
fn collect_sources(urls: Vec<String>, file: Option<&std::path::Path>) -> Result<Vec<String>> {
    let mut text = urls.join("\n");

    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        text.push('\n');
        text.push_str(&contents);
    }

    Ok(pipeline::parse_source_list(&text))
}

async fn handle_validate(
    config: Config,
    sources: &[String],
    json: bool,
    csv: Option<Option<PathBuf>>,
) -> Result<i32> {
    info!(relay = %config.relay.base(), pacing_ms = config.pacing.as_millis() as u64, "starting run");
    let transport = HttpTransport::new(&config).context("Failed to create HTTP client")?;
    let pipeline = Pipeline::new(transport, config);

    execute(&pipeline, sources, json, csv).await
}

// Runs the pipeline and reports on it
//
// Returns the exit code: 2 for a rejected source list (nothing is printed
// to stdout then), 1 if anything is broken, 0 otherwise
async fn execute<T: Transport>(
    pipeline: &Pipeline<T>,
    sources: &[String],
    json: bool,
    csv: Option<Option<PathBuf>>,
) -> Result<i32> {
    let report = match pipeline.run(sources).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(2);
        }
    };

    if !json {
        println!("🔍 Validated {} source page(s)\n", sources.len());
    }

    report::print_report(&report, json)?;

    if let Some(path) = csv {
        if report.has_results() {
            let path = path.unwrap_or_else(|| {
                PathBuf::from(report::export_filename(chrono::Local::now()))
            });
            report::export_to_file(&path, &report.results)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "exported results");
            if !json {
                println!("\n💾 Exported {} result(s) to {}", report.results.len(), path.display());
            }
        } else {
            eprintln!("Nothing to export: no results");
        }
    }

    if report.has_broken() {
        Ok(1)
    } else {
        Ok(0)
    }
}
