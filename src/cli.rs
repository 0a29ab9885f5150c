// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). A few flags fall back to
// environment variables through clap's `env` feature.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{DEFAULT_PACING_MS, DEFAULT_TIMEOUT_SECS};
use crate::fetch::DEFAULT_RELAY_URL;

#[derive(Parser, Debug)]
#[command(
    name = "page-link-audit",
    version,
    about = "Validate the links and images referenced by a handful of web pages",
    long_about = "page-link-audit fetches up to 10 pages (email previews, landing pages, ...), \
                  extracts every link and image they reference and checks whether each one is \
                  reachable. Results can be printed as a table, as JSON, or exported to CSV."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when it is set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the links and images of up to 10 source pages
    ///
    /// Example: page-link-audit validate https://example.com/preview --csv
    Validate {
        /// Source page URLs
        urls: Vec<String>,

        /// Read source URLs from a file, one per line
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Also export the results to CSV (--csv or --csv=PATH)
        ///
        /// Without a path the file is named resource_validation_<YYYY-MM-DD_HH-MM>.csv
        #[arg(long, num_args = 0..=1, require_equals = true, value_name = "PATH")]
        csv: Option<Option<PathBuf>>,

        /// Base URL of the forwarding relay
        #[arg(long, env = "PAGE_AUDIT_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
        relay_url: String,

        /// Pause between two resource checks, in milliseconds
        #[arg(long, env = "PAGE_AUDIT_PACING_MS", default_value_t = DEFAULT_PACING_MS)]
        pacing_ms: u64,

        /// Per-request timeout, in seconds
        #[arg(long, env = "PAGE_AUDIT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
}
