// src/pipeline/orchestrator.rs
// =============================================================================
// Drives a whole run: source pages are handled one at a time, in the order
// given, and every page goes through fetch -> extract -> validate.
//
// Failure handling:
// - a bad source list stops the run before any request is made
// - a page that cannot be fetched at all is skipped and noted on the report
// - problems with single resources never leave the validator; they come
//   back as Broken records
//
// The report is built fresh for every run and handed back to the caller.
// =============================================================================

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::{info, warn};

use super::input::{check_sources, SourcePage};
use crate::checker::{extract_resources, ResourceValidator, ValidationResult, ValidationStatus};
use crate::config::Config;
use crate::error::PreconditionError;
use crate::fetch::{ProxiedFetcher, Transport};

/// A source page that contributed no records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    pub source_url: String,
    pub reason: String,
}

/// Everything a finished run produced
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub results: Vec<ValidationResult>,
    pub skipped: Vec<SkippedSource>,
}

impl RunReport {
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn count(&self, status: ValidationStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn has_broken(&self) -> bool {
        self.results.iter().any(ValidationResult::is_broken)
    }
}

pub struct Pipeline<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> Pipeline<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // Runs the whole pipeline over a list of source URLs
    //
    // Returns: Err only for a rejected source list (nothing was fetched);
    // otherwise the collected records plus any skipped pages
    pub async fn run(&self, sources: &[String]) -> Result<RunReport, PreconditionError> {
        let pages = check_sources(sources, self.config.max_sources)?;
        let mut report = RunReport::default();

        for page in &pages {
            info!(source_url = %page.raw, "checking source page");

            match self.process_source(page).await {
                Ok(results) => {
                    info!(source_url = %page.raw, records = results.len(), "source page done");
                    report.results.extend(results);
                }
                Err(e) => {
                    warn!(source_url = %page.raw, error = %e, "skipping source page");
                    report.skipped.push(SkippedSource {
                        source_url: page.raw.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    async fn process_source(&self, page: &SourcePage) -> Result<Vec<ValidationResult>> {
        let fetcher = ProxiedFetcher::new(&self.transport, &self.config.relay);
        let content = fetcher
            .fetch(page.url.as_str())
            .await
            .ok_or_else(|| anyhow!("Unable to fetch content from {}", page.raw))?;

        let extraction = extract_resources(&content);

        let validator =
            ResourceValidator::new(&self.transport, &self.config.relay, self.config.pacing);
        Ok(validator.validate(&page.raw, &page.url, extraction).await)
    }
}
