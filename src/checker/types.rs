// src/checker/types.rs
// =============================================================================
// Data model shared by the extractor, the validator and the reports.
//
// Kinds and statuses are closed enums. Their Display impls give the labels
// used in the table and the CSV export; serde gives the JSON names.
// =============================================================================

use std::fmt;

use serde::Serialize;

/// What kind of element a reference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// `<a href>`
    Link,
    /// `<img src>`
    Image,
}

/// A reference pulled out of a source page, not yet resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub raw_reference: String,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn link(raw_reference: impl Into<String>) -> Self {
        Self {
            raw_reference: raw_reference.into(),
            kind: ResourceKind::Link,
        }
    }

    pub fn image(raw_reference: impl Into<String>) -> Self {
        Self {
            raw_reference: raw_reference.into(),
            kind: ResourceKind::Image,
        }
    }
}

/// Everything the extractor can hand to the validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The page exists but its content could not be read
    Restricted,
    /// References found in the page, possibly none
    Resources(Vec<Resource>),
}

/// The `Type` column of a result
///
/// Url is used for the one-per-page records that describe the source page
/// itself (restricted or empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Link,
    Image,
    Url,
}

impl From<ResourceKind> for ResultKind {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Link => ResultKind::Link,
            ResourceKind::Image => ResultKind::Image,
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultKind::Link => "Link",
            ResultKind::Image => "Image",
            ResultKind::Url => "URL",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Relay reported a 2xx or 3xx status
    Valid,
    /// Host answered a probe, but no status could be read
    LikelyValid,
    /// Error status, malformed reference, or unreachable
    Broken,
    /// The source page could not be read
    Unknown,
    /// The source page had no links or images
    Empty,
}

impl ValidationStatus {
    pub const ALL: [ValidationStatus; 5] = [
        ValidationStatus::Valid,
        ValidationStatus::LikelyValid,
        ValidationStatus::Broken,
        ValidationStatus::Unknown,
        ValidationStatus::Empty,
    ];
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationStatus::Valid => "Valid",
            ValidationStatus::LikelyValid => "Likely Valid",
            ValidationStatus::Broken => "Broken",
            ValidationStatus::Unknown => "Unknown",
            ValidationStatus::Empty => "Empty",
        })
    }
}

/// One row of the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// The source page, exactly as the caller supplied it
    pub source_url: String,
    /// The resolved resource, or the raw reference if it did not resolve
    pub url: String,
    pub kind: ResultKind,
    pub status: ValidationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn new(
        source_url: &str,
        url: impl Into<String>,
        kind: ResultKind,
        status: ValidationStatus,
        reason: Option<String>,
    ) -> Self {
        Self {
            source_url: source_url.to_string(),
            url: url.into(),
            kind,
            status,
            reason,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.status == ValidationStatus::Broken
    }

    pub fn reason_text(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }
}
