// src/checker/mod.rs
// =============================================================================
// This module contains the per-page checking logic.
//
// Submodules:
// - types: resources, statuses and result records
// - extract: finds link and image references in a page
// - resolve: turns a reference into an absolute URL
// - validate: decides the status of each resource
// =============================================================================

mod extract;
mod resolve;
mod types;
mod validate;

pub use extract::extract_resources;
pub use types::{ResultKind, ValidationResult, ValidationStatus};
pub use validate::ResourceValidator;
