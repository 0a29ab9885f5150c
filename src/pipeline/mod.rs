// src/pipeline/mod.rs
// =============================================================================
// This module runs the validation over a list of source pages.
//
// Submodules:
// - input: source list parsing and precondition checks
// - orchestrator: the sequential per-page loop and the run report
// =============================================================================

mod input;
mod orchestrator;

pub use input::parse_source_list;
pub use orchestrator::{Pipeline, RunReport};
