// src/checker/resolve.rs
// =============================================================================
// Turns a raw reference into an absolute URL, the way a browser would.
//
// Examples (base = "https://example.com/dir/page"):
//   "/docs"                -> https://example.com/docs
//   "../other"             -> https://example.com/other
//   "//cdn.example.com/x"  -> https://cdn.example.com/x
//   "#top"                 -> https://example.com/dir/page#top
//   "https://other.com"    -> https://other.com/
//   "http://["             -> Err(invalid IPv6 address)
// =============================================================================

use url::Url;

/// Resolves `raw_reference` against the page it was found on
///
/// `Url::join` already handles absolute references, so there is no
/// separate "is it absolute?" branch.
pub fn resolve_reference(raw_reference: &str, source_page: &Url) -> Result<Url, url::ParseError> {
    source_page.join(raw_reference.trim())
}
