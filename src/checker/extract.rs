// src/checker/extract.rs
// =============================================================================
// This module pulls link and image references out of a fetched page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Never fails: broken markup is repaired the way a browser would
// - Supports CSS selectors for finding elements
//
// References are returned raw. Resolving them against the page URL is the
// resolver's job, so a malformed href still shows up in the report.
// =============================================================================

use scraper::{Html, Selector};

use super::types::{Extraction, Resource};
use crate::fetch::PageContent;

// Extracts every link and image reference from a page
//
// Order: all <a href> in document order, then all <img src> in document
// order. Empty references are dropped.
//
// Example:
//   <img src="x.png"><a href="/docs">Docs</a>
//   -> [Link("/docs"), Image("x.png")]
pub fn extract_resources(content: &PageContent) -> Extraction {
    let html = match content {
        PageContent::RestrictedAccess => return Extraction::Restricted,
        PageContent::Html(html) => html,
    };

    let document = Html::parse_document(html);

    // Both selectors are constants, so parsing them cannot fail
    let links = Selector::parse("a[href]").unwrap();
    let images = Selector::parse("img[src]").unwrap();

    let mut resources = Vec::new();

    for element in document.select(&links) {
        if let Some(href) = element.value().attr("href").filter(|v| !v.trim().is_empty()) {
            resources.push(Resource::link(href));
        }
    }

    for element in document.select(&images) {
        if let Some(src) = element.value().attr("src").filter(|v| !v.trim().is_empty()) {
            resources.push(Resource::image(src));
        }
    }

    Extraction::Resources(resources)
}
