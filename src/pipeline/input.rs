// src/pipeline/input.rs
// =============================================================================
// Source list handling: turning raw text into a list of source URLs and
// checking that list before a run touches the network.
// =============================================================================

use url::Url;

use crate::error::PreconditionError;

/// A source page that passed the precondition check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    /// Exactly what the caller supplied
    pub raw: String,
    pub url: Url,
}

// Splits pasted text into source URLs, one per line
//
// Surrounding whitespace is trimmed and blank lines are dropped.
pub fn parse_source_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// Checks a source list before a run
//
// Fails with:
// - NoSources if the list is empty
// - InvalidSources listing every entry that is not an absolute http(s) URL
// - TooManySources if there are more than `max` entries
pub fn check_sources(sources: &[String], max: usize) -> Result<Vec<SourcePage>, PreconditionError> {
    if sources.is_empty() {
        return Err(PreconditionError::NoSources);
    }

    let mut pages = Vec::with_capacity(sources.len());
    let mut invalid = Vec::new();

    for raw in sources {
        match parse_source(raw) {
            Some(url) => pages.push(SourcePage {
                raw: raw.clone(),
                url,
            }),
            None => invalid.push(raw.clone()),
        }
    }

    if !invalid.is_empty() {
        return Err(PreconditionError::InvalidSources(invalid));
    }

    if sources.len() > max {
        return Err(PreconditionError::TooManySources {
            count: sources.len(),
            max,
        });
    }

    Ok(pages)
}

fn parse_source(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_source_list() {
        let text = "  https://example.com/a \n\n\thttps://example.com/b\n   \n";
        assert_eq!(
            parse_source_list(text),
            strings(&["https://example.com/a", "https://example.com/b"])
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(check_sources(&[], 10), Err(PreconditionError::NoSources));
    }

    #[test]
    fn test_all_invalid_entries_reported_together() {
        let sources = strings(&["https://example.com", "not a url", "/relative", "mailto:a@b.c"]);
        assert_eq!(
            check_sources(&sources, 10),
            Err(PreconditionError::InvalidSources(strings(&[
                "not a url",
                "/relative",
                "mailto:a@b.c"
            ])))
        );
    }

    #[test]
    fn test_too_many_sources() {
        let sources: Vec<String> = (0..11).map(|i| format!("https://example.com/{i}")).collect();
        assert_eq!(
            check_sources(&sources, 10),
            Err(PreconditionError::TooManySources { count: 11, max: 10 })
        );
    }

    #[test]
    fn test_ten_sources_are_accepted() {
        let sources: Vec<String> = (0..10).map(|i| format!("https://example.com/{i}")).collect();
        let pages = check_sources(&sources, 10).unwrap();
        assert_eq!(pages.len(), 10);
        assert_eq!(pages[3].raw, "https://example.com/3");
    }
}
