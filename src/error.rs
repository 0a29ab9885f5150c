// src/error.rs
// =============================================================================
// Typed errors for the audit pipeline.
//
// Only precondition errors ever reach the caller of a run. Everything that
// goes wrong while fetching a source page or probing a resource is turned
// into a result record or a skipped-source entry instead.
// =============================================================================

use thiserror::Error;

/// Why a run was refused before any network activity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Please enter at least one URL")]
    NoSources,

    #[error("Invalid URL(s): {}", .0.join(", "))]
    InvalidSources(Vec<String>),

    #[error("Too many URLs: {count} given, at most {max} are allowed")]
    TooManySources { count: usize, max: usize },
}

/// A request that never produced an HTTP response
#[derive(Debug, Error)]
pub enum TransportError {
    /// Sent, but no response came back (DNS, connect, TLS, timeout, ...)
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// The request could not be built, so nothing was sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            TransportError::InvalidRequest(e.to_string())
        } else {
            TransportError::Unreachable(e.to_string())
        }
    }
}

/// The configured relay endpoint is unusable
#[derive(Debug, Error)]
pub enum RelayConfigError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    #[error("relay URL must be http or https with a host, got '{0}'")]
    Unsupported(String),
}

/// The relay answered, but not with something we can use
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid relay endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("relay returned HTTP {0}")]
    Status(u16),

    #[error("malformed relay envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

impl RelayError {
    /// True when the relay call could not even be attempted
    ///
    /// These are problems on our side, not evidence about the target.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RelayError::Endpoint(_) | RelayError::Transport(TransportError::InvalidRequest(_))
        )
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sources_lists_every_entry() {
        let err = PreconditionError::InvalidSources(vec!["foo".into(), "bar baz".into()]);
        assert_eq!(err.to_string(), "Invalid URL(s): foo, bar baz");
    }

    #[test]
    fn test_internal_relay_errors() {
        assert!(RelayError::Endpoint(url::ParseError::EmptyHost).is_internal());
        assert!(RelayError::Transport(TransportError::InvalidRequest("bad header".into())).is_internal());
        assert!(!RelayError::Transport(TransportError::Unreachable("refused".into())).is_internal());
        assert!(!RelayError::Status(502).is_internal());
    }

    #[test]
    fn test_too_many_sources_message() {
        let err = PreconditionError::TooManySources { count: 12, max: 10 };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("10"));
    }
}
