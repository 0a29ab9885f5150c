// src/fetch/relay.rs
// =============================================================================
// The forwarding relay: an HTTP service that performs a request on our
// behalf and hands back the result.
//
// Two modes are used:
// - raw:    {base}/raw?url=<target>  -> the target's body, as-is
// - status: {base}/get?url=<target>  -> a JSON envelope carrying the
//                                       target's HTTP status
//
// The endpoint is a configuration point; any service speaking these two
// modes can be swapped in.
// =============================================================================

use serde::Deserialize;
use url::Url;

use super::transport::Transport;
use crate::error::{RelayConfigError, RelayError};

pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relay {
    base: Url,
}

impl Relay {
    // Parses and checks a relay base URL
    //
    // Only http(s) URLs with a host can forward requests.
    pub fn new(base: &str) -> Result<Self, RelayConfigError> {
        let base = Url::parse(base)?;

        let usable = matches!(base.scheme(), "http" | "https")
            && base.host_str().is_some_and(|host| !host.is_empty());
        if !usable {
            return Err(RelayConfigError::Unsupported(base.to_string()));
        }

        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Relay URL that returns the target's body
    pub fn raw_url(&self, target: &str) -> Result<Url, url::ParseError> {
        self.endpoint("raw", target)
    }

    /// Relay URL that returns the target's status envelope
    pub fn status_url(&self, target: &str) -> Result<Url, url::ParseError> {
        self.endpoint("get", target)
    }

    fn endpoint(&self, mode: &str, target: &str) -> Result<Url, url::ParseError> {
        let path = format!("{}/{}", self.base.as_str().trim_end_matches('/'), mode);
        Url::parse_with_params(&path, &[("url", target)])
    }

    // Fetches the target's body through the relay
    //
    // Returns the body only when the relay itself answered 2xx; anything
    // else is an error so the caller can move on to the next strategy.
    pub async fn fetch_raw<T: Transport + ?Sized>(
        &self,
        transport: &T,
        target: &str,
    ) -> Result<String, RelayError> {
        let url = self.raw_url(target)?;
        let reply = transport.get(url.as_str(), Some("text/html")).await?;

        if !reply.is_success() {
            return Err(RelayError::Status(reply.status));
        }

        Ok(reply.body)
    }

    // Asks the relay for the target's HTTP status
    //
    // Ok(None) means the relay answered with an envelope that carries no
    // status code. Errors mean the relay call itself failed.
    pub async fn fetch_status<T: Transport + ?Sized>(
        &self,
        transport: &T,
        target: &str,
    ) -> Result<Option<u16>, RelayError> {
        let url = self.status_url(target)?;
        let reply = transport.get(url.as_str(), Some("application/json")).await?;

        if !reply.is_success() {
            return Err(RelayError::Status(reply.status));
        }

        let envelope: StatusEnvelope = serde_json::from_str(&reply.body)?;
        Ok(envelope.http_code())
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_RELAY_URL).expect("default relay URL is valid"),
        }
    }
}

/// What the relay's status mode answers with
///
/// Only the status code matters to us; the relay also sends the
/// forwarded body and timing data, which serde skips.
#[derive(Debug, Default, Deserialize)]
pub struct StatusEnvelope {
    #[serde(default)]
    pub status: Option<EnvelopeStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnvelopeStatus {
    #[serde(default)]
    pub http_code: Option<u16>,
}

impl StatusEnvelope {
    pub fn http_code(&self) -> Option<u16> {
        self.status.as_ref().and_then(|s| s.http_code)
    }
}
