// src/fetch/proxied.rs
// =============================================================================
// Retrieves a source page by walking an ordered chain of strategies:
//
// 1. Relay  - the forwarding relay fetches the page for us
// 2. Direct - we request the page ourselves
// 3. Probe  - we only check that the host answers at all
//
// The first strategy that succeeds decides the outcome. A successful probe
// proves the page exists but gives us nothing to parse, which is what
// PageContent::RestrictedAccess stands for. When every strategy fails the
// fetcher returns None instead of an error, so callers have to handle it.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing::debug;

use super::relay::Relay;
use super::transport::Transport;

/// What a source page fetch produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// The page's raw text
    Html(String),
    /// The host answered, but we could not read the page
    RestrictedAccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Relay,
    Direct,
    Probe,
}

impl Strategy {
    fn name(self) -> &'static str {
        match self {
            Strategy::Relay => "relay",
            Strategy::Direct => "direct",
            Strategy::Probe => "probe",
        }
    }
}

/// Strategies in the order they are tried
pub const FETCH_CHAIN: [Strategy; 3] = [Strategy::Relay, Strategy::Direct, Strategy::Probe];

pub struct ProxiedFetcher<'a, T: ?Sized> {
    transport: &'a T,
    relay: &'a Relay,
}

impl<'a, T: Transport + ?Sized> ProxiedFetcher<'a, T> {
    pub fn new(transport: &'a T, relay: &'a Relay) -> Self {
        Self { transport, relay }
    }

    // Fetches a page, falling through the chain until a strategy succeeds
    //
    // Returns: Some(content) from the first successful strategy, or None
    // when none of them could reach the page
    pub async fn fetch(&self, url: &str) -> Option<PageContent> {
        for strategy in FETCH_CHAIN {
            match self.attempt(strategy, url).await {
                Ok(content) => {
                    debug!(url, strategy = strategy.name(), "fetched source page");
                    return Some(content);
                }
                Err(e) => {
                    debug!(url, strategy = strategy.name(), error = %e, "fetch strategy failed");
                }
            }
        }

        None
    }

    async fn attempt(&self, strategy: Strategy, url: &str) -> Result<PageContent> {
        match strategy {
            Strategy::Relay => {
                let body = self.relay.fetch_raw(self.transport, url).await?;
                Ok(PageContent::Html(body))
            }
            Strategy::Direct => {
                let reply = self.transport.get(url, Some("text/html")).await?;
                if !reply.is_success() {
                    return Err(anyhow!("HTTP {}", reply.status));
                }
                Ok(PageContent::Html(reply.body))
            }
            Strategy::Probe => {
                self.transport.probe(url).await?;
                Ok(PageContent::RestrictedAccess)
            }
        }
    }
}
