// src/fetch/mod.rs
// =============================================================================
// This module retrieves content over the network.
//
// Submodules:
// - transport: the HTTP seam (trait + reqwest implementation)
// - relay: URLs and response envelope of the forwarding relay
// - proxied: the relay -> direct -> probe fallback chain for source pages
// =============================================================================

mod proxied;
mod relay;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use proxied::{PageContent, ProxiedFetcher};
pub use relay::{Relay, DEFAULT_RELAY_URL};
pub use transport::{HttpTransport, Transport};
