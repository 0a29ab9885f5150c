// src/checker/validate.rs
// =============================================================================
// This module decides the status of every resource found on a source page.
//
// Per resource:
// 1. Resolve the reference against the page URL. A reference that does not
//    parse is Broken, and no request is made for it.
// 2. Ask the relay for the target's HTTP status:
//    - 200..=399              -> Valid
//    - any other status       -> Broken
//    - envelope with no code  -> Broken ("unknown")
// 3. If the relay call itself fails, probe the target directly:
//    - host answered          -> LikelyValid
//    - host unreachable       -> Broken
// 4. Anything else going wrong for this one resource -> Broken, and we move
//    on to the next resource.
//
// Resources are checked one after another with a fixed pause in between.
// There is no concurrency here on purpose: the relay and the target hosts
// see at most one request at a time from us.
// =============================================================================

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use super::resolve::resolve_reference;
use super::types::{Extraction, Resource, ResultKind, ValidationResult, ValidationStatus};
use crate::error::RelayError;
use crate::fetch::{Relay, Transport};

pub const REASON_RESTRICTED: &str = "CORS restricted - cannot access content";
pub const REASON_EMPTY: &str = "No links or images found";
pub const REASON_INVALID_URL: &str = "Invalid URL format";
pub const REASON_PROBE_ONLY: &str = "CORS restrictions prevent full validation";
pub const REASON_UNREACHABLE: &str = "Network error or resource unavailable";
pub const REASON_INTERNAL: &str = "Error processing resource";

pub struct ResourceValidator<'a, T: ?Sized> {
    transport: &'a T,
    relay: &'a Relay,
    pacing: Duration,
}

impl<'a, T: Transport + ?Sized> ResourceValidator<'a, T> {
    pub fn new(transport: &'a T, relay: &'a Relay, pacing: Duration) -> Self {
        Self {
            transport,
            relay,
            pacing,
        }
    }

    // Validates everything extracted from one source page
    //
    // Parameters:
    //   source_url: the page as the caller typed it (copied into every record)
    //   source_page: the same page, parsed (base for relative references)
    //   extraction: what the extractor found on the page
    //
    // Returns: one record per resource, or a single record describing the
    // page when it was restricted or had nothing in it
    pub async fn validate(
        &self,
        source_url: &str,
        source_page: &Url,
        extraction: Extraction,
    ) -> Vec<ValidationResult> {
        let resources = match extraction {
            Extraction::Restricted => {
                return vec![page_record(
                    source_url,
                    ValidationStatus::Unknown,
                    REASON_RESTRICTED,
                )];
            }
            Extraction::Resources(resources) if resources.is_empty() => {
                return vec![page_record(source_url, ValidationStatus::Empty, REASON_EMPTY)];
            }
            Extraction::Resources(resources) => resources,
        };

        let mut results = Vec::with_capacity(resources.len());

        for (index, resource) in resources.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            let result = match self.validate_resource(source_url, source_page, resource).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(source_url, reference = %resource.raw_reference, error = %e, "failed to process resource");
                    resource_record(
                        source_url,
                        &resource.raw_reference,
                        resource,
                        ValidationStatus::Broken,
                        REASON_INTERNAL.to_string(),
                    )
                }
            };

            debug!(source_url, url = %result.url, status = %result.status, "validated resource");
            results.push(result);
        }

        results
    }

    async fn validate_resource(
        &self,
        source_url: &str,
        source_page: &Url,
        resource: &Resource,
    ) -> Result<ValidationResult, RelayError> {
        let target = match resolve_reference(&resource.raw_reference, source_page) {
            Ok(target) => target,
            Err(e) => {
                debug!(reference = %resource.raw_reference, error = %e, "reference does not resolve");
                return Ok(resource_record(
                    source_url,
                    &resource.raw_reference,
                    resource,
                    ValidationStatus::Broken,
                    REASON_INVALID_URL.to_string(),
                ));
            }
        };

        let (status, reason) = match self.relay.fetch_status(self.transport, target.as_str()).await {
            Ok(Some(code)) if (200..400).contains(&code) => {
                (ValidationStatus::Valid, format!("HTTP status: {code}"))
            }
            Ok(Some(code)) => (ValidationStatus::Broken, format!("HTTP status: {code}")),
            Ok(None) => (ValidationStatus::Broken, "HTTP status: unknown".to_string()),
            // A relay request we cannot even make is not a network problem
            Err(e) if e.is_internal() => return Err(e),
            Err(e) => {
                debug!(url = %target, error = %e, "relay status check failed, probing directly");
                self.probe(&target).await
            }
        };

        Ok(resource_record(source_url, target.as_str(), resource, status, reason))
    }

    async fn probe(&self, target: &Url) -> (ValidationStatus, String) {
        match self.transport.probe(target.as_str()).await {
            Ok(()) => (ValidationStatus::LikelyValid, REASON_PROBE_ONLY.to_string()),
            Err(e) => {
                debug!(url = %target, error = %e, "probe failed");
                (ValidationStatus::Broken, REASON_UNREACHABLE.to_string())
            }
        }
    }
}

fn page_record(source_url: &str, status: ValidationStatus, reason: &str) -> ValidationResult {
    ValidationResult::new(
        source_url,
        source_url,
        ResultKind::Url,
        status,
        Some(reason.to_string()),
    )
}

fn resource_record(
    source_url: &str,
    url: &str,
    resource: &Resource,
    status: ValidationStatus,
    reason: String,
) -> ValidationResult {
    ValidationResult::new(source_url, url, resource.kind.into(), status, Some(reason))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::fetch::testing::ScriptedTransport;

    const SOURCE: &str = "https://example.com/a";

    fn relay() -> Relay {
        Relay::new("https://relay.test").unwrap()
    }

    fn page() -> Url {
        Url::parse(SOURCE).unwrap()
    }

    async fn run(transport: &ScriptedTransport, resources: Vec<Resource>) -> Vec<ValidationResult> {
        let relay = relay();
        ResourceValidator::new(transport, &relay, Duration::ZERO)
            .validate(SOURCE, &page(), Extraction::Resources(resources))
            .await
    }

    #[tokio::test]
    async fn test_restricted_page_yields_single_unknown() {
        let relay = relay();
        let transport = ScriptedTransport::new(&relay);
        let results = ResourceValidator::new(&transport, &relay, Duration::ZERO)
            .validate(SOURCE, &page(), Extraction::Restricted)
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ValidationStatus::Unknown);
        assert_eq!(results[0].url, SOURCE);
        assert_eq!(results[0].kind, ResultKind::Url);
        assert_eq!(results[0].reason_text(), REASON_RESTRICTED);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_page_yields_single_empty() {
        let transport = ScriptedTransport::new(&relay());
        let results = run(&transport, vec![]).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ValidationStatus::Empty);
        assert_eq!(results[0].reason_text(), REASON_EMPTY);
    }

    #[tokio::test]
    async fn test_authoritative_statuses() {
        let transport = ScriptedTransport::new(&relay())
            .relay_status("https://example.com/b", 404)
            .relay_status("https://cdn.example.com/x.png", 200)
            .relay_status("https://example.com/moved", 301);

        let results = run(
            &transport,
            vec![
                Resource::link("/b"),
                Resource::link("/moved"),
                Resource::image("https://cdn.example.com/x.png"),
            ],
        )
        .await;

        assert_eq!(results.len(), 3);

        assert_eq!(results[0].url, "https://example.com/b");
        assert_eq!(results[0].kind, ResultKind::Link);
        assert_eq!(results[0].status, ValidationStatus::Broken);
        assert!(results[0].reason_text().contains("404"));

        assert_eq!(results[1].status, ValidationStatus::Valid);

        assert_eq!(results[2].kind, ResultKind::Image);
        assert_eq!(results[2].status, ValidationStatus::Valid);
    }

    #[tokio::test]
    async fn test_envelope_without_status_is_broken() {
        let transport = ScriptedTransport::new(&relay())
            .relay_status_body("https://example.com/b", 200, r#"{"contents": ""}"#);

        let results = run(&transport, vec![Resource::link("/b")]).await;

        assert_eq!(results[0].status, ValidationStatus::Broken);
        assert!(results[0].reason_text().contains("unknown"));
    }

    #[tokio::test]
    async fn test_relay_failure_falls_back_to_probe() {
        let transport = ScriptedTransport::new(&relay()).reachable("https://example.com/b");

        let results = run(&transport, vec![Resource::link("/b"), Resource::link("/gone")]).await;

        assert_eq!(results[0].status, ValidationStatus::LikelyValid);
        assert_eq!(results[0].reason_text(), REASON_PROBE_ONLY);
        assert_eq!(results[1].status, ValidationStatus::Broken);
        assert_eq!(results[1].reason_text(), REASON_UNREACHABLE);
    }

    #[tokio::test]
    async fn test_relay_error_status_falls_back_to_probe() {
        let transport = ScriptedTransport::new(&relay())
            .relay_status_body("https://example.com/b", 503, "unavailable")
            .reachable("https://example.com/b");

        let results = run(&transport, vec![Resource::link("/b")]).await;

        assert_eq!(results[0].status, ValidationStatus::LikelyValid);
    }

    #[tokio::test]
    async fn test_invalid_reference_makes_no_request() {
        let transport = ScriptedTransport::new(&relay());

        let results = run(&transport, vec![Resource::link("http://[")]).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ValidationStatus::Broken);
        assert_eq!(results[0].reason_text(), REASON_INVALID_URL);
        assert_eq!(results[0].url, "http://[");
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_one_bad_resource_does_not_stop_the_rest() {
        let transport = ScriptedTransport::new(&relay()).relay_status("https://example.com/ok", 200);

        let results = run(
            &transport,
            vec![Resource::link("http://["), Resource::link("/ok")],
        )
        .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].status, ValidationStatus::Valid);
    }

    #[tokio::test]
    async fn test_internal_error_is_isolated_to_its_resource() {
        let transport = ScriptedTransport::new(&relay())
            .relay_status("https://example.com/first", 200)
            .relay_status_invalid("https://example.com/middle")
            .reachable("https://example.com/middle")
            .relay_status("https://example.com/last", 404);

        let results = run(
            &transport,
            vec![
                Resource::link("/first"),
                Resource::link("/middle"),
                Resource::image("/last"),
            ],
        )
        .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, ValidationStatus::Valid);

        assert_eq!(results[1].status, ValidationStatus::Broken);
        assert_eq!(results[1].reason_text(), REASON_INTERNAL);
        assert_eq!(results[1].kind, ResultKind::Link);

        assert_eq!(results[2].status, ValidationStatus::Broken);
        assert!(results[2].reason_text().contains("404"));

        // no fallback request for the resource that failed internally
        assert!(!transport
            .calls()
            .iter()
            .any(|call| call.ends_with(" https://example.com/middle")));
    }

    #[tokio::test]
    async fn test_pause_between_resources() {
        let relay = relay();
        let transport = ScriptedTransport::new(&relay);
        let pacing = Duration::from_millis(30);
        let resources = vec![
            Resource::link("http://["),
            Resource::link("http://["),
            Resource::link("http://["),
        ];

        let started = Instant::now();
        let results = ResourceValidator::new(&transport, &relay, pacing)
            .validate(SOURCE, &page(), Extraction::Resources(resources))
            .await;

        assert_eq!(results.len(), 3);
        assert!(started.elapsed() >= pacing * 2);
    }
}
