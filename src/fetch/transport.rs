// src/fetch/transport.rs
// =============================================================================
// The HTTP layer underneath the fetcher and the validator.
//
// Two kinds of request are needed:
// - get:   a full GET; any HTTP status counts as a reply
// - probe: an existence check; succeeds as soon as the host answers with
//          anything at all, without looking at status or body
//
// Keeping this behind a trait lets the rest of the pipeline run against a
// scripted transport in tests.
// =============================================================================

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::Config;
use crate::error::TransportError;

/// A response that made it back over the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport: Send + Sync {
    /// GET `url`, optionally with an Accept header
    fn get<'a>(
        &'a self,
        url: &'a str,
        accept: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpReply, TransportError>>;

    /// Ok if the host answered at all
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), TransportError>>;
}

/// reqwest-backed transport, one client shared by every request of a run
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(5))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        accept: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpReply, TransportError>> {
        Box::pin(async move {
            let mut request = self.client.get(url);
            if let Some(accept) = accept {
                request = request.header(ACCEPT, accept);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;

            Ok(HttpReply::new(status, body))
        })
    }

    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            // HEAD keeps the probe light; the response itself is discarded
            self.client.head(url).send().await?;
            Ok(())
        })
    }
}
