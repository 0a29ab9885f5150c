// src/fetch/testing.rs
// Scripted in-memory transport for unit tests. Every request is recorded;
// anything not scripted behaves like an unreachable host.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use futures::future::BoxFuture;

use super::relay::Relay;
use super::transport::{HttpReply, Transport};
use crate::error::TransportError;

pub struct ScriptedTransport {
    relay: Relay,
    replies: HashMap<String, HttpReply>,
    reachable: HashSet<String>,
    invalid: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(relay: &Relay) -> Self {
        Self {
            relay: relay.clone(),
            replies: HashMap::new(),
            reachable: HashSet::new(),
            invalid: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn relay_raw(mut self, target: &str, status: u16, body: &str) -> Self {
        let url = self.relay.raw_url(target).unwrap().to_string();
        self.replies.insert(url, HttpReply::new(status, body));
        self
    }

    pub fn relay_status(self, target: &str, http_code: u16) -> Self {
        let body = format!(r#"{{"contents": null, "status": {{"http_code": {http_code}}}}}"#);
        self.relay_status_body(target, 200, &body)
    }

    pub fn relay_status_body(mut self, target: &str, status: u16, body: &str) -> Self {
        let url = self.relay.status_url(target).unwrap().to_string();
        self.replies.insert(url, HttpReply::new(status, body));
        self
    }

    pub fn direct(mut self, target: &str, status: u16, body: &str) -> Self {
        self.replies
            .insert(target.to_string(), HttpReply::new(status, body));
        self
    }

    /// The relay status request for `target` cannot be built
    pub fn relay_status_invalid(mut self, target: &str) -> Self {
        let url = self.relay.status_url(target).unwrap().to_string();
        self.invalid.insert(url);
        self
    }

    pub fn reachable(mut self, target: &str) -> Self {
        self.reachable.insert(target.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Transport for ScriptedTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        _accept: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpReply, TransportError>> {
        Box::pin(async move {
            if self.invalid.contains(url) {
                return Err(TransportError::InvalidRequest(url.to_string()));
            }
            self.record(format!("GET {url}"));
            self.replies
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::Unreachable(url.to_string()))
        })
    }

    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            self.record(format!("PROBE {url}"));
            if self.reachable.contains(url) {
                Ok(())
            } else {
                Err(TransportError::Unreachable(url.to_string()))
            }
        })
    }
}
