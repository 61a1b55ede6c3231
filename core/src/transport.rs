//! The single place where the client performs network I/O.
//!
//! # Design
//! `Transport` turns an `HttpRequest` into an `HttpResponse`. Non-2xx
//! statuses are data, not errors: only failures to obtain a response at all
//! (refused connection, DNS, timeout) come back as `Err`. The default
//! implementation wraps a blocking `ureq::Agent` with a global timeout so a
//! silent server can never hang the caller.

use std::time::Duration;

use ureq::Agent;

use crate::error::SearchError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, SearchError>;
}

/// Blocking transport backed by ureq.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Build an agent whose whole round-trip (connect, send, read body) is
    /// bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, SearchError> {
        let mut builder = self
            .agent
            .get(&request.path)
            .query_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let classify = |err: ureq::Error| match err {
            ureq::Error::Timeout(_) => {
                tracing::warn!(query = %request.query_string(), "search request timed out");
                SearchError::Timeout(request.query_string())
            }
            other => {
                tracing::warn!(error = %other, "search request failed in transport");
                SearchError::Transport(other.to_string())
            }
        };

        let mut response = builder.call().map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}
