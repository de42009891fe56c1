//! Default blocking transport on top of `ureq`.

use std::fmt::{self, Display};
use std::time::Duration;

use serde_json::Value;
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::error::TransportError;
use crate::http::Transport;

/// Blocking transport backed by a pooled `ureq::Agent`. Dropping it closes
/// the pool.
///
/// HTTP error statuses are returned as data: the provider reports failures
/// in a JSON body, which the mappers turn into `MappingError::Rejected`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// `timeout` bounds each whole request; `None` waits indefinitely.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, TransportError> {
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = request.call().map_err(|e| failed(url, e))?;
        read_json(url, response)
    }

    fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, TransportError> {
        let mut request = self.agent.post(url);
        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }
        let payload = body.to_string();
        let response = request.send(payload.as_bytes()).map_err(|e| failed(url, e))?;
        read_json(url, response)
    }
}

fn failed(url: &str, err: impl Display) -> TransportError {
    TransportError::Request {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn read_json(url: &str, mut response: Response<Body>) -> Result<Value, TransportError> {
    let status = response.status().as_u16();
    let text = response.body_mut().read_to_string().map_err(|e| failed(url, e))?;
    serde_json::from_str(&text).map_err(|source| TransportError::Body {
        url: url.to_string(),
        status,
        source,
    })
}
