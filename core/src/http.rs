//! HTTP request plans and the transport seam.
//!
//! # Design
//! `JowiClient` describes every call as an `HttpRequest` value before
//! anything touches the network, so a host with its own HTTP stack can take
//! the plan, run it, and feed the JSON it gets back to [`crate::mapper`].
//! The bundled path hands the plan to a [`Transport`]; the crate ships
//! [`crate::UreqTransport`] as the default one.

use serde_json::Value;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// GET requests carry the credentials in `query`; POST requests carry them
/// inside the JSON `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Run this request through `transport`.
    pub fn send<T: Transport + ?Sized>(&self, transport: &T) -> Result<Value, TransportError> {
        match self.method {
            HttpMethod::Get => transport.get(&self.url, &self.query),
            HttpMethod::Post => {
                let null = Value::Null;
                transport.post(&self.url, self.body.as_ref().unwrap_or(&null), &self.headers)
            }
        }
    }
}

/// The network collaborator. Implementations decode the response body as
/// JSON regardless of HTTP status; interpreting the payload is the mappers'
/// job.
pub trait Transport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, TransportError>;

    fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, TransportError> {
        (**self).get(url, query)
    }

    fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, TransportError> {
        (**self).post(url, body, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(&'static str, String, Value)>>,
    }

    impl Transport for Recorder {
        fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, TransportError> {
            let query: serde_json::Map<_, _> = query
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            self.calls.borrow_mut().push(("GET", url.to_string(), Value::Object(query)));
            Ok(json!({"ok": true}))
        }

        fn post(
            &self,
            url: &str,
            body: &Value,
            _headers: &[(String, String)],
        ) -> Result<Value, TransportError> {
            self.calls.borrow_mut().push(("POST", url.to_string(), body.clone()));
            Ok(json!({"ok": true}))
        }
    }

    #[test]
    fn get_dispatches_query() {
        let recorder = Recorder::default();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/v010/halls".to_string(),
            query: vec![("restaurant_id".to_string(), "r-1".to_string())],
            headers: Vec::new(),
            body: None,
        };
        assert_eq!(request.send(&recorder).unwrap(), json!({"ok": true}));
        let calls = recorder.calls.borrow();
        assert_eq!(calls[0].0, "GET");
        assert_eq!(calls[0].2, json!({"restaurant_id": "r-1"}));
    }

    #[test]
    fn post_dispatches_body() {
        let recorder = Recorder::default();
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: "http://localhost/v3/orders".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Some(json!({"order": {}})),
        };
        request.send(&&recorder).unwrap();
        let calls = recorder.calls.borrow();
        assert_eq!(calls[0].0, "POST");
        assert_eq!(calls[0].2, json!({"order": {}}));
    }
}
