//! FILENAME: service/src/transport.rs
//! PURPOSE: The HTTP seam of the client.
//! CONTEXT: `Service` builds `Request`s and hands them to a `Transport`. The
//! real transport is a blocking reqwest client; tests substitute a recorder.
//! A transport reports what the server said: non-success statuses come back
//! as a `Response`, only failures to get an answer at all are errors.

use crate::config::ServiceConfig;
use crate::error::ServiceResult;
use datamodel::{log_debug, log_warn};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// A fully qualified request. `path` starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Form-encoded body arguments (POST only).
    pub form: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Request {
            method,
            path: path.into(),
            query: Vec::new(),
            form: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        lookup(&self.form, key)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

pub trait Transport {
    fn send(&self, request: &Request) -> ServiceResult<Response>;
}

// ============================================================================
// HTTP TRANSPORT
// ============================================================================

/// Blocking reqwest transport bound to one server.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> ServiceResult<Self> {
        if !config.verify_tls {
            log_warn!("HTTP", "TLS certificate verification disabled for {}", config.host);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls)
            .user_agent(concat!("analytics-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpTransport {
            client,
            base_url: config.base_url(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> ServiceResult<Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url).form(&request.form),
            Method::Delete => self.client.delete(&url),
        };
        builder = builder.query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        log_debug!("HTTP", "{:?} {} -> {}", request.method, request.path, status);
        if log::log_enabled!(target: "HTTP", log::Level::Trace) {
            log::trace!(target: "HTTP", "response body: {}", body);
        }

        Ok(Response { status, body })
    }
}
