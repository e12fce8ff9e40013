//! FILENAME: service/src/service.rs
//! PURPOSE: Session handling, path qualification and the JSON request helpers.
//! CONTEXT: Every endpoint of the server lives either under `/services/`
//! (global) or `/servicesNS/<owner>/<app>/` (namespaced). Callers pass paths
//! relative to that root, e.g. `search/jobs`, and `fullpath` decides which
//! root applies. All responses are requested as JSON.

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::transport::{HttpTransport, Method, Request, Transport};
use datamodel::{log_debug, log_info, log_warn};
use serde_json::Value;
use std::fmt;

/// Path of the login endpoint, always global.
const LOGIN_PATH: &str = "/services/auth/login";

/// Placeholder for "any user" / "any app" in namespaced paths.
const WILDCARD: &str = "-";

/// A connection to one server.
pub struct Service<T: Transport = HttpTransport> {
    config: ServiceConfig,
    transport: T,
    token: Option<String>,
}

// The session key is never printed.
impl<T: Transport> fmt::Debug for Service<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("base_url", &self.config.base_url())
            .field("owner", &self.config.owner)
            .field("app", &self.config.app)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl Service<HttpTransport> {
    /// Creates a client over HTTP. No request is made until the first call.
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Service<T> {
    pub fn with_transport(config: ServiceConfig, transport: T) -> Self {
        let token = config.token.clone();
        Service {
            config,
            transport,
            token,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The authorization token sent with every request, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    // ========================================================================
    // SESSION
    // ========================================================================

    /// Exchanges credentials for a session key.
    pub fn login(&mut self, username: &str, password: &str) -> ServiceResult<&mut Self> {
        log_info!("HTTP", "login user={} host={}", username, self.config.host);

        let mut request = Request::new(Method::Post, LOGIN_PATH);
        request.query.push(("output_mode".to_string(), "json".to_string()));
        request.form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];

        let response = self.transport.send(&request)?;
        if !response.is_success() {
            let message = error_message(&response.body, response.status);
            log_warn!("HTTP", "login failed status={} message={}", response.status, message);
            return Err(ServiceError::Authentication(message));
        }

        let body: Value = serde_json::from_str(&response.body)?;
        let session_key = body
            .get("sessionKey")
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::Authentication("response has no sessionKey".to_string()))?;

        self.token = Some(format!("Splunk {}", session_key));
        Ok(self)
    }

    /// Forgets the session token.
    pub fn logout(&mut self) -> &mut Self {
        self.token = None;
        self
    }

    // ========================================================================
    // PATHS
    // ========================================================================

    /// Qualifies a relative endpoint path with the service root.
    pub fn fullpath(&self, path: &str) -> String {
        if path.starts_with('/') {
            return path.to_string();
        }
        if !self.config.has_namespace() {
            return format!("/services/{}", path);
        }
        format!(
            "/servicesNS/{}/{}/{}",
            self.config.owner.as_deref().unwrap_or(WILDCARD),
            self.config.app.as_deref().unwrap_or(WILDCARD),
            path
        )
    }

    // ========================================================================
    // REQUESTS
    // ========================================================================

    pub fn get(&self, path: &str, query: &[(String, String)]) -> ServiceResult<Value> {
        self.send(Method::Get, path, query.to_vec(), Vec::new())
    }

    pub fn post(&self, path: &str, form: &[(String, String)]) -> ServiceResult<Value> {
        self.send(Method::Post, path, Vec::new(), form.to_vec())
    }

    pub fn delete(&self, path: &str) -> ServiceResult<Value> {
        self.send(Method::Delete, path, Vec::new(), Vec::new())
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        mut query: Vec<(String, String)>,
        form: Vec<(String, String)>,
    ) -> ServiceResult<Value> {
        query.push(("output_mode".to_string(), "json".to_string()));

        let mut request = Request::new(method, self.fullpath(path));
        request.query = query;
        request.form = form;
        if let Some(token) = &self.token {
            request
                .headers
                .push(("Authorization".to_string(), token.clone()));
        }

        let response = self.transport.send(&request)?;
        if response.status >= 400 {
            let message = error_message(&response.body, response.status);
            log_debug!("HTTP", "{:?} {} failed: {}", method, request.path, message);
            return Err(ServiceError::Http {
                status: response.status,
                message,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Joins the `messages[].text` of an error body, falling back to the raw body.
pub(crate) fn error_message(body: &str, status: u16) -> String {
    let texts: Vec<String> = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("messages").and_then(Value::as_array).cloned())
        .unwrap_or_default()
        .iter()
        .filter_map(|message| message.get("text").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    if !texts.is_empty() {
        return texts.join("; ");
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}
