//! FILENAME: service/src/config.rs
//! PURPOSE: Connection settings for a `Service`.
//! CONTEXT: Settings come from code (`with_*` setters) or from a JSON
//! document; every member has a default, so `{}` is a valid configuration
//! pointing at a local server.

use crate::error::ServiceResult;
use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8089
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

/// Where the server lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// `https` or `http`.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// User namespace for `servicesNS` paths. `None` means any user (`-`).
    #[serde(default)]
    pub owner: Option<String>,

    /// App namespace for `servicesNS` paths. `None` means any app (`-`).
    #[serde(default)]
    pub app: Option<String>,

    /// Pre-issued authorization token, sent as-is.
    #[serde(default)]
    pub token: Option<String>,

    /// Set to false for servers with self-signed certificates.
    #[serde(default = "default_true")]
    pub verify_tls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            host: default_host(),
            port: default_port(),
            scheme: default_scheme(),
            owner: None,
            app: None,
            token: None,
            verify_tls: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> ServiceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Scopes requests to a user and app namespace.
    pub fn with_namespace(mut self, owner: Option<&str>, app: Option<&str>) -> Self {
        self.owner = owner.map(str::to_string);
        self.app = app.map(str::to_string);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// `scheme://host:port`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Whether requests go through `servicesNS` rather than `services`.
    pub fn has_namespace(&self) -> bool {
        self.owner.is_some() || self.app.is_some()
    }
}
