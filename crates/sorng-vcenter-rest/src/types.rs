//! Shared types for the vCenter REST client.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Connection / Config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Path under which the vCenter REST endpoints live.
pub const API_ROOT: &str = "/rest";

/// Top-level configuration for connecting to a vCenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VsphereConfig {
    /// vCenter hostname / IP (e.g. "vcenter.lab.local"). A value that
    /// already carries a scheme ("http://127.0.0.1:8080") is used as-is.
    pub host: String,
    /// Optional explicit port
    #[serde(default)]
    pub port: Option<u16>,
    /// Username (e.g. "administrator@vsphere.local")
    pub username: String,
    /// Password
    pub password: String,
    /// Verify the vCenter TLS certificate and host name
    #[serde(default)]
    pub secure: bool,
    /// Proxy URL (jump server). Empty means a direct connection.
    #[serde(default)]
    pub proxy: String,
    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_connect_timeout() -> u64 { 120 }
fn default_timeout() -> u64 { 60 }

impl Default for VsphereConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            secure: false,
            proxy: String::new(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

impl VsphereConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = proxy.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

/// Encoded `username:password` pair used for HTTP Basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn from_login(username: &str, password: &str) -> Self {
        Self(STANDARD.encode(format!("{username}:{password}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Immutable connection settings derived from [`VsphereConfig`].
///
/// The password is only kept in encoded form inside the [`Credential`].
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    base_url: String,
    credential: Credential,
    secure: bool,
    proxy: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl ConnectionConfig {
    pub fn from_config(config: &VsphereConfig) -> Self {
        Self {
            base_url: base_url(&config.host, config.port),
            credential: Credential::from_login(&config.username, &config.password),
            secure: config.secure,
            proxy: config.proxy.trim().to_string(),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// `https://{host}[:port]/rest`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn base_url(host: &str, port: Option<u16>) -> String {
    let host = host.trim().trim_end_matches('/');
    let mut url = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    if let Some(port) = port {
        url.push_str(&format!(":{port}"));
    }
    url.push_str(API_ROOT);
    url
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Request descriptor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// HTTP verbs accepted by the vCenter REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter mapping: query string for GET, JSON body otherwise.
pub type Params = Map<String, Value>;

/// One call against the API, before headers and encoding are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub verb: Verb,
    /// Path below the API root, starting with `/`.
    pub path: String,
    pub params: Params,
}

impl ApiRequest {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            params: Params::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}
