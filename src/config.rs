use std::fmt;

use serde::{Deserialize, Serialize};

/// Production API host.
pub const DEFAULT_HOST: &str = "api.nexusmods.com";

/// Connection, authentication and retry settings shared by every request.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Personal API key sent in the authentication header.
    pub api_key: String,
    pub host: String,
    pub port: u16,
    /// Connect over TLS. Only local test servers turn this off.
    pub tls: bool,
    pub user_agent: String,
    /// Name of the header carrying the API key.
    pub auth_header_name: String,
    /// Per-attempt timeout in seconds.
    pub timeout_seconds: u64,
    /// Upper bound on attempts for one logical request.
    pub max_attempts: u32,
    /// Base delay for computed (non server-directed) backoff.
    pub base_backoff_seconds: u64,
    /// Cap on the exponent of computed backoff.
    pub max_backoff_exponent: u32,
}

impl ClientConfig {
    /// Builds the default configuration around an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Scheme, host and (non-default) port, without a trailing slash.
    ///
    /// Example: `"https://api.nexusmods.com"`
    pub fn base_url(&self) -> String {
        let (scheme, default_port) = if self.tls { ("https", 443) } else { ("http", 80) };
        if self.port == default_port {
            format!("{scheme}://{}", self.host)
        } else {
            format!("{scheme}://{}:{}", self.host, self.port)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            host: DEFAULT_HOST.to_owned(),
            port: 443,
            tls: true,
            user_agent: format!("nexusmods-http/{}", env!("CARGO_PKG_VERSION")),
            auth_header_name: "apikey".to_owned(),
            timeout_seconds: 30,
            max_attempts: 6,
            base_backoff_seconds: 1,
            max_backoff_exponent: 6,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("user_agent", &self.user_agent)
            .field("auth_header_name", &self.auth_header_name)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_attempts", &self.max_attempts)
            .field("base_backoff_seconds", &self.base_backoff_seconds)
            .field("max_backoff_exponent", &self.max_backoff_exponent)
            .finish()
    }
}
