use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value as JsonValue;
use tokio::time::sleep;

use crate::{
    backoff::{exponential_delay, header_seconds, quota_exhausted, RATE_LIMIT_RESET, RETRY_AFTER},
    decode::decode_json_response,
    BackoffObserver, ClientConfig, ModsError, Query, RawResponse, ReqwestTransport, Result,
    Transport, TransportRequest,
};

const TOO_MANY_REQUESTS: u16 = 429;

struct Settings {
    config: ClientConfig,
    observer: Option<Arc<dyn BackoffObserver>>,
}

/// HTTP client for the Nexus Mods API.
///
/// Settings live behind a mutex shared by all clones of the client. Each
/// attempt copies them out under the lock and releases it before any I/O,
/// so concurrent requests never serialize on the network.
pub struct ModsClient<T = ReqwestTransport> {
    transport: Arc<T>,
    settings: Arc<Mutex<Settings>>,
}

impl<T> Clone for ModsClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<T> fmt::Debug for ModsClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = lock(&self.settings);
        f.debug_struct("ModsClient")
            .field("config", &settings.config)
            .field("backoff_observer", &settings.observer.is_some())
            .finish()
    }
}

impl ModsClient<ReqwestTransport> {
    /// Creates a client for the production API with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Creates a client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `NEXUSMODS_API_KEY` — personal API key (required)
    /// - `NEXUSMODS_USER_AGENT` — optional user agent override
    /// - `NEXUSMODS_HOST` — optional API host override
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nexusmods_http::ModsClient;
    ///
    /// let client = ModsClient::from_env().expect("missing NEXUSMODS_API_KEY");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        let api_key = std::env::var("NEXUSMODS_API_KEY")
            .map_err(|_| "missing NEXUSMODS_API_KEY environment variable".to_owned())?;
        if api_key.trim().is_empty() {
            return Err("NEXUSMODS_API_KEY is set but empty".to_owned());
        }

        let mut config = ClientConfig::new(api_key.trim());
        if let Some(user_agent) = non_empty_var("NEXUSMODS_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(host) = non_empty_var("NEXUSMODS_HOST") {
            config.host = host;
        }
        Ok(Self::with_config(config))
    }
}

impl<T: Transport> ModsClient<T> {
    /// Creates a client that sends requests through a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            settings: Arc::new(Mutex::new(Settings {
                config,
                observer: None,
            })),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a snapshot of the current configuration.
    pub fn config(&self) -> ClientConfig {
        lock(&self.settings).config.clone()
    }

    /// Replaces the whole configuration. In-flight requests pick it up on
    /// their next attempt.
    pub fn set_config(&self, config: ClientConfig) {
        lock(&self.settings).config = config;
    }

    /// Sets the header that carries the API key (default `apikey`).
    pub fn set_api_header_name(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| ModsError::Config(format!("invalid header name `{name}`: {err}")))?;
        lock(&self.settings).config.auth_header_name = name;
        Ok(())
    }

    /// Sets the per-attempt timeout.
    pub fn set_timeout_seconds(&self, seconds: u64) {
        lock(&self.settings).config.timeout_seconds = seconds;
    }

    pub fn set_user_agent(&self, user_agent: impl Into<String>) {
        lock(&self.settings).config.user_agent = user_agent.into();
    }

    /// Registers an observer told about every backoff sleep.
    pub fn set_backoff_observer(&self, observer: impl BackoffObserver + 'static) {
        lock(&self.settings).observer = Some(Arc::new(observer));
    }

    pub fn clear_backoff_observer(&self) {
        lock(&self.settings).observer = None;
    }

    /// Issues a GET through the rate-limit aware retry loop.
    ///
    /// Any status other than 429 is returned as-is, including 4xx and 5xx.
    /// Transport failures, 429 responses and responses reporting
    /// `X-RateLimit-Remaining: 0` are retried after a backoff sleep, up to
    /// `max_attempts` attempts in total; after that the call fails with
    /// [`ModsError::RetryExhausted`].
    ///
    /// The authentication header, `User-Agent` and `Accept` always override
    /// same-named entries in `extra_headers`.
    pub async fn get<Q: Into<Query>>(
        &self,
        path: &str,
        query: Q,
        extra_headers: &HeaderMap,
    ) -> Result<RawResponse> {
        let query: Query = query.into();
        self.execute(path, query.into(), extra_headers).await
    }

    /// Like [`ModsClient::get`], then decodes a 2xx body as JSON.
    ///
    /// Non-2xx statuses surface as [`ModsError::Http`] and unparseable
    /// bodies as [`ModsError::Decode`].
    pub async fn get_json<Q: Into<Query>>(
        &self,
        path: &str,
        query: Q,
        extra_headers: &HeaderMap,
    ) -> Result<JsonValue> {
        let response = self.get(path, query, extra_headers).await?;
        decode_json_response(path, response)
    }

    async fn execute(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        extra_headers: &HeaderMap,
    ) -> Result<RawResponse> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let (config, observer) = self.snapshot();
            let request = TransportRequest {
                url: format!("{}{path}", config.base_url()),
                query: query.clone(),
                headers: build_headers(&config, extra_headers, path)?,
                timeout: Duration::from_secs(config.timeout_seconds),
            };
            // Transport failures cap the exponent; server throttling does not.
            let capped = || {
                exponential_delay(
                    config.base_backoff_seconds,
                    attempt,
                    config.max_backoff_exponent,
                )
            };
            let uncapped = || exponential_delay(config.base_backoff_seconds, attempt, u32::MAX);

            let delay = match self.transport.get(request).await {
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(path, attempt, error = %_err, "transport failure");
                    capped()
                }
                Ok(response) if response.status == TOO_MANY_REQUESTS => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(path, attempt, "rate limited (429)");
                    header_seconds(&response.headers, RETRY_AFTER).unwrap_or_else(uncapped)
                }
                Ok(response) if quota_exhausted(&response.headers) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(path, attempt, "rate limit quota exhausted");
                    header_seconds(&response.headers, RATE_LIMIT_RESET).unwrap_or_else(uncapped)
                }
                Ok(response) => return Ok(response),
            };

            #[cfg(feature = "tracing")]
            tracing::debug!("backing off {} for {} s", path, delay);

            if let Some(observer) = observer {
                observer.on_backoff(delay);
            }
            sleep(Duration::from_secs(delay)).await;

            if attempt >= config.max_attempts {
                #[cfg(feature = "tracing")]
                tracing::warn!(path, attempt, "giving up after exhausting retries");
                return Err(ModsError::RetryExhausted {
                    endpoint: path.to_owned(),
                    attempts: attempt,
                });
            }
        }
    }

    fn snapshot(&self) -> (ClientConfig, Option<Arc<dyn BackoffObserver>>) {
        let settings = lock(&self.settings);
        (settings.config.clone(), settings.observer.clone())
    }
}

fn lock(settings: &Mutex<Settings>) -> MutexGuard<'_, Settings> {
    // Settings are plain data, still consistent after a poisoning panic.
    settings.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Caller headers first, then the injected ones so they win on conflict.
fn build_headers(config: &ClientConfig, extra: &HeaderMap, endpoint: &str) -> Result<HeaderMap> {
    let invalid = |name: &str, reason: String| ModsError::InvalidHeader {
        endpoint: endpoint.to_owned(),
        name: name.to_owned(),
        reason,
    };

    let auth_name = HeaderName::from_bytes(config.auth_header_name.as_bytes())
        .map_err(|err| invalid(&config.auth_header_name, err.to_string()))?;
    let mut api_key = HeaderValue::from_str(&config.api_key)
        .map_err(|err| invalid(&config.auth_header_name, err.to_string()))?;
    api_key.set_sensitive(true);
    let user_agent = HeaderValue::from_str(&config.user_agent)
        .map_err(|err| invalid(header::USER_AGENT.as_str(), err.to_string()))?;

    let mut headers = extra.clone();
    headers.insert(auth_name, api_key);
    headers.insert(header::USER_AGENT, user_agent);
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
