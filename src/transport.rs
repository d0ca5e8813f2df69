use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::TransportError;

/// One fully prepared GET attempt handed to a [`Transport`].
#[derive(Clone, Debug)]
pub struct TransportRequest {
    /// Absolute URL, scheme and host included.
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Final header set; duplicates were already resolved by the executor.
    pub headers: HeaderMap,
    pub timeout: Duration,
}

/// Response exactly as received: status, body bytes and headers.
///
/// Header lookups through [`HeaderMap`] are case-insensitive.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Issues a single GET and reports either a response or a transport failure.
///
/// A transport never retries; [`crate::ModsClient`] owns the retry loop.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// [`Transport`] backed by `reqwest` with rustls TLS.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing `reqwest` client, e.g. one with a proxy configured.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, request: TransportRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .http
            .get(&request.url)
            .headers(request.headers)
            .timeout(request.timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            body,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderMap;

    use super::RawResponse;

    #[test]
    fn success_covers_2xx_only() {
        let response = |status| RawResponse {
            status,
            body: Vec::new(),
            headers: HeaderMap::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(199).is_success());
        assert!(!response(301).is_success());
        assert!(!response(429).is_success());
    }

    #[test]
    fn text_is_lossy() {
        let response = RawResponse {
            status: 200,
            body: vec![b'o', b'k', 0xff],
            headers: HeaderMap::new(),
        };
        assert_eq!(response.text(), "ok\u{fffd}");
    }
}
