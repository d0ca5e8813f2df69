//! `nexusmods-http` is an async HTTP client for the Nexus Mods public API.
//!
//! Every call goes through one rate-limit aware request path,
//! [`ModsClient::get`], which injects credentials, honours `Retry-After` and
//! `X-RateLimit-*` headers, and retries transport failures with exponential
//! backoff. [`ModsClient::get_json`] decodes the body, and the endpoint
//! helpers such as [`ModsClient::get_mod`] build the paths.

mod backoff;
mod client;
mod config;
mod decode;
mod endpoints;
mod error;
mod query;
mod transport;

pub use backoff::BackoffObserver;
pub use client::ModsClient;
pub use config::ClientConfig;
pub use error::{ModsError, TransportError};
pub use query::{Query, UpdatePeriod};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportRequest};

pub type Result<T> = std::result::Result<T, ModsError>;
