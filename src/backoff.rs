use reqwest::header::HeaderMap;

pub(crate) const RETRY_AFTER: &str = "retry-after";
pub(crate) const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub(crate) const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Receives the length of every backoff sleep, in seconds.
///
/// Purely observational: the retry loop behaves the same with or without one.
/// Any `Fn(u64) + Send + Sync` closure is an observer.
pub trait BackoffObserver: Send + Sync {
    fn on_backoff(&self, seconds: u64);
}

impl<F> BackoffObserver for F
where
    F: Fn(u64) + Send + Sync,
{
    fn on_backoff(&self, seconds: u64) {
        self(seconds)
    }
}

/// Computed delay for attempt `attempt` (1-based): `base * 2^min(attempt, cap)`.
pub(crate) fn exponential_delay(base_seconds: u64, attempt: u32, max_exponent: u32) -> u64 {
    let exp = attempt.min(max_exponent).min(63);
    base_seconds.saturating_mul(1u64 << exp)
}

/// Reads a whole-seconds header value, if present and well formed.
pub(crate) fn header_seconds(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Whether the server reports an exhausted request quota.
pub(crate) fn quota_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .is_some_and(|value| value.as_bytes() == b"0")
}
