use std::time::Duration;

/// Configuration for the LangFlow client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Application token sent as a bearer credential on every request.
    pub application_token: String,

    /// Base URL of the LangFlow deployment.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Fixed delay inserted before the first request of a call, to throttle
    /// bursty callers. Not a backoff: it does not grow across retries.
    pub request_delay: Duration,
}

impl ClientConfig {
    /// Default base URL for a local LangFlow deployment.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:7860";

    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Default pre-request throttle delay.
    pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

    /// Create a new configuration with the given application token.
    pub fn new(application_token: impl Into<String>) -> Self {
        Self {
            application_token: application_token.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            request_delay: Self::DEFAULT_REQUEST_DELAY,
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pre-request throttle delay.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}
