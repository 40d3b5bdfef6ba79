//! The guarded request executor: a bounded request/validate/clean-up loop
//! that falls back to a fixed fail-safe value once the budget is exhausted.
//!
//! Each call is independent: nothing is cached or shared across calls, and a
//! transient failure of any single attempt (transport error, rejected
//! validation, unparseable structured output) only consumes budget, never
//! aborts the call.

use crate::client::Client;
use crate::client::extract_output_text;
use crate::error::LangFlowError;
use crate::error::Result;
use crate::flows::AgentFlow;
use crate::flows::DEFAULT_AGENT_TYPE;

/// Validation predicate over `(response_text, prompt)`.
pub type ValidateFn = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Clean-up transform over `(response_text, prompt)`.
pub type CleanUpFn = dyn Fn(&str, &str) -> String + Send + Sync;

/// Options for a guarded generation call.
pub struct GenerateOptions {
    pub(crate) agent_type: String,
    pub(crate) max_attempts: u32,
    pub(crate) fail_safe: String,
    pub(crate) validate: Option<Box<ValidateFn>>,
    pub(crate) clean_up: Option<Box<CleanUpFn>>,
    pub(crate) verbose: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            agent_type: DEFAULT_AGENT_TYPE.to_string(),
            max_attempts: 5,
            fail_safe: "error".to_string(),
            validate: None,
            clean_up: None,
            verbose: false,
        }
    }
}

impl GenerateOptions {
    /// Create options with the default profile, a budget of 5 attempts and
    /// the fail-safe value `"error"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the agent profile by name. Unknown names resolve to `default`.
    pub fn agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = agent_type.into();
        self
    }

    /// Set the attempt budget. Must be at least 1.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the value returned verbatim when every attempt fails.
    pub fn fail_safe(mut self, fail_safe: impl Into<String>) -> Self {
        self.fail_safe = fail_safe.into();
        self
    }

    /// Set the validation predicate, called with `(text, prompt)`. An
    /// attempt whose text is rejected consumes budget and is retried.
    pub fn validate(mut self, f: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Some(Box::new(f));
        self
    }

    /// Set the clean-up transform, called with `(text, prompt)` after a
    /// successful validation.
    pub fn clean_up(mut self, f: impl Fn(&str, &str) -> String + Send + Sync + 'static) -> Self {
        self.clean_up = Some(Box::new(f));
        self
    }

    /// Emit per-attempt diagnostics at info level instead of debug.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

macro_rules! attempt_log {
    ($options:expr, $($arg:tt)*) => {
        if $options.verbose {
            tracing::info!($($arg)*);
        } else {
            tracing::debug!($($arg)*);
        }
    };
}

impl Client {
    /// Generate a response with bounded retries and pluggable validation.
    ///
    /// Resolves the agent profile (unknown names fall back to `default`),
    /// sleeps the configured throttle delay once, then attempts up to
    /// `max_attempts` requests. A transport error, a rejected validation or
    /// an unusable payload consumes one attempt and the loop continues; the
    /// first accepted response is cleaned up and returned immediately. When
    /// the budget is exhausted the configured fail-safe value is returned
    /// verbatim — exhaustion is not an error.
    ///
    /// A `max_attempts` of zero is a caller bug and returns
    /// [`LangFlowError::InvalidArgument`] without making any request. When
    /// no validator is supplied the first extracted response is accepted
    /// unconditionally.
    pub async fn safe_generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String> {
        let generated = self
            .generate_with(prompt, options, |cleaned| Some(cleaned.to_string()))
            .await?;
        Ok(generated.unwrap_or_else(|| options.fail_safe.clone()))
    }

    /// The shared attempt loop. `accept` post-processes a validated, cleaned
    /// response; returning `None` discards the attempt and retries. Returns
    /// `Ok(None)` when the budget is exhausted.
    pub(crate) async fn generate_with<T>(
        &self,
        prompt: &str,
        options: &GenerateOptions,
        accept: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        if options.max_attempts == 0 {
            return Err(LangFlowError::InvalidArgument(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let flow = AgentFlow::named(&options.agent_type);
        attempt_log!(
            options,
            "sending prompt to agent type {}: {prompt}",
            options.agent_type
        );

        // Throttle, not backoff: a single fixed delay before the first
        // request, constant across retries.
        tokio::time::sleep(self.config().request_delay).await;

        for attempt in 0..options.max_attempts {
            let payload = match self.run_flow(prompt, flow).await {
                Ok(payload) => payload,
                Err(err) => {
                    attempt_log!(options, "attempt {attempt} failed: {err}");
                    continue;
                }
            };

            let text = extract_output_text(&payload);

            if let Some(validate) = &options.validate
                && !validate(&text, prompt)
            {
                attempt_log!(options, "attempt {attempt} rejected by validator: {text}");
                continue;
            }

            let cleaned = match &options.clean_up {
                Some(clean_up) => clean_up(&text, prompt),
                None => text,
            };

            match accept(&cleaned) {
                Some(value) => return Ok(Some(value)),
                None => {
                    attempt_log!(options, "attempt {attempt} discarded by post-processing");
                }
            }
        }

        attempt_log!(options, "all {} attempts exhausted", options.max_attempts);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_service_defaults() {
        let options = GenerateOptions::new();
        assert_eq!(options.agent_type, "default");
        assert_eq!(options.max_attempts, 5);
        assert_eq!(options.fail_safe, "error");
        assert!(options.validate.is_none());
        assert!(options.clean_up.is_none());
        assert!(!options.verbose);
    }

    #[test]
    fn builder_installs_callbacks() {
        let options = GenerateOptions::new()
            .agent_type("creative")
            .max_attempts(3)
            .fail_safe("rest")
            .validate(|text, _prompt| !text.is_empty())
            .clean_up(|text, _prompt| text.trim().to_string())
            .verbose(true);

        assert_eq!(options.agent_type, "creative");
        assert_eq!(options.max_attempts, 3);
        assert_eq!(options.fail_safe, "rest");
        assert!(options.validate.is_some());
        assert!(options.clean_up.is_some());
        assert!(options.verbose);
    }
}
