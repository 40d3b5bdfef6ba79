use serde_json::Value;
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::LangFlowError;
use crate::error::Result;
use crate::flows::AgentFlow;

/// Environment variable for the application token.
const APPLICATION_TOKEN_ENV: &str = "LANGFLOW_APPLICATION_TOKEN";

/// Environment variable overriding the base URL.
const BASE_URL_ENV: &str = "LANGFLOW_BASE_URL";

/// Component identifiers of the deployed flow graph. The tweak payload is
/// keyed by these, so they must match the flow exactly.
const CHAT_INPUT_COMPONENT: &str = "ChatInput-fO1Tz";
const CHAT_OUTPUT_COMPONENT: &str = "ChatOutput-fIm7Y";
const MODEL_COMPONENT: &str = "OpenAIModel-VgBJv";
const PROMPT_COMPONENT: &str = "Prompt-tRR6M";

const PROMPT_COMPONENT_TEMPLATE: &str =
    "Respond based on user request:\n\nuser request: {user_request}\n\nResponse:";

/// The LangFlow API client.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.application_token.is_empty() {
            return Err(LangFlowError::Configuration(
                "Application token is required".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a new client from the environment.
    ///
    /// Reads the required `LANGFLOW_APPLICATION_TOKEN` variable and the
    /// optional `LANGFLOW_BASE_URL` override. A missing token fails here, at
    /// startup, rather than later inside a retry loop.
    pub fn from_env() -> Result<Self> {
        let application_token = std::env::var(APPLICATION_TOKEN_ENV).map_err(|_| {
            LangFlowError::Configuration(format!(
                "Missing {APPLICATION_TOKEN_ENV} environment variable"
            ))
        })?;

        let mut config = ClientConfig::new(application_token);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.base_url(base_url);
        }
        Self::new(config)
    }

    /// Create a new client with the given application token and defaults.
    pub fn with_application_token(application_token: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(application_token))
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run the flow once with the given prompt and profile, returning the
    /// raw response payload.
    ///
    /// Transport failures map to [`LangFlowError::Network`], non-success
    /// statuses to [`LangFlowError::Api`], and undecodable bodies to
    /// [`LangFlowError::Parse`]. Callers wanting the bounded retry loop
    /// should use [`Client::safe_generate`] instead.
    pub async fn run_flow(&self, prompt: &str, flow: &AgentFlow) -> Result<Value> {
        let url = format!(
            "{}/lf/{}/api/v1/run/{}?stream=false",
            self.config.base_url.trim_end_matches('/'),
            flow.flow_id,
            flow.endpoint,
        );

        let payload = json!({
            "input_value": prompt,
            "output_type": "chat",
            "input_type": "chat",
            "tweaks": {
                (CHAT_INPUT_COMPONENT): {},
                (CHAT_OUTPUT_COMPONENT): {},
                (MODEL_COMPONENT): {
                    "temperature": flow.temperature,
                    "max_tokens": flow.max_tokens,
                    "top_p": flow.top_p,
                    "frequency_penalty": flow.frequency_penalty,
                    "presence_penalty": flow.presence_penalty,
                },
                (PROMPT_COMPONENT): {
                    "template": PROMPT_COMPONENT_TEMPLATE,
                },
            },
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.application_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LangFlowError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(LangFlowError::from)
    }

    /// Make a single throttled request and extract its text, without the
    /// guarded retry loop. Errors surface to the caller.
    pub async fn single_request(&self, prompt: &str, agent_type: &str) -> Result<String> {
        tokio::time::sleep(self.config.request_delay).await;
        let flow = AgentFlow::named(agent_type);
        let payload = self.run_flow(prompt, flow).await?;
        Ok(extract_output_text(&payload))
    }
}

/// Pull the generated text out of a flow response payload.
///
/// The well-known location is `outputs[0].output`; anything else (missing
/// field, wrong type, error payload) falls back to the compact JSON
/// stringification of the whole value. Total: downstream validation and
/// clean-up always receive a string.
pub fn extract_output_text(payload: &Value) -> String {
    payload
        .get("outputs")
        .and_then(|outputs| outputs.get(0))
        .and_then(|first| first.get("output"))
        .and_then(Value::as_str)
        .map_or_else(|| payload.to_string(), str::to_string)
}
