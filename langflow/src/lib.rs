//! Retrying client for a LangFlow text-generation backend.
//!
//! The crate wraps one deployed flow behind a small API: render a prompt
//! (see `reverie-utils-template`), post it to the flow endpoint with the
//! sampling parameters of a named [`AgentFlow`] profile, defensively extract
//! the response text, and run a caller-supplied validate/clean-up pair
//! inside a bounded retry loop that falls back to a fixed fail-safe value.
//!
//! ```no_run
//! use reverie_langflow::{Client, GenerateOptions};
//!
//! # async fn example() -> reverie_langflow::Result<()> {
//! let client = Client::from_env()?;
//! let options = GenerateOptions::new()
//!     .max_attempts(5)
//!     .fail_safe("rest")
//!     .validate(|text, _prompt| !text.trim().is_empty());
//!
//! let activity = client.safe_generate("what should I do next?", &options).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod flows;
mod generate;
mod tasks;

pub use client::Client;
pub use client::extract_output_text;
pub use config::ClientConfig;
pub use error::LangFlowError;
pub use error::Result;
pub use flows::AgentFlow;
pub use flows::DEFAULT_AGENT_TYPE;
pub use generate::CleanUpFn;
pub use generate::GenerateOptions;
pub use generate::ValidateFn;
pub use tasks::TaskStep;
pub use tasks::parse_task_decomposition;
