//! Agent flow profiles: named bundles of generation parameters.
//!
//! The table is built once at startup and never mutated; lookups by unknown
//! name fall back to the `default` profile so that callers can pass through
//! arbitrary agent-type strings without pre-validating them.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Name of the profile every unknown lookup resolves to.
pub const DEFAULT_AGENT_TYPE: &str = "default";

/// Generation parameters for one named agent flow.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentFlow {
    /// LangFlow project identifier the flow lives under.
    pub flow_id: &'static str,
    /// Flow endpoint identifier within the project.
    pub endpoint: &'static str,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum output length in tokens.
    pub max_tokens: u32,
    /// Nucleus-sampling threshold.
    pub top_p: f64,
    /// Frequency penalty.
    pub frequency_penalty: f64,
    /// Presence penalty.
    pub presence_penalty: f64,
}

const FLOW_ID: &str = "0586a787-50ae-4a4e-aebe-866cf022aa5b";
const FLOW_ENDPOINT: &str = "9ec859b3-9d84-4555-9166-52684d8f6e2f";

const DEFAULT_FLOW: AgentFlow = AgentFlow {
    flow_id: FLOW_ID,
    endpoint: FLOW_ENDPOINT,
    temperature: 0.7,
    max_tokens: 1000,
    top_p: 1.0,
    frequency_penalty: 0.0,
    presence_penalty: 0.0,
};

static AGENT_FLOWS: LazyLock<HashMap<&'static str, AgentFlow>> = LazyLock::new(|| {
    HashMap::from([
        ("default", DEFAULT_FLOW),
        (
            "creative",
            AgentFlow {
                temperature: 0.9,
                max_tokens: 1500,
                top_p: 0.95,
                frequency_penalty: 0.1,
                presence_penalty: 0.1,
                ..DEFAULT_FLOW
            },
        ),
        (
            "analytical",
            AgentFlow {
                temperature: 0.3,
                max_tokens: 2000,
                ..DEFAULT_FLOW
            },
        ),
    ])
});

impl AgentFlow {
    /// Look up a profile by name, falling back to `default` when the name is
    /// unrecognized. Total: never fails.
    pub fn named(agent_type: &str) -> &'static AgentFlow {
        AGENT_FLOWS
            .get(agent_type)
            .unwrap_or_else(|| &AGENT_FLOWS[DEFAULT_AGENT_TYPE])
    }

    /// Names of all registered profiles.
    pub fn names() -> impl Iterator<Item = &'static str> {
        AGENT_FLOWS.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_exists() {
        let flow = AgentFlow::named(DEFAULT_AGENT_TYPE);
        assert_eq!(flow.temperature, 0.7);
        assert_eq!(flow.max_tokens, 1000);
    }

    #[test]
    fn named_profiles_carry_their_own_parameters() {
        let creative = AgentFlow::named("creative");
        assert_eq!(creative.temperature, 0.9);
        assert_eq!(creative.max_tokens, 1500);
        assert_eq!(creative.top_p, 0.95);

        let analytical = AgentFlow::named("analytical");
        assert_eq!(analytical.temperature, 0.3);
        assert_eq!(analytical.max_tokens, 2000);
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(AgentFlow::named("no-such-agent"), AgentFlow::named("default"));
        assert_eq!(AgentFlow::named(""), AgentFlow::named("default"));
    }

    #[test]
    fn all_profiles_share_the_deployed_flow() {
        for name in AgentFlow::names() {
            let flow = AgentFlow::named(name);
            assert_eq!(flow.flow_id, FLOW_ID);
            assert_eq!(flow.endpoint, FLOW_ENDPOINT);
        }
    }
}
