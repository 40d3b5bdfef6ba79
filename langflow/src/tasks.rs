//! Structured post-processing for task-decomposition responses.
//!
//! Task decompositions come back as numbered lines of the form
//! `N) <description> (duration in minutes: M, ...)`. The parser is all or
//! nothing: one unparseable numbered line discards the whole attempt, so the
//! executor retries instead of returning a partial plan.

use serde::Deserialize;
use serde::Serialize;

use crate::client::Client;
use crate::error::Result;
use crate::generate::GenerateOptions;

const DURATION_MARKER: &str = "duration in minutes: ";

/// One step of a decomposed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStep {
    pub description: String,
    pub duration_minutes: u32,
}

impl TaskStep {
    pub fn new(description: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            description: description.into(),
            duration_minutes,
        }
    }
}

/// Parse a cleaned response into ordered task steps.
///
/// Lines without the `N) ` numbering convention are skipped. A numbered line
/// missing the duration marker, or carrying a non-numeric duration, fails
/// the whole parse. A response with no numbered lines at all is also a
/// failed parse.
pub fn parse_task_decomposition(text: &str) -> Option<Vec<TaskStep>> {
    let mut steps = Vec::new();
    for line in text.lines() {
        let Some((_, rest)) = line.split_once(") ") else {
            continue;
        };
        let description = rest
            .split_once(" (duration")
            .map_or(rest, |(before, _)| before)
            .trim()
            .to_string();

        let after_marker = line.split_once(DURATION_MARKER)?.1;
        let digits = after_marker
            .split(',')
            .next()
            .unwrap_or(after_marker)
            .trim_end_matches(')')
            .trim();
        let duration_minutes = digits.parse::<u32>().ok()?;

        steps.push(TaskStep {
            description,
            duration_minutes,
        });
    }
    if steps.is_empty() { None } else { Some(steps) }
}

impl Client {
    /// Guarded generation whose accepted text must additionally parse as a
    /// task decomposition.
    ///
    /// Runs the same bounded loop as [`Client::safe_generate`]; an attempt
    /// that passes validation and clean-up but fails the structured parse is
    /// discarded and retried. Exhaustion returns the typed `fail_safe`.
    pub async fn safe_generate_task_decomp(
        &self,
        prompt: &str,
        options: &GenerateOptions,
        fail_safe: Vec<TaskStep>,
    ) -> Result<Vec<TaskStep>> {
        let parsed = self
            .generate_with(prompt, options, parse_task_decomposition)
            .await?;
        Ok(parsed.unwrap_or(fail_safe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_numbered_lines_with_durations() {
        let text = "1) cook breakfast (duration in minutes: 15, remaining: 45)\n\
                    2) eat breakfast (duration in minutes: 10, remaining: 35)";
        let steps = parse_task_decomposition(text).expect("should parse");
        assert_eq!(
            steps,
            vec![
                TaskStep::new("cook breakfast", 15),
                TaskStep::new("eat breakfast", 10),
            ]
        );
    }

    #[test]
    fn skips_unnumbered_lines() {
        let text = "Here is the plan:\n1) shower (duration in minutes: 10, remaining: 0)";
        let steps = parse_task_decomposition(text).expect("should parse");
        assert_eq!(steps, vec![TaskStep::new("shower", 10)]);
    }

    #[test]
    fn numbered_line_without_duration_fails_the_whole_parse() {
        let text = "1) cook breakfast (duration in minutes: 15, remaining: 45)\n\
                    2) eat breakfast";
        assert_eq!(parse_task_decomposition(text), None);
    }

    #[test]
    fn non_numeric_duration_fails_the_whole_parse() {
        let text = "1) nap (duration in minutes: a while, remaining: 0)";
        assert_eq!(parse_task_decomposition(text), None);
    }

    #[test]
    fn response_without_numbered_lines_fails() {
        assert_eq!(parse_task_decomposition("no plan today"), None);
    }

    #[test]
    fn duration_without_trailing_fields_still_parses() {
        let text = "1) stretch (duration in minutes: 5)";
        let steps = parse_task_decomposition(text).expect("should parse");
        assert_eq!(steps, vec![TaskStep::new("stretch", 5)]);
    }
}
