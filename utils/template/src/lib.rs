//! Prompt template loading and rendering.
//!
//! A template is plain text with positional placeholders of the form
//! `!<INPUT i>!`. Rendering replaces placeholder `i` with the stringified
//! i-th input. Templates may carry a leading comment block terminated by a
//! marker line; only the text after the last marker is rendered.

use std::io;
use std::path::Path;

/// Delimiter separating a template's comment header from its body.
pub const COMMENT_BLOCK_MARKER: &str = "<commentblockmarker>###</commentblockmarker>";

/// A raw prompt template, ready to be rendered against a list of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Create a template from raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load a template from a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// The raw, unrendered template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the template against an ordered list of inputs.
    ///
    /// Each occurrence of `!<INPUT i>!` is replaced with the i-th input.
    /// Placeholders whose index exceeds the number of inputs are left in
    /// place as literal text. If the comment-block marker is present, only
    /// the text after its last occurrence is kept. The result is trimmed of
    /// surrounding whitespace.
    pub fn render<S: AsRef<str>>(&self, inputs: &[S]) -> String {
        let mut prompt = self.text.clone();
        for (idx, input) in inputs.iter().enumerate() {
            let placeholder = format!("!<INPUT {idx}>!");
            prompt = prompt.replace(&placeholder, input.as_ref());
        }
        let body = match prompt.rfind(COMMENT_BLOCK_MARKER) {
            Some(pos) => &prompt[pos + COMMENT_BLOCK_MARKER.len()..],
            None => prompt.as_str(),
        };
        body.trim().to_string()
    }
}
