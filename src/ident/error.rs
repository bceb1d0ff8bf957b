use std::fmt;

/// Errors produced when an identifier is not `[namespace:]path`.
#[derive(Debug)]
pub struct IdentError {
    input: String,
    message: String,
}

impl IdentError {
    pub(crate) fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
        }
    }

    /// The identifier that failed to parse, after lowercasing.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for IdentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed identifier '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for IdentError {}
