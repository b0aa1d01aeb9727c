//! Validated generation topic

use std::fmt;

use thiserror::Error;

/// Rejected topic input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicError {
    #[error("Topic must not be empty")]
    Empty,
}

/// A topic that is non-empty after trimming whitespace
///
/// The text is kept exactly as typed; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    /// Validate raw user input
    pub fn parse(input: &str) -> Result<Self, TopicError> {
        if input.trim().is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Topic {
    type Error = TopicError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
