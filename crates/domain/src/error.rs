//! Domain error type
//!
//! Raised by value-object constructors and parsers. Not-found and storage
//! failures belong to the engine's repository layer, not here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User input broke a rule (blank caption, over-long username, zero duration)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A string did not name a known variant
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Use in `FromStr` impls when the input matches no known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Message suitable for showing next to the offending input
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Parse(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_and_message() {
        let err = DomainError::validation("Caption cannot be empty");
        assert_eq!(err.to_string(), "Validation failed: Caption cannot be empty");
        assert_eq!(err.message(), "Caption cannot be empty");
    }

    #[test]
    fn parse_display() {
        let err = DomainError::parse("Unknown image filter: neon");
        assert_eq!(err.to_string(), "Parse error: Unknown image filter: neon");
    }
}
